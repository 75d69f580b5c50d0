pub mod builtins;
pub mod fs_scan;
pub mod parse;
pub mod summary;
pub mod syntax;
pub mod traits;
