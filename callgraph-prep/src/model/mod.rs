pub mod graph;
pub mod index;
pub mod signature;
