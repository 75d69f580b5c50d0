//! Artifact writers. Every writer takes a finished graph/index; nothing here
//! runs before phase 2 completes.

pub mod definitions;
pub mod dot;
pub mod graphml;
pub mod jsonl;
pub mod save_all;
