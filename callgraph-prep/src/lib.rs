//! Approximate call graph construction for Python source trees.
//!
//! The analysis never executes code and never infers types. It works in two
//! passes over the whole tree:
//!
//! 1. **Definition collection.** Every `def` (and every class `__init__`,
//!    re-labelled with the class name) becomes a [`Signature`]: a name plus an
//!    inclusive accepted-argument-count range.
//! 2. **Call-site resolution.** Every call inside a function body is matched
//!    by name and argument count against all signatures sharing that name.
//!    Each compatible one receives an edge from the caller.
//!
//! When several signatures fit a call site, all of them are linked.
//!
//! ```no_run
//! use callgraph_prep::{GraphConfig, build_and_save};
//! use std::path::{Path, PathBuf};
//!
//! let roots = vec![PathBuf::from("src")];
//! let summary = build_and_save(&roots, Path::new("out"), &GraphConfig::default())?;
//! println!("{} edges", summary.summary.counts.graph_edges);
//! # Ok::<(), callgraph_prep::GraphError>(())
//! ```

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod graph;
pub mod languages;
pub mod model;
pub mod run;

pub use config::model::{GraphConfig, UnpackedArgs};
pub use errors::{GraphError, Result};
pub use model::{
    graph::{CallEdge, CallGraph, CallNode},
    index::DefinitionIndex,
    signature::{Category, Definition, MaxArgs, Signature},
};
pub use run::{CallGraphBuild, build_and_save, build_call_graph};
