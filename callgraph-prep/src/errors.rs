//! Unified error type for the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for call graph preparation.
///
/// Only [`GraphError::Parse`] is produced by the analysis itself; everything
/// else comes from the filesystem, configuration, or the export layer (whose
/// serialization errors arrive wrapped in [`GraphError::Internal`]).
#[derive(Debug, Error)]
pub enum GraphError {
    /// A source file could not be parsed. Aborts the whole run.
    #[error("parse error in {}", path.display())]
    Parse { path: PathBuf },

    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("tree-sitter language error")]
    TreeSitterLanguage,

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A configured scan root does not exist.
    #[error("root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    /// Generic error from anyhow chain (export helpers).
    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
