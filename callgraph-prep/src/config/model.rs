//! Configuration data structures for the call graph pipeline.
//!
//! Groups:
//! - [`GraphConfig`]   — top-level container for all config groups
//! - [`Filters`]       — which files are scanned
//! - [`Limits`]        — size caps
//! - [`ResolveConfig`] — call-site resolution options
//! - [`ExportConfig`]  — optional artifacts

use crate::errors::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
    pub filters: Filters,
    pub limits: Limits,
    pub resolve: ResolveConfig,
    pub export: ExportConfig,
}

impl GraphConfig {
    /// Validate config sanity (no degenerate values).
    pub fn validate(&self) -> Result<()> {
        if self.filters.extension.trim().is_empty() {
            return Err(GraphError::Config("`extension` must not be empty".into()));
        }
        if self.filters.extension.starts_with('.') {
            return Err(GraphError::Config(format!(
                "`extension` must not start with a dot: {}",
                self.filters.extension
            )));
        }
        if self.limits.max_file_bytes == 0 {
            return Err(GraphError::Config(
                "`max_file_bytes` must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// File filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filters {
    /// Source extension without the dot.
    pub extension: String,
    /// Any path (relative to its root) containing one of these is skipped.
    pub exclude_substrings: Vec<String>,
    /// Extra glob patterns for files to ignore.
    pub ignore_globs: Vec<String>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            extension: "py".into(),
            exclude_substrings: vec!["test".into()],
            ignore_globs: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum file size to parse (bytes). Larger files are skipped.
    pub max_file_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: 4 * 1024 * 1024, // 4 MB
        }
    }
}

/// How `*args` / `**kwargs` at a call site affect the observed argument count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnpackedArgs {
    /// Unpacked arguments count as zero; the explicit count must fit exactly.
    #[default]
    Ignore,
    /// A call with unpacking supplies *at least* the explicit count.
    AtLeast,
}

impl UnpackedArgs {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Some(Self::Ignore),
            "at_least" | "at-least" => Some(Self::AtLeast),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    pub unpacked_args: UnpackedArgs,
    /// Link bare attribute access to zero-arity signatures.
    pub attribute_access: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            unpacked_args: UnpackedArgs::Ignore,
            attribute_access: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write one `signatures/<name>_<min>_<max>.dot` per node.
    pub per_signature_dot: bool,
}
