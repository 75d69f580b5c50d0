//! Configuration loader and validator.
//!
//! Responsibilities:
//! - Read environment variables to populate [`GraphConfig`]
//! - Apply defaults when values are missing
//! - Validate constraints (e.g., max_file_bytes must be > 0)

pub mod model;

use crate::config::model::{GraphConfig, UnpackedArgs};
use crate::errors::{GraphError, Result};
use std::env;
use tracing::debug;

/// Load [`GraphConfig`] from `FUNC_DEPS_*` ENV variables, falling back to defaults.
pub fn load_from_env_or_default() -> Result<GraphConfig> {
    let cfg = apply_overrides(GraphConfig::default(), |key| env::var(key).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply overrides from any key/value source on top of `cfg`.
pub fn apply_overrides<F>(mut cfg: GraphConfig, lookup: F) -> Result<GraphConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("FUNC_DEPS_EXTENSION") {
        cfg.filters.extension = v.trim().to_string();
    }
    if let Some(v) = lookup("FUNC_DEPS_EXCLUDE_SUBSTRINGS") {
        cfg.filters.exclude_substrings = split_list(&v);
    }
    if let Some(v) = lookup("FUNC_DEPS_IGNORE_GLOBS") {
        cfg.filters.ignore_globs = split_list(&v);
    }
    if let Some(v) = lookup("FUNC_DEPS_MAX_FILE_BYTES") {
        cfg.limits.max_file_bytes = v.trim().parse().map_err(|_| {
            GraphError::Config(format!("FUNC_DEPS_MAX_FILE_BYTES is not a number: {v}"))
        })?;
    }
    if let Some(v) = lookup("FUNC_DEPS_UNPACKED_ARGS") {
        cfg.resolve.unpacked_args = UnpackedArgs::parse(&v).ok_or_else(|| {
            GraphError::Config(format!("FUNC_DEPS_UNPACKED_ARGS must be ignore|at_least: {v}"))
        })?;
    }
    if let Some(v) = lookup("FUNC_DEPS_ATTRIBUTE_ACCESS") {
        cfg.resolve.attribute_access = parse_flag(&v);
    }
    if let Some(v) = lookup("FUNC_DEPS_PER_SIGNATURE_DOT") {
        cfg.export.per_signature_dot = parse_flag(&v);
    }
    debug!(?cfg, "config: overrides applied");
    Ok(cfg)
}

/// Comma-separated list, blanks dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(v: &str) -> bool {
    let v = v.trim();
    v.eq_ignore_ascii_case("true") || v == "1"
}
