//! Deterministic source discovery over a set of roots.
//!
//! Entries are visited in file-name order so repeated runs see files in the
//! same sequence. Test directories/files are dropped by substring match on the
//! path relative to its root, and counted per source file. Symlinked
//! directories are not followed.

use crate::config::model::GraphConfig;
use crate::errors::{GraphError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Canonical root-prefixed path.
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub roots: Vec<PathBuf>,
    pub files: Vec<ScannedFile>,
    /// Source files dropped by a test substring or an ignore glob.
    pub skipped_excluded: usize,
    pub skipped_too_big: usize,
}

/// Scan every root in order and collect matching source files.
pub fn scan_roots(roots: &[PathBuf], cfg: &GraphConfig) -> Result<ScanResult> {
    let ignore_globs = build_globset(&cfg.filters.ignore_globs);
    let mut out = ScanResult::default();

    for root in roots {
        if !root.exists() {
            return Err(GraphError::RootMissing(root.clone()));
        }
        let root = dunce::canonicalize(root)?;
        info!("fs_scan: start -> {}", root.display());
        scan_one(&root, cfg, ignore_globs.as_ref(), &mut out);
        out.roots.push(root);
    }

    info!(
        "fs_scan: done, total={} (excluded={}, too_big={})",
        out.files.len(),
        out.skipped_excluded,
        out.skipped_too_big
    );
    Ok(out)
}

fn scan_one(root: &Path, cfg: &GraphConfig, ignore: Option<&GlobSet>, out: &mut ScanResult) {
    // Symlinked directories are listed but not descended; symlinked files are read.
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(keep_entry);

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("fs_scan: walk error under {}: {}", root.display(), err);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_dir() || !has_extension(path, &cfg.filters.extension) {
            continue;
        }
        // Resolves symlinks; a link to a directory is not a file.
        let meta = match fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(err) => {
                warn!("fs_scan: metadata failed for {}: {}", path.display(), err);
                continue;
            }
        };

        if is_excluded(root, path, &cfg.filters.exclude_substrings) {
            out.skipped_excluded += 1;
            debug!("fs_scan: exclude (substring) {}", path.display());
            continue;
        }
        if let Some(gs) = ignore {
            if gs.is_match(path) {
                out.skipped_excluded += 1;
                debug!("fs_scan: ignore (glob) {}", path.display());
                continue;
            }
        }

        let size = meta.len();
        if size as usize > cfg.limits.max_file_bytes {
            out.skipped_too_big += 1;
            warn!(
                "fs_scan: skip (size {} > max {}) {}",
                size,
                cfg.limits.max_file_bytes,
                path.display()
            );
            continue;
        }

        out.files.push(ScannedFile {
            path: path.to_path_buf(),
            size,
        });
    }
}

/// Coarse directory filter to avoid descending into heavy/vendor folders.
fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() > 0 && entry.file_type().is_dir() {
        if let Some(name) = entry.file_name().to_str() {
            return !matches!(
                name,
                ".git" | "__pycache__" | ".venv" | "venv" | "node_modules" | "build" | ".tox"
            );
        }
    }
    true
}

/// `true` if the root-relative path contains any of `needles`.
fn is_excluded(root: &Path, path: &Path, needles: &[String]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.to_string_lossy();
    needles.iter().any(|n| rel.contains(n.as_str()))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == ext)
}

fn build_globset(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        match Glob::new(p) {
            Ok(g) => {
                b.add(g);
            }
            Err(err) => warn!("fs_scan: invalid glob {p:?}: {err}"),
        }
    }
    b.build().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "x = 1\n").unwrap();
    }

    #[test]
    fn skips_tests_and_foreign_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        touch(root, "pkg/a.py");
        touch(root, "pkg/b.txt");
        touch(root, "pkg/test_a.py");
        touch(root, "tests/helpers.py");
        touch(root, "pkg/__pycache__/a.py");
        touch(root, "pkg/sub/c.py");

        let res = scan_roots(&[root.to_path_buf()], &GraphConfig::default()).unwrap();
        let names: Vec<String> = res
            .files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(&res.roots[0])
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["pkg/a.py", "pkg/sub/c.py"]);
        assert_eq!(res.skipped_excluded, 2);
        assert_eq!(res.files.iter().map(|f| f.size).sum::<u64>(), 12);
    }

    #[test]
    fn glob_ignores_count_as_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "keep.py");
        touch(tmp.path(), "gen/out_pb2.py");
        let mut cfg = GraphConfig::default();
        cfg.filters.ignore_globs = vec!["**/*_pb2.py".into()];

        let res = scan_roots(&[tmp.path().to_path_buf()], &cfg).unwrap();
        assert_eq!(res.files.len(), 1);
        assert_eq!(res.skipped_excluded, 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let tmp = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        touch(tmp.path(), "pkg/a.py");
        touch(outside.path(), "lib/b.py");
        std::os::unix::fs::symlink(outside.path().join("lib"), tmp.path().join("pkg/linked"))
            .unwrap();
        std::os::unix::fs::symlink(tmp.path().join("pkg/a.py"), tmp.path().join("alias.py"))
            .unwrap();

        let res = scan_roots(&[tmp.path().to_path_buf()], &GraphConfig::default()).unwrap();
        let names: Vec<_> = res
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alias.py", "a.py"]);
    }

    #[test]
    fn oversized_files_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "big.py");
        let mut cfg = GraphConfig::default();
        cfg.limits.max_file_bytes = 2;

        let res = scan_roots(&[tmp.path().to_path_buf()], &cfg).unwrap();
        assert!(res.files.is_empty());
        assert_eq!(res.skipped_too_big, 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        let err = scan_roots(&[missing], &GraphConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::RootMissing(_)));
    }
}
