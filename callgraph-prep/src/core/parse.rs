//! Parsing layer: Tree-sitter Python grammar.
//!
//! Tree-sitter always returns a tree, recovering from syntax errors with
//! `ERROR`/`MISSING` nodes. Any such recovery, or any construct rejected by
//! [`syntax::first_violation`], is reported as a parse failure so the file
//! aborts the run instead of contributing partial results. Indentation errors
//! the grammar's scanner tolerates are not caught.

use crate::core::syntax;
use crate::errors::{GraphError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use tree_sitter::{Parser, Tree};

/// One parsed source file.
pub struct ParsedFile {
    pub path: PathBuf,
    pub code: String,
    pub tree: Tree,
}

/// Reusable parser bound to the Python grammar.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|_| GraphError::TreeSitterLanguage)?;
        Ok(Self { parser })
    }

    /// Read and parse `path`.
    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let code = fs::read_to_string(path)?;
        self.parse_source(path, code)
    }

    /// Parse in-memory `code`; `path` is only used for error reporting.
    pub fn parse_source(&mut self, path: &Path, code: String) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(&code, None)
            .ok_or_else(|| GraphError::Parse {
                path: path.to_path_buf(),
            })?;
        if tree.root_node().has_error() {
            return Err(GraphError::Parse {
                path: path.to_path_buf(),
            });
        }
        if let Some(v) = syntax::first_violation(tree.root_node(), &code) {
            warn!("parse: {}:{}: {}", path.display(), v.line, v.reason);
            return Err(GraphError::Parse {
                path: path.to_path_buf(),
            });
        }
        Ok(ParsedFile {
            path: path.to_path_buf(),
            code,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_source_parses() {
        let mut p = PythonParser::new().unwrap();
        let f = p
            .parse_source(Path::new("ok.py"), "def f(a):\n    return a\n".into())
            .unwrap();
        assert_eq!(f.tree.root_node().kind(), "module");
    }

    #[test]
    fn syntax_error_is_fatal() {
        let mut p = PythonParser::new().unwrap();
        let err = p
            .parse_source(Path::new("bad.py"), "def f(:\n    pass\n".into())
            .err()
            .unwrap();
        match err {
            GraphError::Parse { path } => assert_eq!(path, PathBuf::from("bad.py")),
            other => panic!("unexpected error: {other}"),
        }
    }

    fn rejects(src: &str) -> bool {
        let mut p = PythonParser::new().unwrap();
        matches!(
            p.parse_source(Path::new("bad.py"), src.into()),
            Err(GraphError::Parse { .. })
        )
    }

    #[test]
    fn required_parameter_after_default_is_fatal() {
        assert!(rejects("def f(a=1, b):\n    pass\n"));
        assert!(rejects("def f(a: int = 1, b: int):\n    pass\n"));
        assert!(rejects("g = lambda a=1, b: a\n"));
    }

    #[test]
    fn duplicate_parameter_is_fatal() {
        assert!(rejects("def f(a, a):\n    pass\n"));
        assert!(rejects("def f(a, *, a=1):\n    pass\n"));
        assert!(rejects("def f(a, **a):\n    pass\n"));
        assert!(rejects("g = lambda x, x: x\n"));
    }

    #[test]
    fn positional_after_keyword_argument_is_fatal() {
        assert!(rejects("f(x=1, 2)\n"));
        assert!(rejects("f(**kw, 2)\n"));
        assert!(rejects("f(**kw, *rest)\n"));
        assert!(rejects("f(a=1, a=2)\n"));
        assert!(rejects("class C(metaclass=M, Base):\n    pass\n"));
    }

    #[test]
    fn valid_parameter_and_argument_orders_parse() {
        let src = "\
def f(a, /, b=1, *, c, d=2, **kw):
    pass

def g(self, x: int = 0, *args: str, y, **kwargs):
    pass

h = lambda a, b=1, *r, k: a

f(1, *xs, k=2, *ys, **kw)
f(x for x in xs)
";
        let mut p = PythonParser::new().unwrap();
        assert!(p.parse_source(Path::new("ok.py"), src.into()).is_ok());
    }
}
