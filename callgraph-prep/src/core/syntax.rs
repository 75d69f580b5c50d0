//! Post-parse checks for invalid Python the grammar accepts silently.
//!
//! Tree-sitter's Python grammar is context-free, so a few constructs the
//! interpreter rejects come back as ordinary nodes:
//!
//! - a required parameter after a defaulted one (`def f(a=1, b)`)
//! - a repeated parameter name (`def f(a, a)`, also for lambdas)
//! - a positional argument after a keyword argument or `**` (`f(x=1, 2)`)
//! - `*x` after `**y` in a call
//! - a repeated keyword argument (`f(a=1, a=2)`)
//!
//! Indentation is not re-checked; the grammar's scanner decides it.

use std::collections::HashSet;
use tree_sitter::Node;

/// First rejected construct found in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// 1-based source line.
    pub line: usize,
    pub reason: &'static str,
}

/// Scan the whole tree rooted at `root` and report the first violation.
pub fn first_violation(root: Node<'_>, code: &str) -> Option<Violation> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let reason = match node.kind() {
            "parameters" | "lambda_parameters" => check_parameters(node, code),
            "argument_list" => check_arguments(node, code),
            _ => None,
        };
        if let Some(reason) = reason {
            return Some(Violation {
                line: node.start_position().row + 1,
                reason,
            });
        }
        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }
    None
}

fn check_parameters(params: Node<'_>, code: &str) -> Option<&'static str> {
    let mut seen = HashSet::new();
    let mut defaulted = false;
    let mut keyword_only = false;

    let mut cursor = params.walk();
    for p in params.named_children(&mut cursor) {
        let kind = match p.kind() {
            "typed_parameter" => p.named_child(0).map_or("identifier", |c| c.kind()),
            k => k,
        };
        match kind {
            "identifier" if defaulted && !keyword_only => {
                return Some("non-default parameter follows default parameter");
            }
            "default_parameter" | "typed_default_parameter" => defaulted = true,
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                keyword_only = true
            }
            _ => {}
        }
        if let Some(name) = parameter_name(p, code) {
            if !seen.insert(name) {
                return Some("duplicate parameter name");
            }
        }
    }
    None
}

fn parameter_name<'c>(p: Node<'_>, code: &'c str) -> Option<&'c str> {
    let inner = match p.kind() {
        "identifier" => return Some(&code[p.byte_range()]),
        "default_parameter" | "typed_default_parameter" => p.child_by_field_name("name")?,
        "typed_parameter" | "list_splat_pattern" | "dictionary_splat_pattern" => {
            p.named_child(0)?
        }
        _ => return None,
    };
    parameter_name(inner, code)
}

fn check_arguments(args: Node<'_>, code: &str) -> Option<&'static str> {
    let mut keywords = HashSet::new();
    let mut after_keyword = false;
    let mut after_dict_splat = false;

    let mut cursor = args.walk();
    for a in args.named_children(&mut cursor) {
        match a.kind() {
            "keyword_argument" => {
                after_keyword = true;
                let name = a.child_by_field_name("name").map(|n| &code[n.byte_range()]);
                if let Some(name) = name {
                    if !keywords.insert(name) {
                        return Some("keyword argument repeated");
                    }
                }
            }
            "dictionary_splat" => after_dict_splat = true,
            "list_splat" if after_dict_splat => {
                return Some("iterable argument unpacking follows keyword argument unpacking");
            }
            "list_splat" | "comment" => {}
            _ if after_keyword || after_dict_splat => {
                return Some("positional argument follows keyword argument");
            }
            _ => {}
        }
    }
    None
}
