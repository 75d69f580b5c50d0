//! Depth-first traversal helpers over Tree-sitter nodes.

use tree_sitter::Node;

/// Visit every named descendant of `root` in source order (pre-order).
///
/// A node for which `stop` returns `true` is neither visited nor descended
/// into. `root` itself is never visited.
pub fn walk_named<'t, S, V>(root: Node<'t>, stop: S, mut visit: V)
where
    S: Fn(Node<'t>) -> bool,
    V: FnMut(Node<'t>),
{
    let mut stack: Vec<Node<'t>> = Vec::new();
    push_children(root, &mut stack);

    while let Some(node) = stack.pop() {
        if stop(node) {
            continue;
        }
        visit(node);
        push_children(node, &mut stack);
    }
}

/// Push named children in reverse so they pop in source order.
fn push_children<'t>(node: Node<'t>, stack: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let start = stack.len();
    stack.extend(node.named_children(&mut cursor));
    stack[start..].reverse();
}

/// Nested scopes whose calls belong to their own definition.
#[inline]
pub fn is_scope_boundary(node: Node<'_>) -> bool {
    matches!(node.kind(), "function_definition" | "class_definition")
}

/// UTF-8 text of `node`.
#[inline]
pub fn text<'a>(code: &'a str, node: Node<'_>) -> &'a str {
    &code[node.byte_range()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse::PythonParser;
    use std::path::Path;

    #[test]
    fn stop_predicate_cuts_subtrees() {
        let src = "def outer():\n    a()\n    def inner():\n        b()\n    c()\n";
        let mut p = PythonParser::new().unwrap();
        let f = p.parse_source(Path::new("w.py"), src.into()).unwrap();
        let outer = f.tree.root_node().named_child(0).unwrap();
        let body = outer.child_by_field_name("body").unwrap();

        let mut called = Vec::new();
        walk_named(body, is_scope_boundary, |n| {
            if n.kind() == "call" {
                let func = n.child_by_field_name("function").unwrap();
                called.push(text(&f.code, func).to_string());
            }
        });
        assert_eq!(called, vec!["a", "c"]);
    }

    #[test]
    fn unrestricted_walk_reaches_nested_definitions() {
        let src = "class A:\n    def m(self):\n        def n():\n            pass\n";
        let mut p = PythonParser::new().unwrap();
        let f = p.parse_source(Path::new("w.py"), src.into()).unwrap();

        let mut defs = Vec::new();
        walk_named(f.tree.root_node(), |_| false, |n| {
            if n.kind() == "function_definition" {
                let name = n.child_by_field_name("name").unwrap();
                defs.push(text(&f.code, name).to_string());
            }
        });
        assert_eq!(defs, vec!["m", "n"]);
    }
}
