//! Python extractor: phase 1 definition collection.
//!
//! Walks the whole tree without scope restrictions, so nested functions,
//! methods and classes all contribute their own signatures.
//! - every `def` / `async def` emits one [`Definition`]
//! - every class with an `__init__` emits an extra constructor definition

pub mod signature;
pub mod walk;

use crate::core::{parse::ParsedFile, traits::DefinitionSink};
use tracing::debug;

/// Emit every definition of `file` into `sink`. Returns how many were emitted.
pub fn collect_definitions(file: &ParsedFile, sink: &mut dyn DefinitionSink) -> usize {
    let code = file.code.as_str();
    let mut emitted = 0usize;

    walk::walk_named(file.tree.root_node(), |_| false, |node| {
        let def = match node.kind() {
            "function_definition" => signature::function_definition(node, code),
            "class_definition" => signature::class_constructor(node, code),
            _ => None,
        };
        if let Some(def) = def {
            sink.on_definition(def);
            emitted += 1;
        }
    });

    debug!("python::collect {} -> {} definitions", file.path.display(), emitted);
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse::PythonParser;
    use crate::model::signature::{Category, Definition, MaxArgs, Signature};
    use std::path::Path;

    #[test]
    fn collects_functions_methods_constructors_and_nested_defs() {
        let src = "\
def top(a):
    def nested(x, y):
        pass
    return nested

class C:
    def __init__(self, v):
        self.v = v

    def bar(self):
        return self.v
";
        let mut p = PythonParser::new().unwrap();
        let f = p.parse_source(Path::new("m.py"), src.into()).unwrap();
        let mut defs: Vec<Definition> = Vec::new();
        let n = collect_definitions(&f, &mut defs);

        assert_eq!(n, 5);
        let got: Vec<(String, Category)> = defs
            .iter()
            .map(|d| (d.signature.key(), d.category))
            .collect();
        assert_eq!(
            got,
            vec![
                ("top_1_1".to_string(), Category::Plain),
                ("nested_2_2".to_string(), Category::Plain),
                ("C_1_1".to_string(), Category::ClassConstructor),
                ("__init___1_1".to_string(), Category::Plain),
                ("bar_0_0".to_string(), Category::Plain),
            ]
        );
        assert!(defs.iter().any(|d| d.signature == Signature::new("C", 1, MaxArgs::Bounded(1))));
    }
}
