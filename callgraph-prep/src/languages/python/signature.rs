//! Signature extraction from `def` nodes.
//!
//! Positional parameters are those before the first `*`, `*args` or `**kwargs`
//! marker (positional-only ones included). A leading `self`/`cls` is the
//! implicit receiver and is not counted.

use crate::languages::python::walk::text;
use crate::model::signature::{Category, Definition, MaxArgs, Signature};
use tree_sitter::Node;

/// Parameter list summary of one definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamShape {
    pub positional: usize,
    pub with_default: usize,
    pub variadic: bool,
    pub has_receiver: bool,
}

impl ParamShape {
    /// Inspect the `parameters` node of a function definition.
    pub fn from_parameters(params: Node<'_>, code: &str) -> Self {
        let mut shape = ParamShape::default();
        let mut keyword_only = false;
        let mut first: Option<&str> = None;

        let mut cursor = params.walk();
        for p in params.named_children(&mut cursor) {
            match p.kind() {
                "keyword_separator" => keyword_only = true,
                "positional_separator" | "comment" => {}
                "list_splat_pattern" => {
                    shape.variadic = true;
                    keyword_only = true;
                }
                "dictionary_splat_pattern" => shape.variadic = true,
                "typed_parameter" => match p.named_child(0).map(|c| c.kind()) {
                    Some("list_splat_pattern") => {
                        shape.variadic = true;
                        keyword_only = true;
                    }
                    Some("dictionary_splat_pattern") => shape.variadic = true,
                    _ if !keyword_only => {
                        shape.positional += 1;
                        if shape.positional == 1 {
                            first = p.named_child(0).map(|c| text(code, c));
                        }
                    }
                    _ => {}
                },
                "default_parameter" | "typed_default_parameter" if !keyword_only => {
                    shape.positional += 1;
                    shape.with_default += 1;
                    if shape.positional == 1 {
                        first = p.child_by_field_name("name").map(|c| text(code, c));
                    }
                }
                "identifier" if !keyword_only => {
                    shape.positional += 1;
                    if shape.positional == 1 {
                        first = Some(text(code, p));
                    }
                }
                _ => {}
            }
        }

        shape.has_receiver = matches!(first, Some("self" | "cls"));
        shape
    }

    pub fn min_args(&self) -> usize {
        (self.positional - self.with_default).saturating_sub(self.receiver_offset())
    }

    pub fn max_args(&self) -> MaxArgs {
        if self.variadic {
            MaxArgs::Unbounded
        } else {
            MaxArgs::Bounded(self.positional.saturating_sub(self.receiver_offset()))
        }
    }

    fn receiver_offset(&self) -> usize {
        usize::from(self.has_receiver)
    }
}

/// Build the [`Definition`] of a `function_definition` node.
///
/// Returns `None` for malformed nodes without a name or parameter list.
pub fn function_definition(node: Node<'_>, code: &str) -> Option<Definition> {
    let name = text(code, node.child_by_field_name("name")?);
    let shape = ParamShape::from_parameters(node.child_by_field_name("parameters")?, code);
    let signature = Signature::new(name, shape.min_args(), shape.max_args());
    Some(Definition::new(signature, decorator_category(node, code)))
}

/// Constructor [`Definition`] of a `class_definition`, from its first `__init__`.
pub fn class_constructor(class: Node<'_>, code: &str) -> Option<Definition> {
    let class_name = text(code, class.child_by_field_name("name")?);
    let body = class.child_by_field_name("body")?;

    let mut cursor = body.walk();
    let init = body
        .named_children(&mut cursor)
        .filter_map(|member| match member.kind() {
            "function_definition" => Some(member),
            "decorated_definition" => member
                .child_by_field_name("definition")
                .filter(|d| d.kind() == "function_definition"),
            _ => None,
        })
        .find(|f| {
            f.child_by_field_name("name")
                .is_some_and(|n| text(code, n) == "__init__")
        })?;

    let shape = ParamShape::from_parameters(init.child_by_field_name("parameters")?, code);
    let signature = Signature::new(class_name, shape.min_args(), shape.max_args());
    Some(Definition::new(signature, Category::ClassConstructor))
}

/// Category from the first bare-name marker decorator, if any.
fn decorator_category(func: Node<'_>, code: &str) -> Category {
    let Some(parent) = func.parent().filter(|p| p.kind() == "decorated_definition") else {
        return Category::Plain;
    };
    let mut cursor = parent.walk();
    let marker = parent
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .filter_map(|d| d.named_child(0))
        .filter(|expr| expr.kind() == "identifier")
        .find_map(|expr| Category::from_decorator(text(code, expr)));
    marker.unwrap_or(Category::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse::PythonParser;
    use crate::languages::python::walk::walk_named;
    use std::path::Path;

    /// Every function definition in `src`, in source order.
    fn defs(src: &str) -> Vec<Definition> {
        let mut p = PythonParser::new().unwrap();
        let f = p.parse_source(Path::new("t.py"), src.into()).unwrap();
        let mut out = Vec::new();
        walk_named(f.tree.root_node(), |_| false, |n| {
            if n.kind() == "function_definition" {
                out.push(function_definition(n, &f.code).unwrap());
            }
        });
        out
    }

    fn sig(d: &Definition) -> (&str, usize, MaxArgs) {
        (d.signature.name.as_str(), d.signature.min_args, d.signature.max_args)
    }

    #[test]
    fn plain_parameters_and_defaults() {
        let d = defs("def f(a, b, c=1, d: int = 2):\n    pass\n");
        assert_eq!(sig(&d[0]), ("f", 2, MaxArgs::Bounded(4)));
        assert_eq!(d[0].category, Category::Plain);
    }

    #[test]
    fn receiver_is_not_counted() {
        let d = defs("class A:\n    def m(self, x, y=0):\n        pass\n    def n(cls):\n        pass\n");
        assert_eq!(sig(&d[0]), ("m", 1, MaxArgs::Bounded(2)));
        assert_eq!(sig(&d[1]), ("n", 0, MaxArgs::Bounded(0)));
    }

    #[test]
    fn typed_receiver_is_recognised() {
        let d = defs("def m(self: 'A', x: int):\n    pass\n");
        assert_eq!(sig(&d[0]), ("m", 1, MaxArgs::Bounded(1)));
    }

    #[test]
    fn variadics_make_max_unbounded() {
        let d = defs(
            "def g(*args):\n    pass\n\
             def h(a, **kw):\n    pass\n\
             def k(a, *rest: int):\n    pass\n",
        );
        assert_eq!(sig(&d[0]), ("g", 0, MaxArgs::Unbounded));
        assert_eq!(sig(&d[1]), ("h", 1, MaxArgs::Unbounded));
        assert_eq!(sig(&d[2]), ("k", 1, MaxArgs::Unbounded));
    }

    #[test]
    fn keyword_only_parameters_are_not_positional() {
        let d = defs("def f(a, *, b, c=3):\n    pass\n");
        assert_eq!(sig(&d[0]), ("f", 1, MaxArgs::Bounded(1)));
    }

    #[test]
    fn positional_only_parameters_count() {
        let d = defs("def f(a, b, /, c=1):\n    pass\n");
        assert_eq!(sig(&d[0]), ("f", 2, MaxArgs::Bounded(3)));
    }

    #[test]
    fn zero_parameters_yield_zero_range() {
        let d = defs("def ping():\n    pass\n");
        assert_eq!(sig(&d[0]), ("ping", 0, MaxArgs::Bounded(0)));
        assert!(d[0].signature.is_nullary());
    }

    #[test]
    fn async_def_is_a_definition() {
        let d = defs("async def fetch(url, timeout=5):\n    pass\n");
        assert_eq!(sig(&d[0]), ("fetch", 1, MaxArgs::Bounded(2)));
    }

    #[test]
    fn decorator_markers_set_category() {
        let d = defs(
            "class A:\n\
             \x20   @property\n    def size(self):\n        return 1\n\
             \x20   @classmethod\n    def make(cls, x):\n        pass\n\
             \x20   @staticmethod\n    def util(x, y):\n        pass\n\
             \x20   @size.setter\n    def size(self, v):\n        pass\n\
             \x20   @functools.cache\n    @staticmethod\n    def cached():\n        pass\n",
        );
        assert_eq!(d[0].category, Category::Property);
        assert_eq!(d[1].category, Category::ClassMethod);
        assert_eq!(d[2].category, Category::StaticMethod);
        assert_eq!(sig(&d[2]), ("util", 2, MaxArgs::Bounded(2)));
        assert_eq!(d[3].category, Category::Plain);
        assert_eq!(d[4].category, Category::StaticMethod);
    }

    #[test]
    fn constructor_uses_first_init_only() {
        let src = "class C:\n\
                   \x20   def helper(self):\n        pass\n\
                   \x20   def __init__(self, a):\n        pass\n\
                   \x20   def __init__(self, a, b, c):\n        pass\n";
        let mut p = PythonParser::new().unwrap();
        let f = p.parse_source(Path::new("c.py"), src.into()).unwrap();
        let class = f.tree.root_node().named_child(0).unwrap();

        let ctor = class_constructor(class, &f.code).unwrap();
        assert_eq!(ctor.signature, Signature::new("C", 1, MaxArgs::Bounded(1)));
        assert_eq!(ctor.category, Category::ClassConstructor);
    }

    #[test]
    fn class_without_init_has_no_constructor() {
        let mut p = PythonParser::new().unwrap();
        let f = p
            .parse_source(Path::new("c.py"), "class D(Base):\n    x = 1\n".into())
            .unwrap();
        let class = f.tree.root_node().named_child(0).unwrap();
        assert!(class_constructor(class, &f.code).is_none());
    }
}
