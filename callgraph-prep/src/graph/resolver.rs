//! Phase 2: per-function call-site resolution.
//!
//! For every `def` in a file, the body is walked up to (not into) nested
//! function and class definitions. Each call is matched by name and observed
//! argument count against the complete [`DefinitionIndex`]; every compatible
//! candidate gets an edge. Bare attribute accesses additionally link to
//! zero-arity candidates of the same name.
//!
//! Lookups are never narrowed to a single target: name and arity are all the
//! resolver knows, so all matches are kept.

use crate::config::model::{ResolveConfig, UnpackedArgs};
use crate::core::{builtins::is_builtin, parse::ParsedFile, traits::EdgeSink};
use crate::languages::python::{
    signature::function_definition,
    walk::{is_scope_boundary, text, walk_named},
};
use crate::model::{graph::CallEdge, index::DefinitionIndex, signature::Signature};
use tracing::debug;
use tree_sitter::Node;

/// Argument count observed at one call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedArgs {
    /// Positional plus keyword arguments.
    pub explicit: usize,
    /// `*x` / `**x` present.
    pub unpacked: bool,
}

impl ObservedArgs {
    /// Count the arguments of a `call` node.
    pub fn of_call(call: Node<'_>) -> Self {
        let mut out = ObservedArgs {
            explicit: 0,
            unpacked: false,
        };
        let Some(args) = call.child_by_field_name("arguments") else {
            return out;
        };
        if args.kind() == "generator_expression" {
            // f(x for x in xs)
            out.explicit = 1;
            return out;
        }

        let mut cursor = args.walk();
        for a in args.named_children(&mut cursor) {
            match a.kind() {
                "list_splat" | "dictionary_splat" => out.unpacked = true,
                "comment" => {}
                _ => out.explicit += 1,
            }
        }
        out
    }

    fn fits(self, sig: &Signature, policy: UnpackedArgs) -> bool {
        match policy {
            UnpackedArgs::AtLeast if self.unpacked => sig.accepts_at_least(self.explicit),
            _ => sig.accepts(self.explicit),
        }
    }
}

/// Resolves call sites against a finished definition index.
pub struct Resolver<'a> {
    index: &'a DefinitionIndex,
    cfg: &'a ResolveConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a DefinitionIndex, cfg: &'a ResolveConfig) -> Self {
        Self { index, cfg }
    }

    /// Resolve every function of `file`. Returns the number of edges emitted.
    pub fn resolve_file(&self, file: &ParsedFile, sink: &mut dyn EdgeSink) -> usize {
        let code = file.code.as_str();
        let mut emitted = 0usize;

        walk_named(file.tree.root_node(), |_| false, |node| {
            if node.kind() == "function_definition" {
                emitted += self.resolve_function(node, code, sink);
            }
        });

        debug!("resolver: {} -> {} edges", file.path.display(), emitted);
        emitted
    }

    /// Resolve the body of one `function_definition` node.
    pub fn resolve_function(&self, func: Node<'_>, code: &str, sink: &mut dyn EdgeSink) -> usize {
        let (Some(caller), Some(body)) = (
            function_definition(func, code),
            func.child_by_field_name("body"),
        ) else {
            return 0;
        };
        let caller = caller.signature;
        let mut emitted = 0usize;

        walk_named(body, is_scope_boundary, |node| match node.kind() {
            "call" => emitted += self.on_call(&caller, node, code, sink),
            "attribute" if self.cfg.attribute_access && !is_callee(node) => {
                emitted += self.on_attribute(&caller, node, code, sink)
            }
            _ => {}
        });
        emitted
    }

    fn on_call(&self, caller: &Signature, call: Node<'_>, code: &str, sink: &mut dyn EdgeSink) -> usize {
        let Some(name) = called_name(call, code) else {
            return 0;
        };
        if is_builtin(name) {
            return 0;
        }
        let observed = ObservedArgs::of_call(call);
        let mut emitted = 0;
        for callee in self.index.candidates(name) {
            if observed.fits(callee, self.cfg.unpacked_args) {
                sink.on_edge(caller, callee, CallEdge::Calls);
                emitted += 1;
            }
        }
        emitted
    }

    fn on_attribute(&self, caller: &Signature, attr: Node<'_>, code: &str, sink: &mut dyn EdgeSink) -> usize {
        let Some(name) = attr.child_by_field_name("attribute").map(|n| text(code, n)) else {
            return 0;
        };
        let mut emitted = 0;
        for callee in self.index.candidates(name).filter(|s| s.is_nullary()) {
            sink.on_edge(caller, callee, CallEdge::Accesses);
            emitted += 1;
        }
        emitted
    }
}

/// Name targeted by a call: `f(...)` → `f`, `x.y.f(...)` → `f`. Other forms
/// (subscripts, calls of calls, lambdas) are unresolved.
fn called_name<'c>(call: Node<'_>, code: &'c str) -> Option<&'c str> {
    let func = call.child_by_field_name("function")?;
    match func.kind() {
        "identifier" => Some(text(code, func)),
        "attribute" => func
            .child_by_field_name("attribute")
            .map(|n| text(code, n)),
        _ => None,
    }
}

/// `true` if `attr` is the callee expression of its parent call.
fn is_callee(attr: Node<'_>) -> bool {
    attr.parent()
        .filter(|p| p.kind() == "call")
        .and_then(|p| p.child_by_field_name("function"))
        .is_some_and(|f| f.id() == attr.id())
}
