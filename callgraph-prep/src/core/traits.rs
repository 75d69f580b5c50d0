//! Seams between extraction and the registries it feeds.
//!
//! Extractors only emit; the driver decides where definitions and edges land.

use crate::model::signature::{Definition, Signature};
use crate::model::graph::CallEdge;

/// Accepts definitions produced during phase 1.
pub trait DefinitionSink {
    /// Called once for every definition (and every constructor) found.
    fn on_definition(&mut self, def: Definition);
}

impl DefinitionSink for Vec<Definition> {
    fn on_definition(&mut self, def: Definition) {
        self.push(def);
    }
}

/// Accepts resolved `caller → callee` pairs produced during phase 2.
pub trait EdgeSink {
    fn on_edge(&mut self, caller: &Signature, callee: &Signature, kind: CallEdge);
}

impl EdgeSink for Vec<(Signature, Signature, CallEdge)> {
    fn on_edge(&mut self, caller: &Signature, callee: &Signature, kind: CallEdge) {
        self.push((caller.clone(), callee.clone(), kind));
    }
}
