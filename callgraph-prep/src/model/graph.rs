//! Call graph over [`Signature`] nodes.
//!
//! Nodes are added in phase 1 (isolated), edges in phase 2. A `(caller, callee)`
//! pair is stored at most once; the first rule that produced it is kept as the
//! edge label.

use crate::core::traits::EdgeSink;
use crate::model::signature::{Category, Definition, Signature};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

/// Node payload: the signature plus every category that contributed to it.
#[derive(Debug, Clone)]
pub struct CallNode {
    pub signature: Signature,
    pub categories: BTreeSet<Category>,
}

impl CallNode {
    /// Category used for rendering: highest precedence among contributors.
    pub fn display_category(&self) -> Category {
        self.categories
            .iter()
            .next_back()
            .copied()
            .unwrap_or(Category::Plain)
    }
}

/// Which resolution rule produced an edge.
///
/// Avoid renaming variants, they are part of exported artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallEdge {
    /// Call expression whose argument count fits the callee's range.
    Calls,
    /// Bare attribute access to a zero-arity callee.
    Accesses,
}

impl Display for CallEdge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CallEdge::Calls => "calls",
            CallEdge::Accesses => "accesses",
        })
    }
}

#[derive(Debug, Default)]
pub struct CallGraph {
    graph: DiGraph<CallNode, CallEdge>,
    by_sig: HashMap<Signature, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or merge into) the node for `def.signature`.
    pub fn add_definition(&mut self, def: &Definition) -> NodeIndex {
        if let Some(&idx) = self.by_sig.get(&def.signature) {
            self.graph[idx].categories.insert(def.category);
            return idx;
        }
        let idx = self.graph.add_node(CallNode {
            signature: def.signature.clone(),
            categories: BTreeSet::from([def.category]),
        });
        self.by_sig.insert(def.signature.clone(), idx);
        idx
    }

    /// Add `caller → callee`; both must already be nodes.
    ///
    /// Returns `true` if a new edge was created.
    pub fn add_edge(&mut self, caller: &Signature, callee: &Signature, kind: CallEdge) -> bool {
        let (Some(&a), Some(&b)) = (self.by_sig.get(caller), self.by_sig.get(callee)) else {
            return false;
        };
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, kind);
        true
    }

    pub fn node(&self, sig: &Signature) -> Option<&CallNode> {
        self.by_sig.get(sig).map(|&i| &self.graph[i])
    }

    pub fn has_edge(&self, caller: &Signature, callee: &Signature) -> bool {
        match (self.by_sig.get(caller), self.by_sig.get(callee)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Direct callers of `sig`, sorted.
    pub fn callers_of(&self, sig: &Signature) -> Vec<&Signature> {
        self.neighbors(sig, Direction::Incoming)
    }

    /// Direct callees of `sig`, sorted.
    pub fn callees_of(&self, sig: &Signature) -> Vec<&Signature> {
        self.neighbors(sig, Direction::Outgoing)
    }

    fn neighbors(&self, sig: &Signature, dir: Direction) -> Vec<&Signature> {
        let Some(&idx) = self.by_sig.get(sig) else {
            return Vec::new();
        };
        let mut out: Vec<&Signature> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| &self.graph[n].signature)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.graph.node_indices().map(|i| &self.graph[i])
    }

    /// Edges in insertion order as `(caller, callee, kind)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Signature, &Signature, CallEdge)> {
        self.graph.edge_indices().filter_map(|e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((&self.graph[a].signature, &self.graph[b].signature, self.graph[e]))
        })
    }

    /// Distinct `(caller, callee)` pairs, sorted. Convenient for comparing runs.
    pub fn edge_pairs(&self) -> BTreeSet<(Signature, Signature)> {
        self.edges()
            .map(|(a, b, _)| (a.clone(), b.clone()))
            .collect()
    }

    /// Underlying petgraph structure for exporters.
    pub fn inner(&self) -> &DiGraph<CallNode, CallEdge> {
        &self.graph
    }
}

impl EdgeSink for CallGraph {
    fn on_edge(&mut self, caller: &Signature, callee: &Signature, kind: CallEdge) {
        self.add_edge(caller, callee, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::signature::MaxArgs;

    fn def(name: &str, min: usize, max: usize, cat: Category) -> Definition {
        Definition::new(Signature::new(name, min, MaxArgs::Bounded(max)), cat)
    }

    #[test]
    fn same_identity_collapses_into_one_node() {
        let mut g = CallGraph::new();
        let a = g.add_definition(&def("size", 0, 0, Category::Plain));
        let b = g.add_definition(&def("size", 0, 0, Category::Property));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);

        let node = g.node(&Signature::new("size", 0, MaxArgs::Bounded(0))).unwrap();
        assert_eq!(node.display_category(), Category::Property);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut g = CallGraph::new();
        let f = def("f", 0, 0, Category::Plain);
        let h = def("h", 1, 1, Category::Plain);
        g.add_definition(&f);
        g.add_definition(&h);

        assert!(g.add_edge(&f.signature, &h.signature, CallEdge::Calls));
        assert!(!g.add_edge(&f.signature, &h.signature, CallEdge::Accesses));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.callees_of(&f.signature), vec![&h.signature]);
        assert_eq!(g.callers_of(&h.signature), vec![&f.signature]);
    }

    #[test]
    fn edge_to_unknown_node_is_ignored() {
        let mut g = CallGraph::new();
        let f = def("f", 0, 0, Category::Plain);
        g.add_definition(&f);
        let ghost = Signature::new("ghost", 0, MaxArgs::Bounded(0));
        assert!(!g.add_edge(&f.signature, &ghost, CallEdge::Calls));
        assert_eq!(g.edge_count(), 0);
    }
}
