//! Definition index: name → overload set.
//!
//! Populated during phase 1 only. Lookups return the full candidate set for a
//! name; callers must treat it as an over-approximation, never as a resolved
//! target.

use crate::model::signature::{Category, Definition, Signature};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from name to every distinct [`Signature`] sharing it.
#[derive(Debug, Default, Clone)]
pub struct DefinitionIndex {
    by_name: BTreeMap<String, BTreeMap<Signature, BTreeSet<Category>>>,
}

/// Row of the persisted definition table.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionRow<'a> {
    #[serde(flatten)]
    pub signature: &'a Signature,
    pub categories: &'a BTreeSet<Category>,
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition. Returns `true` if its signature was not indexed yet.
    pub fn insert(&mut self, def: &Definition) -> bool {
        let overloads = self.by_name.entry(def.signature.name.clone()).or_default();
        let fresh = !overloads.contains_key(&def.signature);
        overloads
            .entry(def.signature.clone())
            .or_default()
            .insert(def.category);
        fresh
    }

    /// All signatures named `name`, in `(min_args, max_args)` order.
    pub fn candidates<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Signature> + 'a {
        self.by_name
            .get(name)
            .into_iter()
            .flat_map(|overloads| overloads.keys())
    }

    /// Number of distinct names.
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// Number of distinct signatures across all names.
    pub fn signature_count(&self) -> usize {
        self.by_name.values().map(BTreeMap::len).sum()
    }

    /// Table view used by the exporter: name → rows, both sorted.
    pub fn table(&self) -> BTreeMap<&str, Vec<DefinitionRow<'_>>> {
        self.by_name
            .iter()
            .map(|(name, overloads)| {
                let rows = overloads
                    .iter()
                    .map(|(signature, categories)| DefinitionRow {
                        signature,
                        categories,
                    })
                    .collect();
                (name.as_str(), rows)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::signature::MaxArgs;

    fn def(name: &str, min: usize, max: MaxArgs, cat: Category) -> Definition {
        Definition::new(Signature::new(name, min, max), cat)
    }

    #[test]
    fn overloads_with_different_arity_stay_distinct() {
        let mut idx = DefinitionIndex::new();
        assert!(idx.insert(&def("run", 0, MaxArgs::Bounded(0), Category::Plain)));
        assert!(idx.insert(&def("run", 1, MaxArgs::Bounded(2), Category::Plain)));
        assert!(!idx.insert(&def("run", 1, MaxArgs::Bounded(2), Category::ClassMethod)));

        assert_eq!(idx.name_count(), 1);
        assert_eq!(idx.signature_count(), 2);
        assert_eq!(idx.candidates("run").count(), 2);
        assert_eq!(idx.candidates("missing").count(), 0);
    }

    #[test]
    fn table_keeps_every_category_seen() {
        let mut idx = DefinitionIndex::new();
        idx.insert(&def("x", 0, MaxArgs::Bounded(0), Category::Property));
        idx.insert(&def("x", 0, MaxArgs::Bounded(0), Category::Plain));

        let table = idx.table();
        let rows = &table["x"];
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].categories.len(), 2);
    }
}
