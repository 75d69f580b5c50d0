//! Pipeline summary: counters and timings collected during one run.
//!
//! Serialized into `summary.json` by the persistence layer. Keep field names
//! stable and lowercase with underscores so they are easy to query downstream.

use crate::core::fs_scan::ScanResult;
use crate::model::{graph::CallGraph, index::DefinitionIndex};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// ISO 8601 UTC timestamp when the summary was produced.
    pub generated_at: String,
    pub counts: Counts,
    pub timings_ms: TimingsMs,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Counts {
    /// Files parsed in each phase (after filters).
    pub files_scanned: usize,
    /// Total size of the scanned files.
    pub bytes_scanned: u64,
    /// Source files dropped by a test substring or an ignore glob.
    pub files_skipped_excluded: usize,
    pub files_skipped_too_big: usize,

    /// Definitions seen in phase 1, before identity collapsing.
    pub definitions: usize,
    pub distinct_names: usize,
    pub distinct_signatures: usize,

    pub graph_nodes: usize,
    pub graph_edges: usize,
    /// Nodes per display category.
    pub nodes_by_category: BTreeMap<String, usize>,
    /// Edges per label ("calls", "accesses").
    pub edges_by_label: BTreeMap<String, usize>,
}

/// Millisecond timings for major pipeline phases. Unmeasured phases stay zero.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimingsMs {
    pub scan: u128,
    pub collect: u128,
    pub resolve: u128,
    /// scan + collect + resolve; persisting happens after the summary is taken.
    pub total: u128,
}

impl PipelineSummary {
    /// Build a summary from current counts only (timings default to zero).
    pub fn from_counts(
        scan: &ScanResult,
        definitions: usize,
        index: &DefinitionIndex,
        graph: &CallGraph,
    ) -> Self {
        let mut nodes_by_category = BTreeMap::new();
        for n in graph.nodes() {
            *nodes_by_category
                .entry(n.display_category().to_string())
                .or_insert(0) += 1;
        }
        let mut edges_by_label = BTreeMap::new();
        for (_, _, kind) in graph.edges() {
            *edges_by_label.entry(kind.to_string()).or_insert(0) += 1;
        }

        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            counts: Counts {
                files_scanned: scan.files.len(),
                bytes_scanned: scan.files.iter().map(|f| f.size).sum(),
                files_skipped_excluded: scan.skipped_excluded,
                files_skipped_too_big: scan.skipped_too_big,
                definitions,
                distinct_names: index.name_count(),
                distinct_signatures: index.signature_count(),
                graph_nodes: graph.node_count(),
                graph_edges: graph.edge_count(),
                nodes_by_category,
                edges_by_label,
            },
            timings_ms: TimingsMs::default(),
        }
    }
}
