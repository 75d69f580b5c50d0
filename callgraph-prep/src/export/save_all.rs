//! Persist all artifacts into the given output directory.
//!
//! Layout:
//!   out_dir/
//!     definitions.json
//!     graph_nodes.jsonl
//!     graph_edges.jsonl
//!     call_graph.graphml
//!     call_graph.dot
//!     signatures/<name>_<min>_<max>.dot   (optional)
//!     summary.json

use crate::{
    config::model::ExportConfig,
    core::summary::PipelineSummary,
    export::{definitions, dot, graphml, jsonl},
    model::{graph::CallGraph, index::DefinitionIndex},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

/// File paths of the persisted artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct PersistFiles {
    pub definitions_json: String,
    pub graph_nodes_jsonl: String,
    pub graph_edges_jsonl: String,
    pub graph_graphml: String,
    pub graph_dot: String,
    pub signatures_dir: Option<String>,
    pub summary_json: String,
}

/// Returned to the caller and also written to `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct PersistSummary {
    pub out_dir: String,
    pub files: PersistFiles,
    pub summary: PipelineSummary,
}

/// Write all artifacts to `out_dir` (created if missing).
pub fn persist_all(
    out_dir: &Path,
    index: &DefinitionIndex,
    graph: &CallGraph,
    summary: PipelineSummary,
    cfg: &ExportConfig,
) -> Result<PersistSummary> {
    fs::create_dir_all(out_dir).with_context(|| format!("create_dir_all {}", out_dir.display()))?;
    info!("persist: dir prepared -> {}", out_dir.display());

    let p_defs = out_dir.join("definitions.json");
    let p_gnodes = out_dir.join("graph_nodes.jsonl");
    let p_gedges = out_dir.join("graph_edges.jsonl");
    let p_graphml = out_dir.join("call_graph.graphml");
    let p_dot = out_dir.join("call_graph.dot");
    let p_sigs = out_dir.join("signatures");
    let p_summary = out_dir.join("summary.json");

    definitions::write_definitions_json(&p_defs, index)?;
    jsonl::write_graph_jsonl(&p_gnodes, &p_gedges, graph)?;
    graphml::write_graphml(&p_graphml, graph)?;
    dot::write_dot(&p_dot, graph)?;
    let signatures_dir = if cfg.per_signature_dot {
        dot::write_neighborhood_dots(&p_sigs, graph)?;
        Some(p_sigs.to_string_lossy().into_owned())
    } else {
        None
    };

    let persist = PersistSummary {
        out_dir: out_dir.to_string_lossy().into_owned(),
        files: PersistFiles {
            definitions_json: p_defs.to_string_lossy().into_owned(),
            graph_nodes_jsonl: p_gnodes.to_string_lossy().into_owned(),
            graph_edges_jsonl: p_gedges.to_string_lossy().into_owned(),
            graph_graphml: p_graphml.to_string_lossy().into_owned(),
            graph_dot: p_dot.to_string_lossy().into_owned(),
            signatures_dir,
            summary_json: p_summary.to_string_lossy().into_owned(),
        },
        summary,
    };

    // Write summary.json (pretty)
    {
        let f = fs::File::create(&p_summary)
            .with_context(|| format!("create {}", p_summary.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &persist)?;
        w.flush()?;
    }

    info!("persist: all artifacts written");
    Ok(persist)
}
