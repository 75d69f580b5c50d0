//! Two-phase driver.
//!
//! Phase 1 parses every scanned file and fills the [`DefinitionIndex`] and the
//! [`CallGraph`] nodes. Phase 2 starts only after phase 1 has seen the whole
//! tree, re-parses every file and resolves call sites against the finished
//! index. The first file that fails to parse aborts the run; nothing is
//! persisted in that case.

use crate::{
    config::model::GraphConfig,
    core::{
        fs_scan::{self, ScannedFile},
        parse::PythonParser,
        summary::PipelineSummary,
        traits::DefinitionSink,
    },
    errors::Result,
    export::save_all::{self, PersistSummary},
    graph::resolver::Resolver,
    languages::python,
    model::{graph::CallGraph, index::DefinitionIndex, signature::Definition},
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Result of a full analysis, before persistence.
#[derive(Debug)]
pub struct CallGraphBuild {
    pub index: DefinitionIndex,
    pub graph: CallGraph,
    pub summary: PipelineSummary,
}

/// Phase 1 sink: each definition lands in both registries.
struct Registry<'a> {
    index: &'a mut DefinitionIndex,
    graph: &'a mut CallGraph,
}

impl DefinitionSink for Registry<'_> {
    fn on_definition(&mut self, def: Definition) {
        self.index.insert(&def);
        self.graph.add_definition(&def);
    }
}

/// Scan `roots` and run both phases.
#[tracing::instrument(level = "info", skip_all, fields(roots = roots.len()))]
pub fn build_call_graph(roots: &[PathBuf], cfg: &GraphConfig) -> Result<CallGraphBuild> {
    cfg.validate()?;
    let t_total = Instant::now();

    let t_scan = Instant::now();
    let scan = fs_scan::scan_roots(roots, cfg)?;
    let scan_ms = t_scan.elapsed().as_millis();

    let mut parser = PythonParser::new()?;
    let mut index = DefinitionIndex::new();
    let mut graph = CallGraph::new();

    // Phase 1: definitions
    let t_collect = Instant::now();
    let definitions = collect_phase(&mut parser, &scan.files, &mut index, &mut graph)?;
    let collect_ms = t_collect.elapsed().as_millis();
    info!(
        definitions,
        names = index.name_count(),
        nodes = graph.node_count(),
        "Phase 1 complete"
    );

    // Phase 2: call sites
    let t_resolve = Instant::now();
    let edges = resolve_phase(&mut parser, &scan.files, &index, &mut graph, cfg)?;
    let resolve_ms = t_resolve.elapsed().as_millis();
    info!(
        emitted = edges,
        edges = graph.edge_count(),
        "Phase 2 complete"
    );

    let mut summary = PipelineSummary::from_counts(&scan, definitions, &index, &graph);
    summary.timings_ms.scan = scan_ms;
    summary.timings_ms.collect = collect_ms;
    summary.timings_ms.resolve = resolve_ms;
    summary.timings_ms.total = t_total.elapsed().as_millis();

    Ok(CallGraphBuild {
        index,
        graph,
        summary,
    })
}

/// Run both phases, then write every artifact into `out_dir`.
#[tracing::instrument(level = "info", skip_all, fields(out_dir = %out_dir.display()))]
pub fn build_and_save(
    roots: &[PathBuf],
    out_dir: &Path,
    cfg: &GraphConfig,
) -> Result<PersistSummary> {
    let build = build_call_graph(roots, cfg)?;
    let persisted = save_all::persist_all(
        out_dir,
        &build.index,
        &build.graph,
        build.summary,
        &cfg.export,
    )?;
    info!(out_dir = %out_dir.display(), "Artifacts saved");
    Ok(persisted)
}

fn collect_phase(
    parser: &mut PythonParser,
    files: &[ScannedFile],
    index: &mut DefinitionIndex,
    graph: &mut CallGraph,
) -> Result<usize> {
    let mut registry = Registry { index, graph };
    let mut total = 0usize;
    for file in files {
        info!("Scanning {}", file.path.display());
        let parsed = parser.parse_file(&file.path)?;
        total += python::collect_definitions(&parsed, &mut registry);
    }
    Ok(total)
}

fn resolve_phase(
    parser: &mut PythonParser,
    files: &[ScannedFile],
    index: &DefinitionIndex,
    graph: &mut CallGraph,
    cfg: &GraphConfig,
) -> Result<usize> {
    let resolver = Resolver::new(index, &cfg.resolve);
    let mut total = 0usize;
    for file in files {
        info!("Scanning {}", file.path.display());
        let parsed = parser.parse_file(&file.path)?;
        total += resolver.resolve_file(&parsed, graph);
    }
    Ok(total)
}
