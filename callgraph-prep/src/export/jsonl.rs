//! JSONL writers for the call graph (`graph_nodes.jsonl` + `graph_edges.jsonl`).
//!
//! Each writer outputs **one compact JSON object per line**. Node ids are
//! ordinal (0..N-1) within a run and shared between the two files.
//!
//! Nodes:
//! ```json
//! { "id": 0, "key": "C_1_1", "name": "C", "min_args": 1, "max_args": 1, "category": "class_constructor", "categories": ["class_constructor"], "fillcolor": "yellow" }
//! ```
//!
//! Edges:
//! ```json
//! { "src": 3, "dst": 0, "label": "calls" }
//! ```

use crate::model::graph::CallGraph;
use anyhow::{Context, Result};
use serde_json::json;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

pub fn write_graph_jsonl(nodes_path: &Path, edges_path: &Path, graph: &CallGraph) -> Result<()> {
    let g = graph.inner();

    // NodeIndex -> ordinal id
    let mut id_map = vec![usize::MAX; g.node_count()];
    for (i, nidx) in g.node_indices().enumerate() {
        id_map[nidx.index()] = i;
    }

    // --- nodes ---
    {
        let f =
            File::create(nodes_path).with_context(|| format!("create {}", nodes_path.display()))?;
        let mut w = BufWriter::new(f);
        for nidx in g.node_indices() {
            let n = &g[nidx];
            let cat = n.display_category();
            let rec = json!({
                "id": id_map[nidx.index()],
                "key": n.signature.key(),
                "name": n.signature.name,
                "min_args": n.signature.min_args,
                "max_args": n.signature.max_args,
                "category": cat,
                "categories": n.categories,
                "fillcolor": cat.fill_color(),
            });
            serde_json::to_writer(&mut w, &rec)?;
            w.write_all(b"\n")?;
        }
        w.flush()?;
    }

    // --- edges ---
    {
        let f =
            File::create(edges_path).with_context(|| format!("create {}", edges_path.display()))?;
        let mut w = BufWriter::new(f);
        for eidx in g.edge_indices() {
            let Some((src, dst)) = g.edge_endpoints(eidx) else {
                continue;
            };
            let rec = json!({
                "src": id_map[src.index()],
                "dst": id_map[dst.index()],
                "label": g[eidx],
            });
            serde_json::to_writer(&mut w, &rec)?;
            w.write_all(b"\n")?;
        }
        w.flush()?;
    }

    info!(
        "jsonl: wrote graph nodes -> {}, edges -> {}",
        nodes_path.display(),
        edges_path.display()
    );
    Ok(())
}
