//! GraphML exporter for Gephi, yEd and similar tools.
//!
//! Node attributes mirror the Graphviz styling downstream renderers expect
//! (`shape=box`, `style=filled`, `fillcolor` by category).

use crate::model::graph::CallGraph;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

/// Write GraphML to `path`.
pub fn write_graphml(path: &Path, graph: &CallGraph) -> Result<()> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    let g = graph.inner();

    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns
     http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#
    )?;

    // Node keys
    let node_keys = [
        ("d0", "name", "string"),
        ("d1", "min_args", "int"),
        ("d2", "max_args", "string"),
        ("d3", "category", "string"),
        ("d4", "fillcolor", "string"),
        ("d5", "shape", "string"),
        ("d6", "style", "string"),
    ];
    for (id, name, ty) in node_keys {
        writeln!(
            w,
            r#"<key id="{id}" for="node" attr.name="{name}" attr.type="{ty}"/>"#
        )?;
    }
    // Edge key
    writeln!(
        w,
        r#"<key id="e0" for="edge" attr.name="label" attr.type="string"/>"#
    )?;

    writeln!(w, r#"<graph edgedefault="directed">"#)?;

    for nidx in g.node_indices() {
        let n = &g[nidx];
        let cat = n.display_category();
        writeln!(w, r#"<node id="{}">"#, xml_escape(&n.signature.key()))?;
        writeln!(w, r#"  <data key="d0">{}</data>"#, xml_escape(&n.signature.name))?;
        writeln!(w, r#"  <data key="d1">{}</data>"#, n.signature.min_args)?;
        writeln!(w, r#"  <data key="d2">{}</data>"#, n.signature.max_args)?;
        writeln!(w, r#"  <data key="d3">{}</data>"#, cat)?;
        writeln!(w, r#"  <data key="d4">{}</data>"#, cat.fill_color())?;
        writeln!(w, r#"  <data key="d5">box</data>"#)?;
        writeln!(w, r#"  <data key="d6">filled</data>"#)?;
        writeln!(w, r#"</node>"#)?;
    }

    for (i, eidx) in g.edge_indices().enumerate() {
        let Some((src, dst)) = g.edge_endpoints(eidx) else {
            continue;
        };
        writeln!(
            w,
            r#"<edge id="e{}" source="{}" target="{}">"#,
            i,
            xml_escape(&g[src].signature.key()),
            xml_escape(&g[dst].signature.key())
        )?;
        writeln!(w, r#"  <data key="e0">{}</data>"#, g[eidx])?;
        writeln!(w, r#"</edge>"#)?;
    }

    writeln!(w, r#"</graph>"#)?;
    writeln!(w, r#"</graphml>"#)?;
    w.flush()?;
    info!("graphml: wrote -> {}", path.display());
    Ok(())
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
