//! Graphviz DOT exporter.
//!
//! `write_dot` renders the whole graph; `write_neighborhood_dots` writes one
//! `<name>_<min>_<max>.dot` per node containing the node, its direct callers
//! and its direct callees, which is what refactoring-impact views render.

use crate::model::{
    graph::{CallGraph, CallNode},
    signature::Signature,
};
use anyhow::{Context, Result};
use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

/// Write the whole call graph to `path`.
pub fn write_dot(path: &Path, graph: &CallGraph) -> Result<()> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);

    writeln!(w, "digraph call_graph {{")?;
    for n in graph.nodes() {
        write_node(&mut w, n)?;
    }
    for (a, b, kind) in graph.edges() {
        writeln!(
            w,
            "  {} -> {} [label=\"{}\"];",
            quote(&a.key()),
            quote(&b.key()),
            kind
        )?;
    }
    writeln!(w, "}}")?;
    w.flush()?;
    info!("dot: wrote -> {}", path.display());
    Ok(())
}

/// Write one neighborhood file per node into `dir`. Returns the file count.
pub fn write_neighborhood_dots(dir: &Path, graph: &CallGraph) -> Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("create_dir_all {}", dir.display()))?;
    let mut written = 0usize;
    for n in graph.nodes() {
        let path = dir.join(format!("{}.dot", file_stem(&n.signature)));
        write_neighborhood(&path, graph, &n.signature)?;
        written += 1;
    }
    info!("dot: wrote {} neighborhood files -> {}", written, dir.display());
    Ok(written)
}

fn write_neighborhood(path: &Path, graph: &CallGraph, center: &Signature) -> Result<()> {
    let callers = graph.callers_of(center);
    let callees = graph.callees_of(center);

    let mut members: BTreeSet<&Signature> = BTreeSet::new();
    members.insert(center);
    members.extend(callers.iter().copied());
    members.extend(callees.iter().copied());

    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    writeln!(w, "digraph {} {{", quote(&center.key()))?;
    for sig in members {
        if let Some(n) = graph.node(sig) {
            write_node(&mut w, n)?;
        }
    }
    for c in &callers {
        writeln!(w, "  {} -> {};", quote(&c.key()), quote(&center.key()))?;
    }
    for c in &callees {
        // self-loops already listed among callers
        if *c != center {
            writeln!(w, "  {} -> {};", quote(&center.key()), quote(&c.key()))?;
        }
    }
    writeln!(w, "}}")?;
    w.flush()?;
    Ok(())
}

fn write_node<W: Write>(w: &mut W, n: &CallNode) -> std::io::Result<()> {
    writeln!(
        w,
        "  {} [label={}, shape=box, style=filled, fillcolor={}];",
        quote(&n.signature.key()),
        quote(&n.signature.name),
        n.display_category().fill_color()
    )
}

/// DOT double-quoted identifier.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Signature key made safe for file names.
fn file_stem(sig: &Signature) -> String {
    sig.key()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '-' })
        .collect()
}
