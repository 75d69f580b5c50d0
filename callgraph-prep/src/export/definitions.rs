//! Definition table writer (`definitions.json`).
//!
//! Layout: `{ "<name>": [ { "name", "min_args", "max_args", "categories" }, ... ] }`,
//! names and rows sorted so the file is stable across runs.

use crate::model::index::DefinitionIndex;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

pub fn write_definitions_json(path: &Path, index: &DefinitionIndex) -> Result<()> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &index.table())?;
    w.write_all(b"\n")?;
    w.flush()?;
    info!("definitions: wrote {} names -> {}", index.name_count(), path.display());
    Ok(())
}
