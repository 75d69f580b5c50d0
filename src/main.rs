use anyhow::{Context, Result, bail};
use callgraph_prep::{build_and_save, config};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build an approximate Python call graph and write it to disk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory to scan (repeatable).
    #[arg(short, long = "root", env = "FUNC_DEPS_ROOTS", value_delimiter = ',')]
    roots: Vec<PathBuf>,

    /// Output directory for the definition table and graph artifacts.
    #[arg(short, long, env = "FUNC_DEPS_OUTPUT", default_value = "func_deps_out")]
    output: PathBuf,

    /// Also write one neighborhood DOT file per signature.
    #[arg(long)]
    per_signature_dot: bool,
}

fn main() -> Result<()> {
    // Optional .env; missing file is fine.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,callgraph_prep=info"))
        .context("invalid log filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    if cli.roots.is_empty() {
        bail!("provide at least one --root <DIR> (or FUNC_DEPS_ROOTS)");
    }

    let mut cfg = config::load_from_env_or_default()?;
    if cli.per_signature_dot {
        cfg.export.per_signature_dot = true;
    }

    match build_and_save(&cli.roots, &cli.output, &cfg) {
        Ok(persisted) => {
            info!(
                nodes = persisted.summary.counts.graph_nodes,
                edges = persisted.summary.counts.graph_edges,
                "Run completed -> {}",
                persisted.out_dir
            );
            Ok(())
        }
        Err(err) => {
            error!("Run aborted: {err}");
            Err(err.into())
        }
    }
}
