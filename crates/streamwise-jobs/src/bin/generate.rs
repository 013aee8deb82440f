//! `streamwise-generate`: wipe the star schema and seed it with synthetic
//! streaming usage.
//!
//! Reads `streamwise.toml` (or the path given with `--config`) if present,
//! then `STREAMWISE_*` environment variables. With no file and no variables
//! it seeds `./streamwise.db` with the default dataset shape.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Local;
use clap::Parser;
use streamwise_jobs::{AppConfig, generate, init_tracing, open_store};

#[derive(Parser)]
#[command(author, version, about = "Seed the StreamWise schema with synthetic usage data")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "streamwise.toml")]
  config: PathBuf,

  /// Fixed RNG seed, overriding `generator.seed`.
  #[arg(long)]
  seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let mut cfg = AppConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(seed) = cli.seed {
    cfg.generator.seed = Some(seed);
  }

  let store = open_store(&cfg.database)
    .await
    .with_context(|| format!("failed to open database at {:?}", cfg.database.path))?;

  generate::run(&store, &cfg.generator, Local::now().naive_local())
    .await
    .context("data generation failed")?;

  Ok(())
}
