//! `streamwise-deploy`: replace the reporting views and export them to CSV.
//!
//! Expects `streamwise-generate` to have populated the database first.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use streamwise_jobs::{AppConfig, deploy, init_tracing, open_store};

#[derive(Parser)]
#[command(author, version, about = "Deploy StreamWise reporting views and export them to CSV")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "streamwise.toml")]
  config: PathBuf,

  /// Export directory, overriding `analytics.output_dir`.
  #[arg(short, long)]
  output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let mut cfg = AppConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(dir) = cli.output_dir {
    cfg.analytics.output_dir = dir;
  }

  let store = open_store(&cfg.database)
    .await
    .with_context(|| format!("failed to open database at {:?}", cfg.database.path))?;

  deploy::run(&store, &cfg.analytics)
    .await
    .context("analytics deployment failed")?;

  Ok(())
}
