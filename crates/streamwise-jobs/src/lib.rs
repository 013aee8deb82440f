//! The StreamWise batch jobs.
//!
//! - [`generate::run`] wipes the star schema and seeds it with synthetic
//!   streaming usage.
//! - [`deploy::run`] replaces the reporting views and exports them to CSV
//!   for BI tooling.
//!
//! The generator must have run at least once before the deployer. Running
//! both at the same time against one database is not supported.

pub mod config;
pub mod deploy;
pub mod error;
pub mod export;
pub mod generate;

pub use crate::config::AppConfig;
pub use error::{Error, Result};

use streamwise_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the stdout fmt subscriber; `RUST_LOG` overrides the INFO default.
pub fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();
}

/// Open the configured database, installing the schema if requested.
pub async fn open_store(cfg: &crate::config::DatabaseConfig) -> Result<SqliteStore> {
  let store = SqliteStore::open(&cfg.path).await.map_err(Error::store)?;
  if cfg.init_schema {
    store.init_schema().await.map_err(Error::store)?;
  }
  Ok(store)
}
