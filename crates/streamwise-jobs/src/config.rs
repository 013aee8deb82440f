//! Layered job configuration.
//!
//! Sources, later ones winning: built-in defaults, an optional TOML file,
//! then `STREAMWISE_*` environment variables using `__` between nested keys
//! (e.g. `STREAMWISE_DATABASE__PATH=/srv/streamwise.db`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use streamwise_core::config::{GeneratorConfig, RevenueRates};

use crate::Result;

pub const ENV_PREFIX: &str = "STREAMWISE";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub database:  DatabaseConfig,
  pub generator: GeneratorConfig,
  pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
  pub path:        PathBuf,
  /// Install the tables on open. Disable when the schema is managed
  /// elsewhere.
  pub init_schema: bool,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      path:        PathBuf::from("streamwise.db"),
      init_schema: true,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
  /// Directory receiving the CSV exports; created when missing.
  pub output_dir: PathBuf,
  pub revenue:    RevenueRates,
}

impl Default for AnalyticsConfig {
  fn default() -> Self {
    Self {
      output_dir: PathBuf::from("bi_exports"),
      revenue:    RevenueRates::default(),
    }
  }
}

impl AppConfig {
  /// Load from `path` (which need not exist) and the environment.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> { Self::load_with_env(path, environment()) }

  pub(crate) fn load_with_env(
    path: impl AsRef<Path>,
    env: ::config::Environment,
  ) -> Result<Self> {
    let settings = ::config::Config::builder()
      .add_source(::config::File::from(path.as_ref()).required(false))
      .add_source(env)
      .build()?;

    let mut cfg: Self = settings.try_deserialize()?;
    cfg.database.path = expand_tilde(&cfg.database.path);
    cfg.analytics.output_dir = expand_tilde(&cfg.analytics.output_dir);
    Ok(cfg)
  }
}

/// `STREAMWISE_` followed by `__`-separated keys. Without the explicit
/// prefix separator config falls back to `__` there too.
pub(crate) fn environment() -> ::config::Environment {
  ::config::Environment::with_prefix(ENV_PREFIX)
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
