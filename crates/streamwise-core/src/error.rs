//! Error types for `streamwise-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid generator config: {0}")]
  InvalidConfig(String),

  #[error("invalid revenue rates: {0}")]
  InvalidRevenueRates(String),

  /// An engagement points past the end of one of the dimension vectors.
  #[error("engagement {engagement} references {dimension} #{index}, but only {len} exist")]
  DanglingReference {
    engagement: usize,
    dimension:  &'static str,
    index:      usize,
    len:        usize,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
