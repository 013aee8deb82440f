//! Tunable generator parameters and revenue rates.
//!
//! Defaults reproduce the reference dataset shape: 100 users, 2000
//! engagements over the last 30 days, 2–120 minute sessions, 30 %
//! interruptions and a long-tailed buffering distribution.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_USER_COUNT: usize = 100;
pub const DEFAULT_ENGAGEMENT_COUNT: usize = 2000;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
pub const DEFAULT_WATCH_TIME_MIN: u32 = 2;
pub const DEFAULT_WATCH_TIME_MAX: u32 = 120;
pub const DEFAULT_INTERRUPTION_PROBABILITY: f64 = 0.3;

/// `(buffering events, relative weight)` pairs.
pub const DEFAULT_BUFFERING_BUCKETS: [(u32, u32); 4] = [(0, 80), (1, 15), (2, 4), (5, 1)];

/// Estimated ad revenue per watched minute for `Free` users.
pub const FREE_REVENUE_PER_MINUTE: f64 = 0.05;
/// Estimated subscription revenue per watched minute for paying users.
pub const PAID_REVENUE_PER_MINUTE: f64 = 0.01;

/// One entry of the buffering-events distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferingBucket {
  pub events: u32,
  pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
  pub user_count:               usize,
  pub engagement_count:         usize,
  /// Sessions start within this many days before "now".
  pub lookback_days:            u32,
  pub watch_time_min:           u32,
  pub watch_time_max:           u32,
  pub interruption_probability: f64,
  pub buffering_buckets:        Vec<BufferingBucket>,
  /// Fixed RNG seed for reproducible datasets; entropy when `None`.
  pub seed:                     Option<u64>,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      user_count:               DEFAULT_USER_COUNT,
      engagement_count:         DEFAULT_ENGAGEMENT_COUNT,
      lookback_days:            DEFAULT_LOOKBACK_DAYS,
      watch_time_min:           DEFAULT_WATCH_TIME_MIN,
      watch_time_max:           DEFAULT_WATCH_TIME_MAX,
      interruption_probability: DEFAULT_INTERRUPTION_PROBABILITY,
      buffering_buckets:        DEFAULT_BUFFERING_BUCKETS
        .iter()
        .map(|&(events, weight)| BufferingBucket { events, weight })
        .collect(),
      seed:                     None,
    }
  }
}

impl GeneratorConfig {
  pub fn validate(&self) -> Result<()> {
    let invalid = |msg: String| Err(Error::InvalidConfig(msg));

    if self.user_count == 0 {
      return invalid("user_count must be at least 1".into());
    }
    if self.engagement_count == 0 {
      return invalid("engagement_count must be at least 1".into());
    }
    if self.lookback_days == 0 {
      return invalid("lookback_days must be at least 1".into());
    }
    if self.watch_time_min == 0 || self.watch_time_min > self.watch_time_max {
      return invalid(format!(
        "watch time range {}..={} is empty or starts at zero",
        self.watch_time_min, self.watch_time_max
      ));
    }
    if !(0.0..=1.0).contains(&self.interruption_probability) {
      return invalid(format!(
        "interruption_probability {} is outside [0, 1]",
        self.interruption_probability
      ));
    }
    // Sampling sums the weights as u32.
    let total_weight: u64 = self.buffering_buckets.iter().map(|b| u64::from(b.weight)).sum();
    if total_weight == 0 {
      return invalid("buffering_buckets needs at least one positive weight".into());
    }
    if total_weight > u64::from(u32::MAX) {
      return invalid(format!("buffering_buckets total weight {total_weight} exceeds {}", u32::MAX));
    }
    Ok(())
  }
}

/// Per-minute revenue estimates used by the prime-time view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueRates {
  pub free_per_minute: f64,
  pub paid_per_minute: f64,
}

impl Default for RevenueRates {
  fn default() -> Self {
    Self {
      free_per_minute: FREE_REVENUE_PER_MINUTE,
      paid_per_minute: PAID_REVENUE_PER_MINUTE,
    }
  }
}

impl RevenueRates {
  pub fn validate(&self) -> Result<()> {
    for (name, rate) in [
      ("free_per_minute", self.free_per_minute),
      ("paid_per_minute", self.paid_per_minute),
    ] {
      if !rate.is_finite() || rate < 0.0 {
        return Err(Error::InvalidRevenueRates(format!("{name} = {rate}")));
      }
    }
    Ok(())
  }
}
