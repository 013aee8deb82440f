//! Synthetic dataset generation.
//!
//! Every field is an independent uniform or weighted draw. The generator is
//! pure: the caller supplies the clock reading and the random source, so a
//! seeded RNG reproduces the same dataset.

use chrono::{NaiveDateTime, TimeDelta};
use rand::{
  Rng,
  distributions::{Distribution, WeightedIndex},
};
use strum::VariantArray;

use crate::{
  Error, Result,
  attributes::{AcquisitionSource, AgeGroup, Gender, Tier},
  catalog::{content_catalog, device_catalog},
  config::GeneratorConfig,
  dataset::{DEFAULT_COUNTRY, Dataset, Engagement, User},
};

/// Build a complete dataset: both static catalogs plus random users and
/// engagements.
///
/// Engagement start times fall in `(now - lookback_days, now]`: a whole
/// number of days in `0..lookback_days` and of hours in `0..=23` are
/// subtracted from `now`.
pub fn generate_dataset<R: Rng + ?Sized>(
  config: &GeneratorConfig,
  now: NaiveDateTime,
  rng: &mut R,
) -> Result<Dataset> {
  config.validate()?;
  // The oldest possible start must be representable.
  stream_start(now, config.lookback_days, 23)?;

  let devices = device_catalog();
  let content = content_catalog();
  let users: Vec<User> = (0..config.user_count).map(|_| random_user(rng)).collect();

  let buffering = WeightedIndex::new(config.buffering_buckets.iter().map(|b| b.weight))
    .map_err(|e| Error::InvalidConfig(format!("buffering_buckets: {e}")))?;

  let mut engagements = Vec::with_capacity(config.engagement_count);
  for _ in 0..config.engagement_count {
    let content_idx = rng.gen_range(0..content.len());
    let watch_time_minutes = rng.gen_range(config.watch_time_min..=config.watch_time_max);
    let is_interrupted = rng.gen_bool(config.interruption_probability);
    let buffering_events = config.buffering_buckets[buffering.sample(rng)].events;
    let user_idx = rng.gen_range(0..users.len());
    let device_idx = rng.gen_range(0..devices.len());
    let days_ago = rng.gen_range(0..config.lookback_days);
    let hours_ago = rng.gen_range(0..=23u32);

    engagements.push(Engagement {
      user: user_idx,
      content: content_idx,
      device: device_idx,
      stream_start: stream_start(now, days_ago, hours_ago)?,
      watch_time_minutes,
      is_interrupted,
      buffering_events,
    });
  }

  Ok(Dataset { devices, content, users, engagements })
}

fn stream_start(now: NaiveDateTime, days_ago: u32, hours_ago: u32) -> Result<NaiveDateTime> {
  let offset = TimeDelta::days(i64::from(days_ago)) + TimeDelta::hours(i64::from(hours_ago));
  now.checked_sub_signed(offset).ok_or_else(|| {
    Error::InvalidConfig(format!("{days_ago} days {hours_ago} hours before {now} is out of range"))
  })
}

fn random_user<R: Rng + ?Sized>(rng: &mut R) -> User {
  User {
    age_group:          pick(rng, AgeGroup::VARIANTS),
    gender:             pick(rng, Gender::VARIANTS),
    tier:               pick(rng, Tier::VARIANTS),
    country:            DEFAULT_COUNTRY.to_owned(),
    acquisition_source: pick(rng, AcquisitionSource::VARIANTS),
  }
}

/// Uniform choice from a non-empty constant slice.
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
  items[rng.gen_range(0..items.len())]
}
