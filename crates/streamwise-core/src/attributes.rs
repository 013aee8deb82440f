//! Enum-like attributes stored as plain strings in the dimension tables.
//!
//! The string form (`AsRef<str>` / `Display`) is exactly what lands in the
//! database, so the view definitions can match on it.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, VariantArray};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, VariantArray,
)]
pub enum AgeGroup {
  #[strum(serialize = "18-24")]
  #[serde(rename = "18-24")]
  From18To24,
  #[strum(serialize = "25-34")]
  #[serde(rename = "25-34")]
  From25To34,
  #[strum(serialize = "35-44")]
  #[serde(rename = "35-44")]
  From35To44,
  #[strum(serialize = "45-54")]
  #[serde(rename = "45-54")]
  From45To54,
  #[strum(serialize = "55+")]
  #[serde(rename = "55+")]
  Over55,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, VariantArray,
)]
pub enum Gender {
  #[strum(serialize = "M")]
  #[serde(rename = "M")]
  Male,
  #[strum(serialize = "F")]
  #[serde(rename = "F")]
  Female,
}

/// Subscription tier. Only `Free` users are monetised through ads.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, VariantArray,
)]
pub enum Tier {
  Free,
  Voyo,
  Premium,
}

impl Tier {
  pub fn is_free(self) -> bool { matches!(self, Self::Free) }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, VariantArray,
)]
pub enum AcquisitionSource {
  Social,
  Organic,
  #[strum(serialize = "TV Ad")]
  #[serde(rename = "TV Ad")]
  TvAd,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, VariantArray,
)]
pub enum ConnectionType {
  WiFi,
  #[strum(serialize = "5G")]
  #[serde(rename = "5G")]
  FiveG,
  Ethernet,
}
