//! Generated users, engagements, and the dataset bundle handed to a store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  attributes::{AcquisitionSource, AgeGroup, Gender, Tier},
  catalog::{Device, MediaContent},
};

/// Country code assigned to every generated user.
pub const DEFAULT_COUNTRY: &str = "CZ";

/// A subscriber (row of `dim_UserBase`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub age_group:          AgeGroup,
  pub gender:             Gender,
  pub tier:               Tier,
  pub country:            String,
  pub acquisition_source: AcquisitionSource,
}

/// One viewing session (row of `fact_Engagement`).
///
/// Dimension references are positions in the owning [`Dataset`]'s vectors,
/// not database keys. The store maps them onto the keys it actually assigned
/// when inserting the dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
  pub user:               usize,
  pub content:            usize,
  pub device:             usize,
  pub stream_start:       NaiveDateTime,
  pub watch_time_minutes: u32,
  pub is_interrupted:     bool,
  pub buffering_events:   u32,
}

/// Everything one generator run writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
  pub devices:     Vec<Device>,
  pub content:     Vec<MediaContent>,
  pub users:       Vec<User>,
  pub engagements: Vec<Engagement>,
}

impl Dataset {
  /// Check that every engagement refers to an existing dimension row.
  pub fn validate(&self) -> Result<()> {
    for (i, e) in self.engagements.iter().enumerate() {
      check_ref(i, "user", e.user, self.users.len())?;
      check_ref(i, "content", e.content, self.content.len())?;
      check_ref(i, "device", e.device, self.devices.len())?;
    }
    Ok(())
  }
}

fn check_ref(engagement: usize, dimension: &'static str, index: usize, len: usize) -> Result<()> {
  if index < len {
    Ok(())
  } else {
    Err(Error::DanglingReference { engagement, dimension, index, len })
  }
}
