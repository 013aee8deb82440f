//! The `AnalyticsStore` trait and supporting report types.
//!
//! The trait is implemented by storage backends (e.g.
//! `streamwise-store-sqlite`). The batch jobs depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  analytics::{AnalyticsView, ResultSet},
  config::RevenueRates,
  dataset::Dataset,
};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The five tables of the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableName {
  Devices,
  MediaContent,
  UserBase,
  Engagement,
  AdImpressions,
}

impl TableName {
  /// Facts first, then dimensions, so foreign keys never dangle mid-reset.
  pub const DELETE_ORDER: [Self; 5] = [
    Self::AdImpressions,
    Self::Engagement,
    Self::UserBase,
    Self::MediaContent,
    Self::Devices,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Devices => "dim_Devices",
      Self::MediaContent => "dim_MediaContent",
      Self::UserBase => "dim_UserBase",
      Self::Engagement => "fact_Engagement",
      Self::AdImpressions => "fact_AdImpressions",
    }
  }

  pub fn is_fact(self) -> bool { matches!(self, Self::Engagement | Self::AdImpressions) }
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Rows written by one [`AnalyticsStore::reset_and_seed`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
  pub devices:     usize,
  pub content:     usize,
  pub users:       usize,
  pub engagements: usize,
}

/// Post-seed health check of the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
  /// Row count per table, in [`TableName::DELETE_ORDER`].
  pub row_counts:           Vec<(TableName, u64)>,
  /// Engagements whose user, content or device key has no dimension row.
  pub orphaned_engagements: u64,
  pub earliest_stream:      Option<NaiveDateTime>,
  pub latest_stream:        Option<NaiveDateTime>,
}

impl IntegrityReport {
  pub fn row_count(&self, table: TableName) -> Option<u64> {
    self
      .row_counts
      .iter()
      .find(|(t, _)| *t == table)
      .map(|(_, n)| *n)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the relational database holding the star schema.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait AnalyticsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Generation ────────────────────────────────────────────────────────

  /// Clear all five tables and write `dataset`, as one transaction.
  ///
  /// Engagement references are resolved against the primary keys assigned
  /// while inserting the dimensions. On any error the database keeps its
  /// previous contents.
  fn reset_and_seed(
    &self,
    dataset: Dataset,
  ) -> impl Future<Output = Result<SeedSummary, Self::Error>> + Send + '_;

  /// Row counts, orphan count and engagement time span.
  fn integrity_report(
    &self,
  ) -> impl Future<Output = Result<IntegrityReport, Self::Error>> + Send + '_;

  // ── Analytics ─────────────────────────────────────────────────────────

  /// Create or replace all reporting views, as one transaction.
  fn deploy_views(
    &self,
    rates: RevenueRates,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Read a view in full, ordered by its [`AnalyticsView::sort_column`].
  fn read_view(
    &self,
    view: AnalyticsView,
  ) -> impl Future<Output = Result<ResultSet, Self::Error>> + Send + '_;
}
