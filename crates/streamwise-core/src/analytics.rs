//! The reporting views and the tabular results read back from them.

use serde::{Deserialize, Serialize};

// ─── Views ───────────────────────────────────────────────────────────────────

/// One of the four BI reporting views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalyticsView {
  /// Views, drop-off rate and in-category rank per title.
  ContentPerformance,
  /// Per-user session, minutes and buffering aggregates.
  UserChurnFeatures,
  /// Active users and estimated revenue per hour of day.
  PrimeTimeAnalytics,
  /// Streams and unique viewers per calendar date.
  DailyTraffic,
}

impl AnalyticsView {
  /// Deployment and export order.
  pub const ALL: [Self; 4] = [
    Self::ContentPerformance,
    Self::UserChurnFeatures,
    Self::PrimeTimeAnalytics,
    Self::DailyTraffic,
  ];

  pub fn view_name(self) -> &'static str {
    match self {
      Self::ContentPerformance => "v_ContentPerformance",
      Self::UserChurnFeatures => "v_UserChurnFeatures",
      Self::PrimeTimeAnalytics => "v_PrimeTimeAnalytics",
      Self::DailyTraffic => "v_DailyTraffic",
    }
  }

  pub fn export_file_name(self) -> &'static str {
    match self {
      Self::ContentPerformance => "content_report.csv",
      Self::UserChurnFeatures => "ai_features.csv",
      Self::PrimeTimeAnalytics => "prime_time_revenue.csv",
      Self::DailyTraffic => "daily_growth.csv",
    }
  }

  /// Column the export is sorted by (ascending), if any. The first two
  /// views are exported in natural view order.
  pub fn sort_column(self) -> Option<&'static str> {
    match self {
      Self::ContentPerformance | Self::UserChurnFeatures => None,
      Self::PrimeTimeAnalytics => Some("HourOfDay"),
      Self::DailyTraffic => Some("Date"),
    }
  }

  /// Output column names, in order.
  pub fn columns(self) -> &'static [&'static str] {
    match self {
      Self::ContentPerformance => {
        &["Title", "Category", "TotalViews", "DropOffRate", "CategoryRank"]
      }
      Self::UserChurnFeatures => &[
        "UserID",
        "Tier",
        "TotalSessions",
        "TotalMinutesWatched",
        "TotalBufferingEvents",
      ],
      Self::PrimeTimeAnalytics => &["HourOfDay", "ActiveUsers", "EstimatedRevenue_USD"],
      Self::DailyTraffic => &["Date", "TotalStreams", "UniqueViewers"],
    }
  }
}

// ─── Result sets ─────────────────────────────────────────────────────────────

/// A single value read from a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
}

impl CellValue {
  /// Text written to a CSV cell. `Null` becomes an empty cell; integral
  /// reals keep one decimal place so the column still reads as a float.
  pub fn render(&self) -> String {
    match self {
      Self::Null => String::new(),
      Self::Integer(i) => i.to_string(),
      Self::Real(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
      Self::Real(f) => f.to_string(),
      Self::Text(s) => s.clone(),
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Integer(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Integer(i) => Some(*i as f64),
      Self::Real(f) => Some(*f),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Text(s) => Some(s),
      _ => None,
    }
  }
}

/// A fully materialised view: header plus rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<CellValue>>,
}

impl ResultSet {
  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn column_index(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|c| c == name)
  }

  /// All values of one column, top to bottom.
  pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a CellValue> + use<'a>> {
    let idx = self.column_index(name)?;
    Some(self.rows.iter().filter_map(move |row| row.get(idx)))
  }
}
