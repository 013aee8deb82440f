//! DDL for the four reporting views, in SQLite dialect.

use streamwise_core::{analytics::AnalyticsView, attributes::Tier, config::RevenueRates};

const CONTENT_PERFORMANCE: &str = "
CREATE VIEW v_ContentPerformance AS
SELECT
    c.Title,
    c.Category,
    COUNT(e.EngagementID) AS TotalViews,
    printf('%.2f%%', SUM(e.IsInterrupted) * 100.0 / COUNT(e.EngagementID)) AS DropOffRate,
    DENSE_RANK() OVER (
        PARTITION BY c.Category
        ORDER BY COUNT(e.EngagementID) DESC
    ) AS CategoryRank
FROM fact_Engagement e
JOIN dim_MediaContent c ON e.ContentID = c.ContentID
GROUP BY c.Title, c.Category;
";

// Left join: users without sessions still get a row (with NULL sums).
const USER_CHURN_FEATURES: &str = "
CREATE VIEW v_UserChurnFeatures AS
SELECT
    u.UserID,
    u.Tier,
    COUNT(e.EngagementID)   AS TotalSessions,
    SUM(e.WatchTimeMinutes) AS TotalMinutesWatched,
    SUM(e.BufferingEvents)  AS TotalBufferingEvents
FROM dim_UserBase u
LEFT JOIN fact_Engagement e ON u.UserID = e.UserID
GROUP BY u.UserID, u.Tier;
";

const DAILY_TRAFFIC: &str = "
CREATE VIEW v_DailyTraffic AS
SELECT
    date(e.StreamStartTimestamp) AS Date,
    COUNT(e.EngagementID)        AS TotalStreams,
    COUNT(DISTINCT e.UserID)     AS UniqueViewers
FROM fact_Engagement e
GROUP BY date(e.StreamStartTimestamp);
";

fn prime_time_analytics(rates: RevenueRates) -> String {
  format!(
    "
CREATE VIEW v_PrimeTimeAnalytics AS
SELECT
    CAST(strftime('%H', e.StreamStartTimestamp) AS INTEGER) AS HourOfDay,
    COUNT(DISTINCT e.UserID) AS ActiveUsers,
    SUM(CASE
        WHEN u.Tier = '{free}' THEN e.WatchTimeMinutes * {free_rate:?}
        ELSE e.WatchTimeMinutes * {paid_rate:?}
    END) AS EstimatedRevenue_USD
FROM fact_Engagement e
JOIN dim_UserBase u ON e.UserID = u.UserID
GROUP BY CAST(strftime('%H', e.StreamStartTimestamp) AS INTEGER);
",
    free = Tier::Free,
    free_rate = rates.free_per_minute,
    paid_rate = rates.paid_per_minute,
  )
}

/// Statements that replace `view`: drop-if-exists followed by create.
pub fn replace_view_sql(view: AnalyticsView, rates: RevenueRates) -> String {
  let create = match view {
    AnalyticsView::ContentPerformance => CONTENT_PERFORMANCE.to_owned(),
    AnalyticsView::UserChurnFeatures => USER_CHURN_FEATURES.to_owned(),
    AnalyticsView::PrimeTimeAnalytics => prime_time_analytics(rates),
    AnalyticsView::DailyTraffic => DAILY_TRAFFIC.to_owned(),
  };
  format!("DROP VIEW IF EXISTS {};\n{create}", view.view_name())
}

/// Full read of `view` in export order.
pub fn select_sql(view: AnalyticsView) -> String {
  match view.sort_column() {
    Some(col) => format!("SELECT * FROM {} ORDER BY {col}", view.view_name()),
    None => format!("SELECT * FROM {}", view.view_name()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn revenue_rates_are_inlined() {
    let sql = replace_view_sql(
      AnalyticsView::PrimeTimeAnalytics,
      RevenueRates { free_per_minute: 0.05, paid_per_minute: 1.0 },
    );
    assert!(sql.starts_with("DROP VIEW IF EXISTS v_PrimeTimeAnalytics;"));
    assert!(sql.contains("WHEN u.Tier = 'Free' THEN e.WatchTimeMinutes * 0.05"));
    assert!(sql.contains("ELSE e.WatchTimeMinutes * 1.0"));
  }

  #[test]
  fn time_views_are_ordered() {
    assert_eq!(
      select_sql(AnalyticsView::DailyTraffic),
      "SELECT * FROM v_DailyTraffic ORDER BY Date"
    );
    assert_eq!(
      select_sql(AnalyticsView::ContentPerformance),
      "SELECT * FROM v_ContentPerformance"
    );
  }
}
