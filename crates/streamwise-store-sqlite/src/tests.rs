//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use rand::{SeedableRng, rngs::StdRng};
use streamwise_core::{
  analytics::{AnalyticsView, CellValue, ResultSet},
  attributes::{AcquisitionSource, AgeGroup, Gender, Tier},
  catalog::{content_catalog, device_catalog},
  config::{GeneratorConfig, RevenueRates},
  dataset::{Dataset, Engagement, User},
  generator::generate_dataset,
  store::{AnalyticsStore, TableName},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.init_schema().await.expect("schema");
  s
}

fn random_dataset(seed: u64, now: NaiveDateTime) -> Dataset {
  let mut rng = StdRng::seed_from_u64(seed);
  generate_dataset(&GeneratorConfig::default(), now, &mut rng).unwrap()
}

fn user(tier: Tier) -> User {
  User {
    age_group: AgeGroup::From35To44,
    gender: Gender::Male,
    tier,
    country: "CZ".into(),
    acquisition_source: AcquisitionSource::Social,
  }
}

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2024, 5, day)
    .unwrap()
    .and_hms_opt(hour, minute, 0)
    .unwrap()
}

fn session(user: usize, content: usize, start: NaiveDateTime, minutes: u32, interrupted: bool) -> Engagement {
  Engagement {
    user,
    content,
    device: 0,
    stream_start: start,
    watch_time_minutes: minutes,
    is_interrupted: interrupted,
    buffering_events: 1,
  }
}

fn small_dataset(users: Vec<User>, engagements: Vec<Engagement>) -> Dataset {
  Dataset {
    devices: device_catalog(),
    content: content_catalog(),
    users,
    engagements,
  }
}

fn cell<'a>(rs: &'a ResultSet, row: usize, column: &str) -> &'a CellValue {
  &rs.rows[row][rs.column_index(column).unwrap()]
}

fn find_row<'a>(rs: &'a ResultSet, column: &str, value: &str) -> &'a [CellValue] {
  let idx = rs.column_index(column).unwrap();
  rs.rows
    .iter()
    .find(|r| r[idx].as_str() == Some(value))
    .unwrap_or_else(|| panic!("no row with {column} = {value}"))
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_populates_expected_counts() {
  let s = store().await;
  let summary = s
    .reset_and_seed(random_dataset(1, Local::now().naive_local()))
    .await
    .unwrap();
  assert_eq!((summary.devices, summary.content, summary.users, summary.engagements), (4, 6, 100, 2000));

  let report = s.integrity_report().await.unwrap();
  assert_eq!(report.row_count(TableName::Devices), Some(4));
  assert_eq!(report.row_count(TableName::MediaContent), Some(6));
  assert_eq!(report.row_count(TableName::UserBase), Some(100));
  assert_eq!(report.row_count(TableName::Engagement), Some(2000));
  assert_eq!(report.row_count(TableName::AdImpressions), Some(0));
  assert_eq!(report.orphaned_engagements, 0);
}

#[tokio::test]
async fn reseeding_resets_rather_than_appends() {
  let s = store().await;
  let now = Local::now().naive_local();
  s.reset_and_seed(random_dataset(1, now)).await.unwrap();
  s.reset_and_seed(random_dataset(2, now)).await.unwrap();

  let report = s.integrity_report().await.unwrap();
  assert_eq!(report.row_count(TableName::UserBase), Some(100));
  assert_eq!(report.row_count(TableName::Engagement), Some(2000));
  assert_eq!(report.orphaned_engagements, 0);
}

#[tokio::test]
async fn reseeding_uses_assigned_keys_not_positions() {
  let s = store().await;
  let now = Local::now().naive_local();
  s.reset_and_seed(random_dataset(1, now)).await.unwrap();
  s.reset_and_seed(random_dataset(1, now)).await.unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  // AUTOINCREMENT keeps counting after DELETE, so the second run's users
  // are 101..=200 and every engagement must point at them.
  let churn = s.read_view(AnalyticsView::UserChurnFeatures).await.unwrap();
  let ids: Vec<i64> = churn.column("UserID").unwrap().filter_map(CellValue::as_i64).collect();
  assert_eq!(ids.len(), 100);
  assert!(ids.iter().all(|id| (101..=200).contains(id)), "{ids:?}");

  let sessions: i64 = churn
    .column("TotalSessions")
    .unwrap()
    .filter_map(CellValue::as_i64)
    .sum();
  assert_eq!(sessions, 2000);
}

#[tokio::test]
async fn failed_seed_leaves_previous_state() {
  let s = store().await;
  let now = Local::now().naive_local();
  s.reset_and_seed(random_dataset(9, now)).await.unwrap();

  // Violates the rating CHECK after the deletes have already run.
  let mut bad = random_dataset(10, now);
  bad.content[2].rating_imdb = 11.0;
  let err = s.reset_and_seed(bad).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err}");

  let report = s.integrity_report().await.unwrap();
  assert_eq!(report.row_count(TableName::MediaContent), Some(6));
  assert_eq!(report.row_count(TableName::Engagement), Some(2000));
  assert_eq!(report.orphaned_engagements, 0);
}

#[tokio::test]
async fn dangling_reference_rejected_up_front() {
  let s = store().await;
  let ds = small_dataset(vec![user(Tier::Free)], vec![session(1, 0, at(1, 10, 0), 30, false)]);
  let err = s.reset_and_seed(ds).await.unwrap_err();
  assert!(matches!(err, Error::Core(_)), "{err}");
}

#[tokio::test]
async fn seed_without_schema_fails() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  let err = s
    .reset_and_seed(random_dataset(1, Local::now().naive_local()))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)));
}

#[tokio::test]
async fn stream_starts_fall_in_lookback_window() {
  let s = store().await;
  let now = Local::now().naive_local();
  s.reset_and_seed(random_dataset(4, now)).await.unwrap();

  let report = s.integrity_report().await.unwrap();
  let earliest = report.earliest_stream.unwrap();
  let latest = report.latest_stream.unwrap();
  assert!(earliest >= now - TimeDelta::days(30) - TimeDelta::seconds(1));
  assert!(latest <= now);
}

#[tokio::test]
async fn integrity_report_on_empty_schema() {
  let s = store().await;
  let report = s.integrity_report().await.unwrap();
  assert!(report.row_counts.iter().all(|(_, n)| *n == 0));
  assert_eq!(report.earliest_stream, None);
  assert_eq!(report.latest_stream, None);
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deploy_views_is_idempotent() {
  let s = store().await;
  s.reset_and_seed(random_dataset(3, Local::now().naive_local()))
    .await
    .unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  for view in AnalyticsView::ALL {
    let rs = s.read_view(view).await.unwrap();
    assert_eq!(rs.columns, view.columns(), "{view:?}");
    assert!(!rs.is_empty(), "{view:?}");
  }
}

#[tokio::test]
async fn deploy_views_without_tables_fails() {
  let s = SqliteStore::open_in_memory().await.unwrap();
  assert!(s.deploy_views(RevenueRates::default()).await.is_err());
  assert!(s.read_view(AnalyticsView::DailyTraffic).await.is_err());
}

#[tokio::test]
async fn invalid_rates_rejected() {
  let s = store().await;
  let rates = RevenueRates { free_per_minute: -1.0, paid_per_minute: 0.01 };
  assert!(matches!(s.deploy_views(rates).await, Err(Error::Core(_))));
}

#[tokio::test]
async fn content_performance_drop_off_and_rank() {
  let s = store().await;
  let t = at(3, 12, 0);
  // Series: content 0 watched 4× (never interrupted), content 1 watched 2×
  // (always interrupted). Reality: contents 2 and 5 tie at 3 views.
  let mut sessions = Vec::new();
  sessions.extend((0..4).map(|_| session(0, 0, t, 10, false)));
  sessions.extend((0..2).map(|_| session(0, 1, t, 10, true)));
  sessions.extend((0..3).map(|_| session(0, 2, t, 10, false)));
  sessions.extend([session(0, 5, t, 10, true), session(0, 5, t, 10, false), session(0, 5, t, 10, false)]);
  s.reset_and_seed(small_dataset(vec![user(Tier::Voyo)], sessions))
    .await
    .unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::ContentPerformance).await.unwrap();
  // Inner join: titles without views are absent.
  assert_eq!(rs.len(), 4);

  let ordinace = find_row(&rs, "Title", "Ordinace v Ruzove zahrade 2");
  assert_eq!(ordinace[2], CellValue::Integer(4));
  assert_eq!(ordinace[3], CellValue::Text("0.00%".into()));
  assert_eq!(ordinace[4], CellValue::Integer(1));

  let specialiste = find_row(&rs, "Title", "Specialiste");
  assert_eq!(specialiste[3], CellValue::Text("100.00%".into()));
  assert_eq!(specialiste[4], CellValue::Integer(2));

  let masterchef = find_row(&rs, "Title", "MasterChef Cesko");
  assert_eq!(masterchef[3], CellValue::Text("33.33%".into()));
  assert_eq!(masterchef[4], CellValue::Integer(1));
  assert_eq!(find_row(&rs, "Title", "Love Island")[4], CellValue::Integer(1));
}

#[tokio::test]
async fn churn_features_include_idle_users() {
  let s = store().await;
  let users = vec![user(Tier::Free), user(Tier::Premium), user(Tier::Voyo)];
  let sessions = vec![
    session(0, 0, at(1, 9, 0), 30, false),
    session(0, 3, at(2, 9, 0), 45, false),
  ];
  s.reset_and_seed(small_dataset(users, sessions)).await.unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::UserChurnFeatures).await.unwrap();
  assert_eq!(rs.len(), 3);

  let active = find_row(&rs, "Tier", "Free");
  assert_eq!(active[2], CellValue::Integer(2));
  assert_eq!(active[3], CellValue::Integer(75));
  assert_eq!(active[4], CellValue::Integer(2));

  let idle = find_row(&rs, "Tier", "Premium");
  assert_eq!(idle[2], CellValue::Integer(0));
  assert_eq!(idle[3], CellValue::Null);
  assert_eq!(idle[4], CellValue::Null);
}

#[tokio::test]
async fn churn_features_one_row_per_generated_user() {
  let s = store().await;
  s.reset_and_seed(random_dataset(77, Local::now().naive_local()))
    .await
    .unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::UserChurnFeatures).await.unwrap();
  assert_eq!(rs.len(), 100);
}

#[tokio::test]
async fn prime_time_revenue_by_tier_sorted_by_hour() {
  let s = store().await;
  let users = vec![user(Tier::Free), user(Tier::Premium)];
  let sessions = vec![
    session(0, 0, at(4, 20, 0), 100, false),
    session(1, 1, at(5, 20, 30), 100, false),
    session(0, 2, at(6, 8, 15), 10, false),
  ];
  s.reset_and_seed(small_dataset(users, sessions)).await.unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::PrimeTimeAnalytics).await.unwrap();
  assert_eq!(rs.len(), 2);
  assert_eq!(cell(&rs, 0, "HourOfDay"), &CellValue::Integer(8));
  assert_eq!(cell(&rs, 1, "HourOfDay"), &CellValue::Integer(20));
  assert_eq!(cell(&rs, 1, "ActiveUsers"), &CellValue::Integer(2));

  let morning = cell(&rs, 0, "EstimatedRevenue_USD").as_f64().unwrap();
  let evening = cell(&rs, 1, "EstimatedRevenue_USD").as_f64().unwrap();
  assert!((morning - 0.5).abs() < 1e-9, "{morning}");
  assert!((evening - 6.0).abs() < 1e-9, "{evening}");
}

#[tokio::test]
async fn prime_time_honours_configured_rates() {
  let s = store().await;
  let users = vec![user(Tier::Free), user(Tier::Voyo)];
  let sessions = vec![
    session(0, 0, at(4, 18, 0), 10, false),
    session(1, 0, at(4, 18, 5), 10, false),
  ];
  s.reset_and_seed(small_dataset(users, sessions)).await.unwrap();
  s.deploy_views(RevenueRates { free_per_minute: 1.0, paid_per_minute: 2.0 })
    .await
    .unwrap();

  let rs = s.read_view(AnalyticsView::PrimeTimeAnalytics).await.unwrap();
  let revenue = cell(&rs, 0, "EstimatedRevenue_USD").as_f64().unwrap();
  assert!((revenue - 30.0).abs() < 1e-9, "{revenue}");
}

#[tokio::test]
async fn hours_cover_full_day_in_order() {
  let s = store().await;
  s.reset_and_seed(random_dataset(12, Local::now().naive_local()))
    .await
    .unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::PrimeTimeAnalytics).await.unwrap();
  let hours: Vec<i64> = rs.column("HourOfDay").unwrap().filter_map(CellValue::as_i64).collect();
  assert!(hours.windows(2).all(|w| w[0] < w[1]), "{hours:?}");
  assert!(hours.iter().all(|h| (0..24).contains(h)));
}

#[tokio::test]
async fn daily_traffic_sorted_by_date() {
  let s = store().await;
  s.reset_and_seed(random_dataset(21, Local::now().naive_local()))
    .await
    .unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::DailyTraffic).await.unwrap();
  let dates: Vec<&str> = rs.column("Date").unwrap().filter_map(CellValue::as_str).collect();
  assert!(dates.windows(2).all(|w| w[0] < w[1]), "{dates:?}");
  assert!(dates.len() <= 31);

  let streams: i64 = rs.column("TotalStreams").unwrap().filter_map(CellValue::as_i64).sum();
  assert_eq!(streams, 2000);
}

#[tokio::test]
async fn daily_traffic_counts_distinct_viewers() {
  let s = store().await;
  let users = vec![user(Tier::Free), user(Tier::Voyo)];
  let sessions = vec![
    session(0, 0, at(2, 23, 59), 5, false),
    session(0, 1, at(2, 1, 0), 5, false),
    session(1, 1, at(2, 12, 0), 5, false),
    session(1, 1, at(1, 12, 0), 5, false),
  ];
  s.reset_and_seed(small_dataset(users, sessions)).await.unwrap();
  s.deploy_views(RevenueRates::default()).await.unwrap();

  let rs = s.read_view(AnalyticsView::DailyTraffic).await.unwrap();
  assert_eq!(rs.len(), 2);
  assert_eq!(cell(&rs, 0, "Date"), &CellValue::Text("2024-05-01".into()));
  assert_eq!(cell(&rs, 0, "UniqueViewers"), &CellValue::Integer(1));
  assert_eq!(cell(&rs, 1, "TotalStreams"), &CellValue::Integer(3));
  assert_eq!(cell(&rs, 1, "UniqueViewers"), &CellValue::Integer(2));
}
