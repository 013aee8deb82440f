//! [`SqliteStore`] — the SQLite implementation of [`AnalyticsStore`].

use std::path::Path;

use rusqlite::{Connection, params};
use streamwise_core::{
  analytics::{AnalyticsView, ResultSet},
  catalog::{Device, MediaContent},
  config::RevenueRates,
  dataset::{Dataset, Engagement, User},
  store::{AnalyticsStore, IntegrityReport, SeedSummary, TableName},
};
use tracing::debug;

use crate::{
  Result,
  encode::{decode_cell, decode_timestamp, encode_bool, encode_timestamp},
  schema::{CONNECTION_PRAGMAS, SCHEMA},
  views::{replace_view_sql, select_sql},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A StreamWise database backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) the database at `path`. The schema is not touched;
  /// call [`SqliteStore::init_schema`] to install it.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  /// Open an empty in-memory database, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.apply_pragmas().await?;
    Ok(store)
  }

  async fn apply_pragmas(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Create the five tables if they do not exist yet.
  pub async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Seeding helpers ─────────────────────────────────────────────────────────

fn insert_devices(conn: &Connection, devices: &[Device]) -> rusqlite::Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    "INSERT INTO dim_Devices (Platform, AppVersion, ConnectionType) VALUES (?1, ?2, ?3)",
  )?;
  devices
    .iter()
    .map(|d| -> rusqlite::Result<i64> {
      stmt.execute(params![d.platform, d.app_version, d.connection_type.to_string()])?;
      Ok(conn.last_insert_rowid())
    })
    .collect()
}

fn insert_content(conn: &Connection, content: &[MediaContent]) -> rusqlite::Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    "INSERT INTO dim_MediaContent (
       Title, Category, SubGenre, ProductionCost_USD, Rating_IMDB, TargetAudience
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
  )?;
  content
    .iter()
    .map(|c| -> rusqlite::Result<i64> {
      stmt.execute(params![
        c.title,
        c.category,
        c.sub_genre,
        c.production_cost_usd,
        c.rating_imdb,
        c.target_audience,
      ])?;
      Ok(conn.last_insert_rowid())
    })
    .collect()
}

fn insert_users(conn: &Connection, users: &[User]) -> rusqlite::Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    "INSERT INTO dim_UserBase (AgeGroup, Gender, Tier, Country, AcquisitionSource)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  users
    .iter()
    .map(|u| -> rusqlite::Result<i64> {
      stmt.execute(params![
        u.age_group.to_string(),
        u.gender.to_string(),
        u.tier.to_string(),
        u.country,
        u.acquisition_source.to_string(),
      ])?;
      Ok(conn.last_insert_rowid())
    })
    .collect()
}

/// Assigned primary keys of each dimension, indexed like the dataset vectors.
struct DimensionKeys {
  users:   Vec<i64>,
  content: Vec<i64>,
  devices: Vec<i64>,
}

impl DimensionKeys {
  fn resolve(
    keys: &[i64],
    engagement: usize,
    dimension: &'static str,
    index: usize,
  ) -> rusqlite::Result<i64> {
    keys.get(index).copied().ok_or_else(|| {
      rusqlite::Error::ToSqlConversionFailure(Box::new(streamwise_core::Error::DanglingReference {
        engagement,
        dimension,
        index,
        len: keys.len(),
      }))
    })
  }
}

fn insert_engagements(
  conn: &Connection,
  engagements: &[Engagement],
  keys: &DimensionKeys,
) -> rusqlite::Result<usize> {
  let mut stmt = conn.prepare(
    "INSERT INTO fact_Engagement (
       UserID, ContentID, DeviceID, StreamStartTimestamp,
       WatchTimeMinutes, IsInterrupted, BufferingEvents
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?;
  for (i, e) in engagements.iter().enumerate() {
    let user_id = DimensionKeys::resolve(&keys.users, i, "user", e.user)?;
    let content_id = DimensionKeys::resolve(&keys.content, i, "content", e.content)?;
    let device_id = DimensionKeys::resolve(&keys.devices, i, "device", e.device)?;
    stmt.execute(params![
      user_id,
      content_id,
      device_id,
      encode_timestamp(e.stream_start),
      e.watch_time_minutes,
      encode_bool(e.is_interrupted),
      e.buffering_events,
    ])?;
  }
  Ok(engagements.len())
}

// ─── AnalyticsStore impl ─────────────────────────────────────────────────────

impl AnalyticsStore for SqliteStore {
  type Error = crate::Error;

  // ── Generation ────────────────────────────────────────────────────────────

  async fn reset_and_seed(&self, dataset: Dataset) -> Result<SeedSummary> {
    dataset.validate()?;

    let summary = self
      .conn
      .call(move |conn| {
        // Dropping the transaction without commit rolls everything back.
        let tx = conn.transaction()?;

        for table in TableName::DELETE_ORDER {
          let removed = tx.execute(&format!("DELETE FROM {}", table.as_str()), [])?;
          debug!(table = table.as_str(), fact = table.is_fact(), removed, "cleared table");
        }

        let keys = DimensionKeys {
          devices: insert_devices(&tx, &dataset.devices)?,
          content: insert_content(&tx, &dataset.content)?,
          users:   insert_users(&tx, &dataset.users)?,
        };
        let engagements = insert_engagements(&tx, &dataset.engagements, &keys)?;

        tx.commit()?;

        Ok(SeedSummary {
          devices: keys.devices.len(),
          content: keys.content.len(),
          users: keys.users.len(),
          engagements,
        })
      })
      .await?;

    Ok(summary)
  }

  async fn integrity_report(&self) -> Result<IntegrityReport> {
    let (row_counts, orphaned_engagements, earliest, latest) = self
      .conn
      .call(|conn| {
        let mut counts = Vec::with_capacity(TableName::DELETE_ORDER.len());
        for table in TableName::DELETE_ORDER {
          let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.as_str()),
            [],
            |r| r.get(0),
          )?;
          counts.push((table, n as u64));
        }

        let orphans: i64 = conn.query_row(
          "SELECT COUNT(*)
           FROM fact_Engagement e
           LEFT JOIN dim_UserBase     u ON u.UserID    = e.UserID
           LEFT JOIN dim_MediaContent c ON c.ContentID = e.ContentID
           LEFT JOIN dim_Devices      d ON d.DeviceID  = e.DeviceID
           WHERE u.UserID IS NULL OR c.ContentID IS NULL OR d.DeviceID IS NULL",
          [],
          |r| r.get(0),
        )?;

        let (earliest, latest): (Option<String>, Option<String>) = conn.query_row(
          "SELECT MIN(StreamStartTimestamp), MAX(StreamStartTimestamp) FROM fact_Engagement",
          [],
          |r| Ok((r.get(0)?, r.get(1)?)),
        )?;

        Ok((counts, orphans as u64, earliest, latest))
      })
      .await?;

    Ok(IntegrityReport {
      row_counts,
      orphaned_engagements,
      earliest_stream: earliest.as_deref().map(decode_timestamp).transpose()?,
      latest_stream: latest.as_deref().map(decode_timestamp).transpose()?,
    })
  }

  // ── Analytics ─────────────────────────────────────────────────────────────

  async fn deploy_views(&self, rates: RevenueRates) -> Result<()> {
    rates.validate()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for view in AnalyticsView::ALL {
          tx.execute_batch(&replace_view_sql(view, rates))?;
          // Preparing a read resolves the view's columns, so a missing table
          // or column fails here instead of at export time.
          tx.prepare(&select_sql(view))?;
          debug!(view = view.view_name(), "view replaced");
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn read_view(&self, view: AnalyticsView) -> Result<ResultSet> {
    let sql = select_sql(view);

    let result = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
          let cells = (0..width)
            .map(|i| row.get_ref(i).map(decode_cell))
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows.push(cells);
        }

        Ok(ResultSet { columns, rows })
      })
      .await?;

    Ok(result)
  }
}
