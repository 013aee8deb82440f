//! The data generator job: wipe the schema and seed it with synthetic data.

use chrono::NaiveDateTime;
use rand::{SeedableRng, rngs::StdRng};
use streamwise_core::{
  config::GeneratorConfig,
  generator::generate_dataset,
  store::{AnalyticsStore, IntegrityReport, SeedSummary},
};
use tracing::{info, warn};

use crate::{Error, Result};

/// What a generator run wrote, and the schema's state afterwards.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
  pub summary:   SeedSummary,
  pub integrity: IntegrityReport,
}

/// Run the generator against `store`, timestamping sessions relative to
/// `now`.
pub async fn run<S: AnalyticsStore>(
  store: &S,
  config: &GeneratorConfig,
  now: NaiveDateTime,
) -> Result<GenerateOutcome> {
  info!("generating synthetic dataset");
  let dataset = {
    let mut rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    generate_dataset(config, now, &mut rng)?
  };
  info!(
    devices = dataset.devices.len(),
    content = dataset.content.len(),
    users = dataset.users.len(),
    engagements = dataset.engagements.len(),
    seed = ?config.seed,
    "dataset generated"
  );

  info!("clearing old rows and inserting dataset");
  let summary = store.reset_and_seed(dataset).await.map_err(Error::store)?;

  let integrity = store.integrity_report().await.map_err(Error::store)?;
  for (table, rows) in &integrity.row_counts {
    info!(table = table.as_str(), rows, "table populated");
  }
  if integrity.orphaned_engagements > 0 {
    warn!(
      orphans = integrity.orphaned_engagements,
      "engagements reference missing dimension rows"
    );
  }

  info!("done, database is populated");
  Ok(GenerateOutcome { summary, integrity })
}
