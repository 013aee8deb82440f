//! The analytics deployer job: replace the reporting views and export each
//! one to CSV.

use std::path::PathBuf;

use streamwise_core::{analytics::AnalyticsView, store::AnalyticsStore};
use tracing::{error, info};

use crate::{Error, Result, config::AnalyticsConfig, export::write_csv};

#[derive(Debug, Clone)]
pub struct ExportedFile {
  pub view: AnalyticsView,
  pub path: PathBuf,
  pub rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ExportReport {
  pub files: Vec<ExportedFile>,
}

impl ExportReport {
  pub fn rows_for(&self, view: AnalyticsView) -> Option<usize> {
    self.files.iter().find(|f| f.view == view).map(|f| f.rows)
  }
}

/// Deploy the views, then export them.
///
/// A view failure aborts before anything is written. Each export file is
/// independent: a failed write is logged, the remaining files are still
/// written, and the run ends with [`Error::PartialExport`].
pub async fn run<S: AnalyticsStore>(store: &S, config: &AnalyticsConfig) -> Result<ExportReport> {
  for view in AnalyticsView::ALL {
    info!(view = view.view_name(), "creating view");
  }
  store
    .deploy_views(config.revenue)
    .await
    .map_err(Error::store)?;

  let dir = &config.output_dir;
  info!(dir = %dir.display(), "exporting views");
  std::fs::create_dir_all(dir).map_err(|source| Error::Io { path: dir.clone(), source })?;

  let mut results = Vec::with_capacity(AnalyticsView::ALL.len());
  for view in AnalyticsView::ALL {
    results.push((view, store.read_view(view).await.map_err(Error::store)?));
  }

  let mut report = ExportReport::default();
  let mut failed = Vec::new();
  for (view, rs) in results {
    let path = dir.join(view.export_file_name());
    match write_csv(&path, &rs) {
      Ok(rows) => {
        info!(file = %path.display(), rows, "exported");
        report.files.push(ExportedFile { view, path, rows });
      }
      Err(e) => {
        error!(file = %path.display(), error = %e, "export failed");
        failed.push(path);
      }
    }
  }

  if !failed.is_empty() {
    return Err(Error::PartialExport { failed });
  }

  if let Some(days) = report.rows_for(AnalyticsView::DailyTraffic) {
    info!("done, exported {days} days of history");
  }
  Ok(report)
}
