//! CSV export of view result sets.

use std::path::Path;

use streamwise_core::analytics::{CellValue, ResultSet};

use crate::{Error, Result};

/// Write `rs` to `path` with a header row, replacing any existing file.
/// Returns the number of data rows written.
pub fn write_csv(path: &Path, rs: &ResultSet) -> Result<usize> {
  let csv_err = |source: csv::Error| Error::Csv { path: path.to_path_buf(), source };

  let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
  wtr.write_record(&rs.columns).map_err(csv_err)?;
  for row in &rs.rows {
    wtr.write_record(row.iter().map(CellValue::render)).map_err(csv_err)?;
  }
  wtr.flush().map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

  Ok(rs.len())
}
