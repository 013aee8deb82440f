//! Conversions between Rust values and the plain representations stored in
//! SQLite columns.
//!
//! Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text so that SQLite's
//! `date()` and `strftime()` work on them directly.

use chrono::NaiveDateTime;
use rusqlite::types::ValueRef;
use streamwise_core::analytics::CellValue;

use crate::{Error, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn encode_timestamp(ts: NaiveDateTime) -> String { ts.format(TIMESTAMP_FORMAT).to_string() }

pub fn decode_timestamp(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_bool(b: bool) -> i64 { i64::from(b) }

pub fn decode_cell(value: ValueRef<'_>) -> CellValue {
  match value {
    ValueRef::Null => CellValue::Null,
    ValueRef::Integer(i) => CellValue::Integer(i),
    ValueRef::Real(f) => CellValue::Real(f),
    ValueRef::Text(t) | ValueRef::Blob(t) => {
      CellValue::Text(String::from_utf8_lossy(t).into_owned())
    }
  }
}
