//! Append-only result tables.
//!
//! A [`ResultTable`] accumulates one record per (configuration, operation) pair and
//! persists the whole run as a delimited file with a header row. Insertion order is
//! preserved end to end: downstream charts plot series in the order configurations
//! were benchmarked. All records in a table share one field set; a row missing a
//! declared field fails the write or the read-back, there are no partial rows.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug)]
pub struct ResultTable<R> {
  rows: Vec<R>,
}

impl<R> Default for ResultTable<R> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R> ResultTable<R> {
  pub fn new() -> Self {
    Self { rows: Vec::new() }
  }

  /// Append one record. Records are immutable once pushed.
  pub fn push(&mut self, row: R) {
    self.rows.push(row);
  }

  pub fn rows(&self) -> &[R] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

impl<R: Serialize> ResultTable<R> {
  /// Flush the accumulated records to `path` as CSV, header first, rows in
  /// insertion order.
  pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file =
      File::create(path).with_context(|| format!("creating result table {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &self.rows {
      writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
  }
}

/// Read a previously persisted result table back into records.
///
/// The header must carry every declared field of `R`; a missing column is an error.
pub fn read_csv<R: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<R>> {
  let path = path.as_ref();
  let mut reader = csv::Reader::from_path(path)
    .with_context(|| format!("opening result table {}", path.display()))?;
  let mut rows = Vec::new();
  for row in reader.deserialize() {
    rows.push(row.with_context(|| format!("malformed row in {}", path.display()))?);
  }
  Ok(rows)
}

#[cfg(test)]
mod tests {
  use rstest::rstest;
  use serde::Deserialize;

  use super::*;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Row {
    num_columns: usize,
    decode_time_us: u64,
    size_bytes: u64,
  }

  fn sample_rows(n: usize) -> Vec<Row> {
    (0..n)
      .map(|i| Row {
        num_columns: 10usize.pow(i as u32 % 4),
        decode_time_us: 100 * i as u64,
        size_bytes: 4096 + i as u64,
      })
      .collect()
  }

  #[rstest]
  #[case(1)]
  #[case(4)]
  #[case(32)]
  fn test_round_trip_preserves_order_and_values(#[case] n: usize) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");

    let mut table = ResultTable::new();
    for row in sample_rows(n) {
      table.push(row);
    }
    table.write_csv(&path).unwrap();

    let read_back: Vec<Row> = read_csv(&path).unwrap();
    assert_eq!(read_back, sample_rows(n));
  }

  #[test]
  fn test_empty_table_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    ResultTable::<Row>::new().write_csv(&path).unwrap();
    let read_back: Vec<Row> = read_csv(&path).unwrap_or_default();
    assert!(read_back.is_empty());
  }

  #[test]
  fn test_missing_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(&path, "num_columns,decode_time_us\n10,250\n").unwrap();

    assert!(read_csv::<Row>(&path).is_err());
  }

  #[test]
  fn test_non_numeric_cell_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
      &path,
      "num_columns,decode_time_us,size_bytes\n10,fast,4096\n",
    )
    .unwrap();

    assert!(read_csv::<Row>(&path).is_err());
  }
}
