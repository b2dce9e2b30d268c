//! Report rendering.
//!
//! Loads persisted result tables, applies unit conversions, reshapes the rows into
//! labeled series (pivot and melt), and draws the chart images under an output
//! directory, creating it if absent. Series builders are pure functions of the
//! records, so rendering the same table twice produces identical numeric series.
//! A malformed table (missing column, non-numeric cell) fails the whole render.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use metabench_core::table;
use metabench_core::units::{bytes_to_mib, us_to_ms};
use serde::de::DeserializeOwned;

use crate::chart::{grouped_bar_chart, line_chart_log_log, BarSeries, Series};
use crate::record::{
  CompressionRecord, DataReadRecord, FooterRecord, MetadataRecord, RowGroupRecord, SchemaRecord,
};

pub const DEFAULT_OUT_DIR: &str = "charts";

pub fn ensure_out_dir(dir: &Path) -> Result<()> {
  std::fs::create_dir_all(dir)?;
  Ok(())
}

/// Concatenate one or more result tables of the same schema.
fn load<R: DeserializeOwned>(inputs: &[PathBuf]) -> Result<Vec<R>> {
  ensure!(!inputs.is_empty(), "at least one result table is required");
  let mut records = Vec::new();
  for input in inputs {
    records.extend(table::read_csv::<R>(input)?);
  }
  ensure!(!records.is_empty(), "result tables contain no records");
  Ok(records)
}

/// Group records into one series per key, points in record order.
fn series_by<R>(
  records: &[R],
  key: impl Fn(&R) -> String,
  point: impl Fn(&R) -> (f64, f64),
) -> Vec<Series> {
  let mut out: Vec<Series> = Vec::new();
  for record in records {
    let label = key(record);
    match out.iter_mut().find(|series| series.label == label) {
      Some(series) => series.points.push(point(record)),
      None => out.push(Series::new(label, vec![point(record)])),
    }
  }
  out
}

/// Group records by (key, x) and average the values, one series per key with
/// points sorted by x. Used where several grid points share an x coordinate.
fn mean_series_by<R>(
  records: &[R],
  key: impl Fn(&R) -> String,
  x_of: impl Fn(&R) -> f64,
  value_of: impl Fn(&R) -> f64,
) -> Vec<Series> {
  let mut groups: Vec<(String, Vec<(f64, f64, usize)>)> = Vec::new();
  for record in records {
    let label = key(record);
    let (x, value) = (x_of(record), value_of(record));
    let group = match groups.iter().position(|(l, _)| *l == label) {
      Some(index) => index,
      None => {
        groups.push((label, Vec::new()));
        groups.len() - 1
      }
    };
    let points = &mut groups[group].1;
    match points.iter_mut().find(|(px, _, _)| *px == x) {
      Some((_, sum, count)) => {
        *sum += value;
        *count += 1;
      }
      None => points.push((x, value, 1)),
    }
  }

  groups
    .into_iter()
    .map(|(label, mut points)| {
      points.sort_by(|a, b| a.0.total_cmp(&b.0));
      let points = points
        .into_iter()
        .map(|(x, sum, count)| (x, sum / count as f64))
        .collect();
      Series::new(label, points)
    })
    .collect()
}

/// Pivot records into (categories, one bar series per key) of mean values.
/// Category and key order follow first appearance; a (key, category) cell with no
/// records stays at zero and is skipped when drawn.
fn pivot_means<R>(
  records: &[R],
  category: impl Fn(&R) -> String,
  key: impl Fn(&R) -> String,
  value: impl Fn(&R) -> f64,
) -> (Vec<String>, Vec<BarSeries>) {
  let mut categories: Vec<String> = Vec::new();
  let mut keys: Vec<String> = Vec::new();
  for record in records {
    let c = category(record);
    if !categories.contains(&c) {
      categories.push(c);
    }
    let k = key(record);
    if !keys.contains(&k) {
      keys.push(k);
    }
  }

  let mut sums = vec![vec![(0.0f64, 0usize); categories.len()]; keys.len()];
  for record in records {
    let ci = categories
      .iter()
      .position(|c| *c == category(record))
      .expect("category collected above");
    let ki = keys
      .iter()
      .position(|k| *k == key(record))
      .expect("key collected above");
    sums[ki][ci].0 += value(record);
    sums[ki][ci].1 += 1;
  }

  let series = keys
    .into_iter()
    .zip(sums)
    .map(|(label, cells)| {
      let values = cells
        .into_iter()
        .map(|(sum, count)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect();
      BarSeries::new(label, values)
    })
    .collect();
  (categories, series)
}

// ---- metadata ----

pub fn metadata_decode_series(records: &[MetadataRecord]) -> Vec<Series> {
  series_by(
    records,
    |r| format!("stats {}", r.stats_level),
    |r| (r.num_columns as f64, us_to_ms(r.total_decode_time_us)),
  )
}

pub fn metadata_size_series(records: &[MetadataRecord]) -> Vec<Series> {
  series_by(
    records,
    |r| format!("stats {}", r.stats_level),
    |r| (r.num_columns as f64, bytes_to_mib(r.size_bytes)),
  )
}

pub fn metadata_per_column_bars(records: &[MetadataRecord]) -> (Vec<String>, Vec<BarSeries>) {
  pivot_means(
    records,
    |r| r.stats_level.to_string(),
    |_| "mean decode time per column".to_string(),
    |r| us_to_ms(r.total_decode_time_us) / r.num_columns as f64,
  )
}

pub fn render_metadata(input: &Path, out_dir: &Path) -> Result<()> {
  let records: Vec<MetadataRecord> = load(&[input.to_path_buf()])?;
  ensure_out_dir(out_dir)?;
  line_chart_log_log(
    &out_dir.join("metadata_decode_time.png"),
    "Metadata decode time",
    "Number of columns",
    "Decode time (ms)",
    &metadata_decode_series(&records),
  )?;
  line_chart_log_log(
    &out_dir.join("metadata_size.png"),
    "File size",
    "Number of columns",
    "Size (MiB)",
    &metadata_size_series(&records),
  )?;
  let (categories, bars) = metadata_per_column_bars(&records);
  grouped_bar_chart(
    &out_dir.join("decode_time_per_column.png"),
    "Mean decode time per column",
    "Statistics level",
    "Time per column (ms)",
    &categories,
    &bars,
    false,
  )?;
  Ok(())
}

// ---- compression ----

pub fn compression_encode_bars(records: &[CompressionRecord]) -> (Vec<String>, Vec<BarSeries>) {
  pivot_means(
    records,
    |r| r.num_columns.to_string(),
    |r| r.algorithm.to_string(),
    |r| us_to_ms(r.encode_time_us),
  )
}

pub fn compression_decode_bars(records: &[CompressionRecord]) -> (Vec<String>, Vec<BarSeries>) {
  pivot_means(
    records,
    |r| r.num_columns.to_string(),
    |r| r.algorithm.to_string(),
    |r| us_to_ms(r.decode_time_us),
  )
}

pub fn compression_size_bars(records: &[CompressionRecord]) -> (Vec<String>, Vec<BarSeries>) {
  pivot_means(
    records,
    |r| r.num_columns.to_string(),
    |r| r.algorithm.to_string(),
    |r| bytes_to_mib(r.compressed_size_bytes),
  )
}

pub fn render_compression(inputs: &[PathBuf], out_dir: &Path) -> Result<()> {
  let records: Vec<CompressionRecord> = load(inputs)?;
  ensure_out_dir(out_dir)?;
  let charts = [
    ("encoding_time.png", "Encoding time", "Time (ms)", compression_encode_bars(&records)),
    ("decoding_time.png", "Decoding time", "Time (ms)", compression_decode_bars(&records)),
    ("compressed_size.png", "Compressed size", "Size (MiB)", compression_size_bars(&records)),
  ];
  for (file, title, y_desc, (categories, bars)) in charts {
    grouped_bar_chart(
      &out_dir.join(file),
      title,
      "Number of columns",
      y_desc,
      &categories,
      &bars,
      true,
    )?;
  }
  Ok(())
}

// ---- data reads ----

/// Melt the per-operation columns into (operation, num_columns, elapsed_us) rows.
pub fn melt_data_read(records: &[DataReadRecord]) -> Vec<(String, usize, u64)> {
  records
    .iter()
    .flat_map(|r| {
      [
        ("metadata decode", r.metadata_decode_time_us),
        ("full read", r.full_read_time_us),
        ("column subset read", r.column_subset_read_time_us),
        ("row group read", r.row_group_read_time_us),
      ]
      .into_iter()
      .map(|(operation, elapsed_us)| (operation.to_string(), r.num_columns, elapsed_us))
    })
    .collect()
}

pub fn data_read_bars(records: &[DataReadRecord]) -> (Vec<String>, Vec<BarSeries>) {
  let melted = melt_data_read(records);
  pivot_means(
    &melted,
    |(_, num_columns, _)| num_columns.to_string(),
    |(operation, _, _)| operation.clone(),
    |(_, _, elapsed_us)| us_to_ms(*elapsed_us),
  )
}

pub fn render_data_read(inputs: &[PathBuf], out_dir: &Path) -> Result<()> {
  let records: Vec<DataReadRecord> = load(inputs)?;
  ensure_out_dir(out_dir)?;
  let (categories, bars) = data_read_bars(&records);
  grouped_bar_chart(
    &out_dir.join("data_read_operations.png"),
    "Data read operations",
    "Number of columns",
    "Time (ms)",
    &categories,
    &bars,
    true,
  )?;
  Ok(())
}

// ---- row groups ----

pub fn page_size_label(page_size: usize) -> String {
  if page_size >= 1024 * 1024 {
    format!("{} MiB pages", page_size / (1024 * 1024))
  } else {
    format!("{} KiB pages", page_size / 1024)
  }
}

pub fn row_group_decode_series(records: &[RowGroupRecord]) -> Vec<Series> {
  mean_series_by(
    records,
    |r| page_size_label(r.page_size),
    |r| r.row_group_size as f64,
    |r| us_to_ms(r.total_decode_time_us),
  )
}

pub fn row_group_file_size_bars(records: &[RowGroupRecord]) -> (Vec<String>, Vec<BarSeries>) {
  pivot_means(
    records,
    |r| r.num_columns.to_string(),
    |r| format!("{} rows/group", r.row_group_size),
    |r| bytes_to_mib(r.file_size_bytes),
  )
}

pub fn render_row_groups(input: &Path, out_dir: &Path) -> Result<()> {
  let records: Vec<RowGroupRecord> = load(&[input.to_path_buf()])?;
  ensure_out_dir(out_dir)?;
  line_chart_log_log(
    &out_dir.join("row_group_decode_time.png"),
    "Metadata decode time by row group and page size",
    "Row group size (rows)",
    "Decode time (ms)",
    &row_group_decode_series(&records),
  )?;
  let (categories, bars) = row_group_file_size_bars(&records);
  grouped_bar_chart(
    &out_dir.join("row_group_file_size.png"),
    "File size by row group size",
    "Number of columns",
    "Size (MiB)",
    &categories,
    &bars,
    false,
  )?;
  Ok(())
}

// ---- schema ----

pub fn schema_bars(records: &[SchemaRecord]) -> (Vec<String>, Vec<BarSeries>) {
  pivot_means(
    records,
    |r| r.total_columns.to_string(),
    |r| {
      if r.is_subset {
        "column subset".to_string()
      } else {
        "full schema".to_string()
      }
    },
    |r| us_to_ms(r.schema_time),
  )
}

pub fn render_schema(input: &Path, out_dir: &Path) -> Result<()> {
  let records: Vec<SchemaRecord> = load(&[input.to_path_buf()])?;
  ensure_out_dir(out_dir)?;
  let (categories, bars) = schema_bars(&records);
  grouped_bar_chart(
    &out_dir.join("schema_build_time.png"),
    "Schema build time, full vs subset",
    "Total columns",
    "Schema build time (ms)",
    &categories,
    &bars,
    true,
  )?;
  Ok(())
}

// ---- footer representations ----

pub fn footer_time_bars(records: &[FooterRecord]) -> (Vec<String>, Vec<BarSeries>) {
  let melted: Vec<(String, usize, u64)> = records
    .iter()
    .flat_map(|r| {
      [
        ("baseline decode", r.baseline_decode_time_us),
        ("trimmed re-encode", r.reencode_time_us),
        ("trimmed decode", r.trimmed_decode_time_us),
      ]
      .into_iter()
      .map(|(stage, elapsed_us)| (stage.to_string(), r.num_columns, elapsed_us))
    })
    .collect();
  pivot_means(
    &melted,
    |(_, num_columns, _)| num_columns.to_string(),
    |(stage, _, _)| stage.clone(),
    |(_, _, elapsed_us)| us_to_ms(*elapsed_us),
  )
}

pub fn footer_size_bars(records: &[FooterRecord]) -> (Vec<String>, Vec<BarSeries>) {
  let melted: Vec<(String, usize, u64)> = records
    .iter()
    .flat_map(|r| {
      [
        ("baseline footer", r.baseline_size_bytes),
        ("trimmed footer", r.trimmed_size_bytes),
      ]
      .into_iter()
      .map(|(kind, bytes)| (kind.to_string(), r.num_columns, bytes))
    })
    .collect();
  pivot_means(
    &melted,
    |(_, num_columns, _)| num_columns.to_string(),
    |(kind, _, _)| kind.clone(),
    |(_, _, bytes)| bytes_to_mib(*bytes),
  )
}

pub fn render_footer(input: &Path, out_dir: &Path) -> Result<()> {
  let records: Vec<FooterRecord> = load(&[input.to_path_buf()])?;
  ensure_out_dir(out_dir)?;
  let (categories, bars) = footer_time_bars(&records);
  grouped_bar_chart(
    &out_dir.join("footer_decode_time.png"),
    "Footer representations, decode and re-encode",
    "Number of columns",
    "Time (ms)",
    &categories,
    &bars,
    true,
  )?;
  let (categories, bars) = footer_size_bars(&records);
  grouped_bar_chart(
    &out_dir.join("footer_size.png"),
    "Footer representations, encoded size",
    "Number of columns",
    "Size (MiB)",
    &categories,
    &bars,
    false,
  )?;
  Ok(())
}
