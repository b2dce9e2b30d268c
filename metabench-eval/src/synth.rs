//! Synthetic dataset generation.
//!
//! Values are generated from a per-column seeded RNG, so the same [`BenchConfig`]
//! always produces byte-identical tables. Datasets live inside a scoped temporary
//! directory and are removed with the guard on every exit path, including when a
//! timed operation downstream fails.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use metabench_core::timing::{self, Timed};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use tempfile::TempDir;

use crate::config::{BenchConfig, ValueDistribution};

const COLUMN_SEED: u64 = 0x5EED_0001;

fn column_values(config: &BenchConfig, column: usize) -> Vec<f32> {
  let mut rng = SmallRng::seed_from_u64(COLUMN_SEED ^ column as u64);
  match config.distribution {
    ValueDistribution::Uniform => (0..config.row_count)
      .map(|_| rng.gen_range(-1000.0f32..1000.0))
      .collect(),
    ValueDistribution::Normal => StandardNormal
      .sample_iter(&mut rng)
      .take(config.row_count)
      .collect(),
  }
}

/// Build the in-memory table for a configuration: `column_count` float32 columns
/// named `col_0..col_n`, `row_count` rows each.
pub fn build_batch(config: &BenchConfig) -> Result<RecordBatch> {
  let fields: Vec<Field> = (0..config.column_count)
    .map(|i| Field::new(format!("col_{i}"), DataType::Float32, false))
    .collect();
  let schema = Arc::new(Schema::new(fields));

  let arrays: Vec<ArrayRef> = (0..config.column_count)
    .map(|i| Arc::new(Float32Array::from(column_values(config, i))) as ArrayRef)
    .collect();

  Ok(RecordBatch::try_new(schema, arrays)?)
}

fn writer_properties(config: &BenchConfig) -> WriterProperties {
  let mut builder = WriterProperties::builder()
    .set_statistics_enabled(config.statistics_level.to_enabled())
    .set_compression(config.compression.to_compression());
  if let Some(row_group_size) = config.row_group_size {
    builder = builder.set_max_row_group_size(row_group_size);
  }
  if let Some(page_size) = config.page_size {
    builder = builder.set_data_page_size_limit(page_size);
  }
  builder.build()
}

/// Persist the configured table at `path` through the library writer.
///
/// The measurement covers only the write and close calls; batch construction is
/// setup and excluded. The carried value is the resulting file size in bytes.
pub fn write_dataset(config: &BenchConfig, path: &Path) -> Result<Timed<u64>> {
  let batch = build_batch(config)?;
  let file =
    File::create(path).with_context(|| format!("creating dataset {}", path.display()))?;
  let properties = writer_properties(config);

  let write = timing::try_time(|| {
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(properties))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
  })?;

  let size_bytes = std::fs::metadata(path)?.len();
  Ok(write.map(|()| size_bytes))
}

/// A synthesized dataset scoped to a temporary directory.
pub struct TempDataset {
  _dir: TempDir,
  path: PathBuf,
}

impl TempDataset {
  /// Synthesize and persist the dataset for `config`, returning the guard and the
  /// timed write outcome (elapsed plus file size in bytes).
  pub fn create(config: &BenchConfig) -> Result<(Self, Timed<u64>)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(config.file_name());
    let outcome = write_dataset(config, &path)?;
    Ok((Self { _dir: dir, path }, outcome))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}
