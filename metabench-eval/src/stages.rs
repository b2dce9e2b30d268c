//! Timed stages over the Parquet library.
//!
//! Each stage wraps exactly one external-library operation with the wall clock;
//! file opening and other setup happen outside the measured region. Errors from the
//! library propagate unchanged and nothing is retried, so every recorded time
//! corresponds to a single invocation.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use arrow::datatypes::Schema;
use bytes::Bytes;
use futures::StreamExt;
use metabench_core::timing::{self, Timed};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::{
  parquet_to_arrow_schema, parquet_to_arrow_schema_by_columns, ParquetRecordBatchStreamBuilder,
  ProjectionMask,
};
use parquet::file::footer;
use parquet::file::metadata::ParquetMetaData;

/// Load the whole file image into memory so decode stages measure parsing, not disk.
pub fn read_file_bytes(path: &Path) -> Result<Bytes> {
  let data =
    std::fs::read(path).with_context(|| format!("reading dataset {}", path.display()))?;
  Ok(Bytes::from(data))
}

/// Decode the footer into in-memory metadata. This is the Thrift decode stage.
pub fn decode_metadata(data: &Bytes) -> Result<Timed<ParquetMetaData>> {
  timing::try_time(|| Ok(footer::parse_metadata(data)?))
}

/// Build the full logical schema from decoded physical metadata.
pub fn build_schema(metadata: &ParquetMetaData) -> Result<Timed<Schema>> {
  let file_metadata = metadata.file_metadata();
  timing::try_time(|| {
    Ok(parquet_to_arrow_schema(
      file_metadata.schema_descr(),
      file_metadata.key_value_metadata(),
    )?)
  })
}

/// Build the logical schema for a subset of root columns.
pub fn build_schema_subset(metadata: &ParquetMetaData, columns: &[usize]) -> Result<Timed<Schema>> {
  let file_metadata = metadata.file_metadata();
  timing::try_time(|| {
    let mask = ProjectionMask::roots(file_metadata.schema_descr(), columns.iter().copied());
    Ok(parquet_to_arrow_schema_by_columns(
      file_metadata.schema_descr(),
      mask,
      file_metadata.key_value_metadata(),
    )?)
  })
}

/// What a statistics traversal saw across every row group and column chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSummary {
  pub chunks_with_stats: usize,
  pub min_max_bytes: u64,
  pub null_count: u64,
}

/// Walk every column chunk's decoded statistics.
pub fn decode_statistics(metadata: &ParquetMetaData) -> Timed<StatsSummary> {
  timing::time(|| {
    let mut summary = StatsSummary::default();
    for row_group in metadata.row_groups() {
      for column in row_group.columns() {
        if let Some(stats) = column.statistics() {
          summary.chunks_with_stats += 1;
          if stats.has_min_max_set() {
            summary.min_max_bytes += (stats.min_bytes().len() + stats.max_bytes().len()) as u64;
          }
          summary.null_count += stats.null_count();
        }
      }
    }
    summary
  })
}

/// Drain every record batch of the file, counting materialized rows.
pub async fn read_full(path: &Path) -> Result<Timed<usize>> {
  let file = tokio::fs::File::open(path).await?;
  let builder = ParquetRecordBatchStreamBuilder::new(file).await?;
  drain(builder.build()?).await
}

/// Drain only the given root columns.
pub async fn read_column_subset(path: &Path, columns: &[usize]) -> Result<Timed<usize>> {
  let file = tokio::fs::File::open(path).await?;
  let builder = ParquetRecordBatchStreamBuilder::new(file).await?;
  let mask = ProjectionMask::roots(builder.parquet_schema(), columns.iter().copied());
  drain(builder.with_projection(mask).build()?).await
}

/// Drain only the given row groups.
pub async fn read_row_groups(path: &Path, groups: Vec<usize>) -> Result<Timed<usize>> {
  let file = tokio::fs::File::open(path).await?;
  let builder = ParquetRecordBatchStreamBuilder::new(file).await?;
  drain(builder.with_row_groups(groups).build()?).await
}

async fn drain<S>(mut stream: S) -> Result<Timed<usize>>
where
  S: futures::Stream<Item = parquet::errors::Result<arrow::record_batch::RecordBatch>> + Unpin,
{
  let start = Instant::now();
  let mut rows = 0usize;
  while let Some(batch) = stream.next().await {
    rows += batch?.num_rows();
  }
  Ok(Timed {
    value: rows,
    elapsed_us: start.elapsed().as_micros() as u64,
  })
}

/// Synchronous open-and-scan of the whole file, used where the end-to-end decode
/// cost itself is the measurement (compression benchmarks).
pub fn read_full_sync(path: &Path) -> Result<Timed<usize>> {
  let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
  timing::try_time(|| {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let mut rows = 0usize;
    for batch in reader {
      rows += batch?.num_rows();
    }
    Ok(rows)
  })
}
