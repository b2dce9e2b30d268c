//! Measurement records.
//!
//! One struct per benchmark binary; the field set is the fixed column schema of
//! that binary's result table. Times are raw microseconds and sizes raw bytes;
//! unit conversion belongs to the renderer.

use serde::{Deserialize, Serialize};

use crate::config::{Codec, StatsLevel};

/// Row schema of `metadata_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
  pub num_columns: usize,
  pub total_decode_time_us: u64,
  pub thrift_decode_time_us: u64,
  pub schema_build_time_us: u64,
  pub size_bytes: u64,
  pub stats_level: StatsLevel,
}

/// Row schema of `compression_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionRecord {
  pub algorithm: Codec,
  pub num_columns: usize,
  pub num_rows: usize,
  pub encode_time_us: u64,
  pub decode_time_us: u64,
  pub compressed_size_bytes: u64,
}

/// Row schema of `data_read_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataReadRecord {
  pub num_columns: usize,
  pub num_rows: usize,
  pub metadata_decode_time_us: u64,
  pub full_read_time_us: u64,
  pub column_subset_read_time_us: u64,
  pub row_group_read_time_us: u64,
}

/// Row schema of `row_group_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGroupRecord {
  pub num_columns: usize,
  pub num_rows: usize,
  pub row_group_size: usize,
  pub page_size: usize,
  pub stats_level: StatsLevel,
  pub write_time_us: u64,
  pub total_decode_time_us: u64,
  pub thrift_decode_time_us: u64,
  pub schema_build_time_us: u64,
  pub stats_decode_time_us: u64,
  pub file_size_bytes: u64,
}

/// Row schema of `schema_results.csv`. Times are microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
  pub total_columns: usize,
  pub schema_columns: usize,
  pub total_time: u64,
  pub thrift_time: u64,
  pub schema_time: u64,
  pub is_subset: bool,
}

/// Row schema of `footer_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterRecord {
  pub num_columns: usize,
  pub num_row_groups: usize,
  pub baseline_size_bytes: u64,
  pub trimmed_size_bytes: u64,
  pub baseline_decode_time_us: u64,
  pub trimmed_decode_time_us: u64,
  pub reencode_time_us: u64,
}
