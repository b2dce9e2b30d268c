//! Benchmark run configuration.
//!
//! Every benchmark binary builds one [`BenchConfig`] per grid point and treats it as
//! immutable for the rest of the run: the synthesizer derives the dataset shape and
//! the writer properties from it, and the file name scheme ensures repeated runs do
//! not collide on disk.

use std::fmt;

use parquet::basic::{BrotliLevel, Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::EnabledStatistics;
use serde::{Deserialize, Serialize};

/// Granularity at which per-column min/max/null-count statistics are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsLevel {
  None,
  Chunk,
  Page,
}

impl StatsLevel {
  pub const ALL: [StatsLevel; 3] = [StatsLevel::None, StatsLevel::Chunk, StatsLevel::Page];

  pub fn to_enabled(self) -> EnabledStatistics {
    match self {
      StatsLevel::None => EnabledStatistics::None,
      StatsLevel::Chunk => EnabledStatistics::Chunk,
      StatsLevel::Page => EnabledStatistics::Page,
    }
  }
}

impl fmt::Display for StatsLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      StatsLevel::None => "none",
      StatsLevel::Chunk => "chunk",
      StatsLevel::Page => "page",
    };
    f.write_str(name)
  }
}

/// Compression codecs under comparison. Levels are the library defaults: the
/// benchmark measures codec choice, not level tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
  Uncompressed,
  Snappy,
  Gzip,
  Brotli,
  Zstd,
}

impl Codec {
  pub const ALL: [Codec; 5] = [
    Codec::Uncompressed,
    Codec::Snappy,
    Codec::Gzip,
    Codec::Brotli,
    Codec::Zstd,
  ];

  pub fn to_compression(self) -> Compression {
    match self {
      Codec::Uncompressed => Compression::UNCOMPRESSED,
      Codec::Snappy => Compression::SNAPPY,
      Codec::Gzip => Compression::GZIP(GzipLevel::default()),
      Codec::Brotli => Compression::BROTLI(BrotliLevel::default()),
      Codec::Zstd => Compression::ZSTD(ZstdLevel::default()),
    }
  }
}

impl fmt::Display for Codec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Codec::Uncompressed => "uncompressed",
      Codec::Snappy => "snappy",
      Codec::Gzip => "gzip",
      Codec::Brotli => "brotli",
      Codec::Zstd => "zstd",
    };
    f.write_str(name)
  }
}

/// Distribution of the synthesized float32 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueDistribution {
  /// Uniform over [-1000, 1000).
  Uniform,
  /// Standard normal, a poorly compressible payload.
  Normal,
}

/// One benchmark grid point. Immutable once chosen for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
  pub column_count: usize,
  pub row_count: usize,
  /// Write-time horizontal chunking; the library default when absent.
  pub row_group_size: Option<usize>,
  /// Intra-chunk page splitting in bytes; the library default when absent.
  pub page_size: Option<usize>,
  pub statistics_level: StatsLevel,
  pub compression: Codec,
  pub distribution: ValueDistribution,
}

impl Default for BenchConfig {
  fn default() -> Self {
    Self {
      column_count: 10,
      row_count: 10_000,
      row_group_size: None,
      page_size: None,
      statistics_level: StatsLevel::Chunk,
      compression: Codec::Uncompressed,
      distribution: ValueDistribution::Uniform,
    }
  }
}

impl BenchConfig {
  /// File name encoding every field that changes the on-disk artifact, so two grid
  /// points never share a path.
  pub fn file_name(&self) -> String {
    let mut name = format!("float32_{}cols_{}rows", self.column_count, self.row_count);
    if let Some(row_group_size) = self.row_group_size {
      name.push_str(&format!("_{row_group_size}rg"));
    }
    if let Some(page_size) = self.page_size {
      name.push_str(&format!("_{page_size}ps"));
    }
    name.push_str(&format!(
      "_{}sl_{}.parquet",
      self.statistics_level, self.compression
    ));
    name
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_file_names_do_not_collide() {
    let base = BenchConfig::default();
    let variants = [
      BenchConfig {
        column_count: 100,
        ..base.clone()
      },
      BenchConfig {
        row_group_size: Some(1000),
        ..base.clone()
      },
      BenchConfig {
        page_size: Some(8192),
        ..base.clone()
      },
      BenchConfig {
        statistics_level: StatsLevel::Page,
        ..base.clone()
      },
      BenchConfig {
        compression: Codec::Zstd,
        ..base.clone()
      },
    ];
    for variant in &variants {
      assert_ne!(variant.file_name(), base.file_name());
    }
  }

  #[test]
  fn test_stats_level_maps_to_library_enum() {
    assert_eq!(StatsLevel::None.to_enabled(), EnabledStatistics::None);
    assert_eq!(StatsLevel::Page.to_enabled(), EnabledStatistics::Page);
  }
}
