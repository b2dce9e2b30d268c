//! Row-group / page-size trade-off benchmark: the full write-and-decode grid over
//! column counts, row-group sizes, page sizes and statistics on/off, with snappy
//! compression throughout.

use anyhow::Result;
use log::info;
use metabench_core::table::ResultTable;
use metabench_eval::config::{BenchConfig, Codec, StatsLevel};
use metabench_eval::record::RowGroupRecord;
use metabench_eval::stages;
use metabench_eval::synth::TempDataset;

const COLUMN_COUNTS: [usize; 3] = [10, 100, 1000];
const ROW_COUNT: usize = 10_000;
const ROW_GROUP_SIZES: [usize; 4] = [1000, 2000, 5000, 10000];
const PAGE_SIZES: [usize; 4] = [8 * 1024, 64 * 1024, 1024 * 1024, 8 * 1024 * 1024];
const STATS_LEVELS: [StatsLevel; 2] = [StatsLevel::None, StatsLevel::Page];
const OUTPUT_FILE: &str = "row_group_results.csv";

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut results = ResultTable::new();
  for column_count in COLUMN_COUNTS {
    for row_group_size in ROW_GROUP_SIZES {
      for page_size in PAGE_SIZES {
        for stats_level in STATS_LEVELS {
          info!(
            "row groups: {column_count} columns, {row_group_size} rows/group, \
             {page_size} byte pages, statistics {stats_level}"
          );
          let config = BenchConfig {
            column_count,
            row_count: ROW_COUNT,
            row_group_size: Some(row_group_size),
            page_size: Some(page_size),
            statistics_level: stats_level,
            compression: Codec::Snappy,
            ..BenchConfig::default()
          };

          let (dataset, write) = TempDataset::create(&config)?;
          let data = stages::read_file_bytes(dataset.path())?;
          let metadata = stages::decode_metadata(&data)?;
          let schema = stages::build_schema(&metadata.value)?;
          let stats = stages::decode_statistics(&metadata.value);

          results.push(RowGroupRecord {
            num_columns: column_count,
            num_rows: ROW_COUNT,
            row_group_size,
            page_size,
            stats_level,
            write_time_us: write.elapsed_us,
            total_decode_time_us: metadata.elapsed_us + schema.elapsed_us,
            thrift_decode_time_us: metadata.elapsed_us,
            schema_build_time_us: schema.elapsed_us,
            stats_decode_time_us: stats.elapsed_us,
            file_size_bytes: write.value,
          });
        }
      }
    }
  }

  results.write_csv(OUTPUT_FILE)?;
  info!("wrote {OUTPUT_FILE}");
  Ok(())
}
