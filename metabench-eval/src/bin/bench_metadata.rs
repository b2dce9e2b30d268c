//! Metadata decode benchmark: footer decode and schema build time across column
//! counts and statistics levels. Each grid point synthesizes its own dataset,
//! measures against the in-memory file image, and the dataset is deleted with the
//! temp-dir guard before the next point.

use anyhow::Result;
use log::info;
use metabench_core::table::ResultTable;
use metabench_eval::config::{BenchConfig, StatsLevel};
use metabench_eval::record::MetadataRecord;
use metabench_eval::stages;
use metabench_eval::synth::TempDataset;

const COLUMN_COUNTS: [usize; 4] = [10, 100, 1000, 10000];
const ROW_COUNT: usize = 10_000;
const OUTPUT_FILE: &str = "metadata_results.csv";

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut results = ResultTable::new();
  for column_count in COLUMN_COUNTS {
    for stats_level in StatsLevel::ALL {
      info!("metadata decode: {column_count} columns, statistics {stats_level}");
      let config = BenchConfig {
        column_count,
        row_count: ROW_COUNT,
        statistics_level: stats_level,
        ..BenchConfig::default()
      };

      let (dataset, _) = TempDataset::create(&config)?;
      let data = stages::read_file_bytes(dataset.path())?;
      let metadata = stages::decode_metadata(&data)?;
      let schema = stages::build_schema(&metadata.value)?;

      results.push(MetadataRecord {
        num_columns: schema.value.fields().len(),
        total_decode_time_us: metadata.elapsed_us + schema.elapsed_us,
        thrift_decode_time_us: metadata.elapsed_us,
        schema_build_time_us: schema.elapsed_us,
        size_bytes: data.len() as u64,
        stats_level,
      });
    }
  }

  results.write_csv(OUTPUT_FILE)?;
  info!("wrote {OUTPUT_FILE}");
  Ok(())
}
