//! Schema build benchmark: full schema vs. a leading-column subset per column
//! count. The subset covers max(10, n/10) columns, so the relative cost of partial
//! schema construction stays visible at every width.

use anyhow::Result;
use log::info;
use metabench_core::table::ResultTable;
use metabench_eval::config::BenchConfig;
use metabench_eval::record::SchemaRecord;
use metabench_eval::stages;
use metabench_eval::synth::TempDataset;

const COLUMN_COUNTS: [usize; 4] = [10, 100, 1000, 10000];
const ROW_COUNT: usize = 10_000;
const OUTPUT_FILE: &str = "schema_results.csv";

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut results = ResultTable::new();
  for column_count in COLUMN_COUNTS {
    info!("schema build: {column_count} columns");
    let config = BenchConfig {
      column_count,
      row_count: ROW_COUNT,
      ..BenchConfig::default()
    };
    let (dataset, _) = TempDataset::create(&config)?;
    let data = stages::read_file_bytes(dataset.path())?;

    // full schema
    let metadata = stages::decode_metadata(&data)?;
    let schema = stages::build_schema(&metadata.value)?;
    results.push(SchemaRecord {
      total_columns: column_count,
      schema_columns: schema.value.fields().len(),
      total_time: metadata.elapsed_us + schema.elapsed_us,
      thrift_time: metadata.elapsed_us,
      schema_time: schema.elapsed_us,
      is_subset: false,
    });

    // leading-column subset, metadata decoded afresh so both rows measure the
    // same cold path
    let metadata = stages::decode_metadata(&data)?;
    let subset_size = (column_count / 10).max(10).min(column_count);
    let columns: Vec<usize> = (0..subset_size).collect();
    let schema = stages::build_schema_subset(&metadata.value, &columns)?;
    results.push(SchemaRecord {
      total_columns: column_count,
      schema_columns: schema.value.fields().len(),
      total_time: metadata.elapsed_us + schema.elapsed_us,
      thrift_time: metadata.elapsed_us,
      schema_time: schema.elapsed_us,
      is_subset: true,
    });
  }

  results.write_csv(OUTPUT_FILE)?;
  info!("wrote {OUTPUT_FILE}");
  Ok(())
}
