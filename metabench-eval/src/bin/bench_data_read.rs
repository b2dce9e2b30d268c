//! Data read benchmark: metadata decode, full scan, random column-subset read and
//! row-group-subset read per column count. Reads go through the async reader and
//! are driven to completion on a current-thread runtime.

use anyhow::Result;
use log::info;
use metabench_core::table::ResultTable;
use metabench_eval::config::BenchConfig;
use metabench_eval::record::DataReadRecord;
use metabench_eval::stages;
use metabench_eval::synth::TempDataset;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const COLUMN_COUNTS: [usize; 4] = [10, 100, 1000, 2000];
const ROW_COUNT: usize = 100_000;
const SUBSET_SEED: u64 = 11;
const OUTPUT_FILE: &str = "data_read_results.csv";

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let runtime = tokio::runtime::Builder::new_current_thread().build()?;

  let mut results = ResultTable::new();
  for column_count in COLUMN_COUNTS {
    info!("data reads: {column_count} columns");
    let config = BenchConfig {
      column_count,
      row_count: ROW_COUNT,
      ..BenchConfig::default()
    };

    let (dataset, _) = TempDataset::create(&config)?;
    let data = stages::read_file_bytes(dataset.path())?;
    let metadata = stages::decode_metadata(&data)?;

    // half the columns, chosen without replacement
    let mut rng = SmallRng::seed_from_u64(SUBSET_SEED);
    let columns = rand::seq::index::sample(&mut rng, column_count, column_count / 2).into_vec();

    let num_row_groups = metadata.value.num_row_groups();
    let step = (num_row_groups / 10).max(1);
    let groups: Vec<usize> = (0..num_row_groups).step_by(step).collect();

    let full = runtime.block_on(stages::read_full(dataset.path()))?;
    let subset = runtime.block_on(stages::read_column_subset(dataset.path(), &columns))?;
    let row_groups = runtime.block_on(stages::read_row_groups(dataset.path(), groups))?;

    results.push(DataReadRecord {
      num_columns: column_count,
      num_rows: full.value,
      metadata_decode_time_us: metadata.elapsed_us,
      full_read_time_us: full.elapsed_us,
      column_subset_read_time_us: subset.elapsed_us,
      row_group_read_time_us: row_groups.elapsed_us,
    });
  }

  results.write_csv(OUTPUT_FILE)?;
  info!("wrote {OUTPUT_FILE}");
  Ok(())
}
