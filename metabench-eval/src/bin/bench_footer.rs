//! Footer representation benchmark: baseline Thrift footer vs. the trimmed
//! re-encoding, compared on encoded size and single-shot decode time.

use anyhow::Result;
use log::info;
use metabench_core::table::ResultTable;
use metabench_eval::config::BenchConfig;
use metabench_eval::footer;
use metabench_eval::record::FooterRecord;
use metabench_eval::stages;
use metabench_eval::synth::TempDataset;

const COLUMN_COUNTS: [usize; 3] = [1000, 3000, 5000];
const ROW_COUNT: usize = 10_000;
const OUTPUT_FILE: &str = "footer_results.csv";

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut results = ResultTable::new();
  for column_count in COLUMN_COUNTS {
    info!("footer representations: {column_count} columns");
    let config = BenchConfig {
      column_count,
      row_count: ROW_COUNT,
      ..BenchConfig::default()
    };

    let (dataset, _) = TempDataset::create(&config)?;
    let data = stages::read_file_bytes(dataset.path())?;
    let metadata = stages::decode_metadata(&data)?;
    let comparison = footer::compare(&data)?;

    results.push(FooterRecord {
      num_columns: column_count,
      num_row_groups: metadata.value.num_row_groups(),
      baseline_size_bytes: comparison.baseline_size_bytes,
      trimmed_size_bytes: comparison.trimmed_size_bytes,
      baseline_decode_time_us: comparison.baseline_decode_time_us,
      trimmed_decode_time_us: comparison.trimmed_decode_time_us,
      reencode_time_us: comparison.reencode_time_us,
    });
  }

  results.write_csv(OUTPUT_FILE)?;
  info!("wrote {OUTPUT_FILE}");
  Ok(())
}
