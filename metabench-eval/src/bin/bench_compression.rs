//! Compression benchmark: write (encode) time, full-scan (decode) time and
//! compressed file size per codec and column count.

use anyhow::Result;
use log::info;
use metabench_core::table::ResultTable;
use metabench_eval::config::{BenchConfig, Codec};
use metabench_eval::record::CompressionRecord;
use metabench_eval::stages;
use metabench_eval::synth::TempDataset;

const COLUMN_COUNTS: [usize; 4] = [10, 100, 1000, 10000];
const ROW_COUNT: usize = 10_000;
const OUTPUT_FILE: &str = "compression_results.csv";

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let mut results = ResultTable::new();
  for column_count in COLUMN_COUNTS {
    for algorithm in Codec::ALL {
      info!("compression: {column_count} columns, {algorithm}");
      let config = BenchConfig {
        column_count,
        row_count: ROW_COUNT,
        compression: algorithm,
        ..BenchConfig::default()
      };

      let (dataset, write) = TempDataset::create(&config)?;
      let decode = stages::read_full_sync(dataset.path())?;

      results.push(CompressionRecord {
        algorithm,
        num_columns: column_count,
        num_rows: decode.value,
        encode_time_us: write.elapsed_us,
        decode_time_us: decode.elapsed_us,
        compressed_size_bytes: write.value,
      });
    }
  }

  results.write_csv(OUTPUT_FILE)?;
  info!("wrote {OUTPUT_FILE}");
  Ok(())
}
