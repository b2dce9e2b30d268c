//! Prints the first rows of a Parquet file, for eyeballing synthesized datasets.

use std::fs::File;

use anyhow::Result;
use arrow::util::pretty::print_batches;
use clap::Parser;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  /// Parquet file to display
  input: String,
  /// Number of rows to display
  #[clap(long, default_value_t = 20)]
  rows: usize,
}

fn main() -> Result<()> {
  let args = Args::parse();

  let file = File::open(&args.input)?;
  let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)?
    .with_batch_size(args.rows)
    .build()?;

  if let Some(batch) = reader.next() {
    print_batches(&[batch?])?;
  } else {
    println!("{} holds no rows", args.input);
  }
  Ok(())
}
