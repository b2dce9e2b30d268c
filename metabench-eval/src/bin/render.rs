//! Renders charts from previously recorded result tables. One subcommand per
//! chart family; each takes the CSV path(s) a benchmark binary wrote and draws
//! PNGs into the output directory, creating it if absent.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use metabench_eval::report;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  #[clap(subcommand)]
  chart: Chart,
  /// Directory the chart images are written to, created if absent
  #[clap(long, global = true, default_value = report::DEFAULT_OUT_DIR)]
  out_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Chart {
  /// Metadata decode time, file size and per-column trends
  Metadata { input: PathBuf },
  /// Compression codec encode/decode time and compressed size
  Compression {
    #[clap(required = true)]
    inputs: Vec<PathBuf>,
  },
  /// Data read operation comparison
  DataRead {
    #[clap(required = true)]
    inputs: Vec<PathBuf>,
  },
  /// Row-group / page-size trade-offs
  RowGroups { input: PathBuf },
  /// Full vs. subset schema build time
  Schema { input: PathBuf },
  /// Footer representation comparison
  Footer { input: PathBuf },
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args = Args::parse();
  match &args.chart {
    Chart::Metadata { input } => report::render_metadata(input, &args.out_dir)?,
    Chart::Compression { inputs } => report::render_compression(inputs, &args.out_dir)?,
    Chart::DataRead { inputs } => report::render_data_read(inputs, &args.out_dir)?,
    Chart::RowGroups { input } => report::render_row_groups(input, &args.out_dir)?,
    Chart::Schema { input } => report::render_schema(input, &args.out_dir)?,
    Chart::Footer { input } => report::render_footer(input, &args.out_dir)?,
  }
  info!("charts written to {}", args.out_dir.display());
  Ok(())
}
