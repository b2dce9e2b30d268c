//! This crate implements the Parquet side of the benchmark pipeline, including:
//! - Synthetic dataset generation through the Arrow writer
//! - Timed decode, schema-build, statistics and read stages over the Parquet reader
//! - The footer representation comparison (baseline Thrift vs. trimmed re-encoding)
//! - Per-benchmark measurement records and chart rendering

#[cfg(test)]
mod test;

pub mod chart;
pub mod config;
pub mod footer;
pub mod record;
pub mod report;
pub mod stages;
pub mod synth;
