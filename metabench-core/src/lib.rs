//! This crate provides the format-agnostic benchmark pipeline used by the evaluation tools:
//! - A timed-operation runner wrapping a monotonic clock around a single external call
//! - An append-only result table persisted as a delimited file with a fixed header
//! - Pure unit conversions applied by the report renderer

pub mod table;
pub mod timing;
pub mod units;
