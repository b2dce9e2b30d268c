//! Wall-clock measurement of a single operation.
//!
//! Measurements are single-shot: a failed operation is reported as an error, never
//! retried, so the recorded time always corresponds to exactly one invocation.

use std::time::Instant;

use anyhow::Result;

/// The value produced by an operation together with its elapsed wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed<T> {
  pub value: T,
  pub elapsed_us: u64,
}

impl<T> Timed<T> {
  /// Map the carried value, keeping the measurement.
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
    Timed {
      value: f(self.value),
      elapsed_us: self.elapsed_us,
    }
  }
}

/// Run `op` and measure only the call itself.
///
/// Setup and teardown belong outside the closure.
pub fn time<T>(op: impl FnOnce() -> T) -> Timed<T> {
  let start = Instant::now();
  let value = op();
  let elapsed_us = start.elapsed().as_micros() as u64;
  Timed { value, elapsed_us }
}

/// Run a fallible `op` and measure only the call itself.
///
/// An error aborts the measurement; no partial timing is reported.
pub fn try_time<T>(op: impl FnOnce() -> Result<T>) -> Result<Timed<T>> {
  let start = Instant::now();
  let value = op()?;
  let elapsed_us = start.elapsed().as_micros() as u64;
  Ok(Timed { value, elapsed_us })
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[test]
  fn test_reports_value_and_elapsed() {
    let timed = time(|| 7 * 6);
    assert_eq!(timed.value, 42);
  }

  #[test]
  fn test_elapsed_covers_sleep() {
    let timed = time(|| std::thread::sleep(Duration::from_millis(5)));
    assert!(timed.elapsed_us >= 5_000);
  }

  #[test]
  fn test_error_propagates() {
    let result = try_time(|| -> Result<()> { anyhow::bail!("external call failed") });
    assert!(result.is_err());
  }

  #[test]
  fn test_map_keeps_measurement() {
    let timed = time(|| vec![1u8, 2, 3]).map(|v| v.len());
    assert_eq!(timed.value, 3);
  }
}
