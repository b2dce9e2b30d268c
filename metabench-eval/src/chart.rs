//! Chart toolkit shared by every render subcommand.
//!
//! Two chart forms cover the whole report family: log-log trend lines with point
//! markers, and grouped bars with an optional logarithmic value axis. Styling is
//! configured per call; there is no global plot state.

use std::ops::Range;
use std::path::Path;

use anyhow::{ensure, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (1280, 720);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);

/// A labeled sequence of (x, y) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
  pub label: String,
  pub points: Vec<(f64, f64)>,
}

impl Series {
  pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
    Self {
      label: label.into(),
      points,
    }
  }
}

/// A labeled value per category, for grouped bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
  pub label: String,
  pub values: Vec<f64>,
}

impl BarSeries {
  pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
    Self {
      label: label.into(),
      values,
    }
  }
}

fn log_bounds(series: &[Series]) -> Result<(Range<f64>, Range<f64>)> {
  let mut x_min = f64::INFINITY;
  let mut x_max = f64::NEG_INFINITY;
  let mut y_min = f64::INFINITY;
  let mut y_max = f64::NEG_INFINITY;
  for series in series {
    for &(x, y) in &series.points {
      x_min = x_min.min(x);
      x_max = x_max.max(x);
      y_min = y_min.min(y);
      y_max = y_max.max(y);
    }
  }
  ensure!(x_min.is_finite() && y_min.is_finite(), "no data points to plot");
  ensure!(
    x_min > 0.0 && y_min > 0.0,
    "log-scale chart requires positive values"
  );
  Ok((x_min * 0.8..x_max * 1.25, y_min * 0.8..y_max * 1.25))
}

/// Trend lines with point markers on log-log axes.
pub fn line_chart_log_log(
  path: &Path,
  title: &str,
  x_desc: &str,
  y_desc: &str,
  series: &[Series],
) -> Result<()> {
  ensure!(!series.is_empty(), "no series to plot");
  let (x_range, y_range) = log_bounds(series)?;

  let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
  root.fill(&WHITE)?;

  let mut chart = ChartBuilder::on(&root)
    .caption(title, CAPTION_FONT)
    .margin(16)
    .x_label_area_size(48)
    .y_label_area_size(72)
    .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())?;

  chart
    .configure_mesh()
    .x_desc(x_desc)
    .y_desc(y_desc)
    .draw()?;

  for (index, series) in series.iter().enumerate() {
    let color = Palette99::pick(index);
    let legend_color = Palette99::pick(index);
    chart
      .draw_series(LineSeries::new(
        series.points.iter().copied(),
        color.stroke_width(2),
      ))?
      .label(series.label.clone())
      .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], legend_color.stroke_width(2)));
    chart.draw_series(
      series
        .points
        .iter()
        .map(|&point| Circle::new(point, 3, color.filled())),
    )?;
  }

  chart
    .configure_series_labels()
    .background_style(&WHITE.mix(0.8))
    .border_style(&BLACK)
    .draw()?;
  root.present()?;
  Ok(())
}

/// Grouped bars: one group per category, one bar per series within each group.
pub fn grouped_bar_chart(
  path: &Path,
  title: &str,
  x_desc: &str,
  y_desc: &str,
  categories: &[String],
  series: &[BarSeries],
  log_y: bool,
) -> Result<()> {
  ensure!(!categories.is_empty(), "no categories to plot");
  ensure!(!series.is_empty(), "no series to plot");
  for series in series {
    ensure!(
      series.values.len() == categories.len(),
      "series {:?} does not cover every category",
      series.label
    );
  }

  let y_max = series
    .iter()
    .flat_map(|s| s.values.iter().copied())
    .fold(0.0f64, f64::max);
  ensure!(y_max > 0.0, "no positive values to plot");

  let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
  root.fill(&WHITE)?;

  let x_range = -0.6f64..categories.len() as f64 - 0.4;

  if log_y {
    let y_min = series
      .iter()
      .flat_map(|s| s.values.iter().copied())
      .filter(|value| *value > 0.0)
      .fold(f64::INFINITY, f64::min);
    let floor = y_min * 0.5;

    let mut chart = ChartBuilder::on(&root)
      .caption(title, CAPTION_FONT)
      .margin(16)
      .x_label_area_size(48)
      .y_label_area_size(72)
      .build_cartesian_2d(x_range, (floor..y_max * 2.0).log_scale())?;
    chart
      .configure_mesh()
      .disable_x_mesh()
      .x_labels(categories.len())
      .x_label_formatter(&|x| category_label(categories, *x))
      .x_desc(x_desc)
      .y_desc(y_desc)
      .draw()?;
    draw_bar_series(&mut chart, series, floor)?;
    chart
      .configure_series_labels()
      .background_style(&WHITE.mix(0.8))
      .border_style(&BLACK)
      .draw()?;
  } else {
    let mut chart = ChartBuilder::on(&root)
      .caption(title, CAPTION_FONT)
      .margin(16)
      .x_label_area_size(48)
      .y_label_area_size(72)
      .build_cartesian_2d(x_range, 0.0..y_max * 1.2)?;
    chart
      .configure_mesh()
      .disable_x_mesh()
      .x_labels(categories.len())
      .x_label_formatter(&|x| category_label(categories, *x))
      .x_desc(x_desc)
      .y_desc(y_desc)
      .draw()?;
    draw_bar_series(&mut chart, series, 0.0)?;
    chart
      .configure_series_labels()
      .background_style(&WHITE.mix(0.8))
      .border_style(&BLACK)
      .draw()?;
  }

  root.present()?;
  Ok(())
}

fn draw_bar_series<Y>(
  chart: &mut ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, Y>>,
  series: &[BarSeries],
  baseline: f64,
) -> Result<()>
where
  Y: Ranged<ValueType = f64>,
{
  let group_width = 0.8;
  let bar_width = group_width / series.len() as f64;

  for (series_index, series) in series.iter().enumerate() {
    let color = Palette99::pick(series_index);
    let bars = series
      .values
      .iter()
      .enumerate()
      .filter(|(_, value)| **value > baseline)
      .map(|(category_index, &value)| {
        let left = category_index as f64 - group_width / 2.0 + series_index as f64 * bar_width;
        Rectangle::new([(left, baseline), (left + bar_width, value)], color.filled())
      });
    chart
      .draw_series(bars)?
      .label(series.label.clone())
      .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
  }
  Ok(())
}

fn category_label(categories: &[String], x: f64) -> String {
  let index = x.round();
  if index < 0.0 || (x - index).abs() > 0.3 {
    return String::new();
  }
  categories.get(index as usize).cloned().unwrap_or_default()
}
