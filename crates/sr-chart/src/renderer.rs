//! Chart renderer implementation.

use crate::chart::{ChartConfig, RenderedChart};
use crate::error::{RenderError, Result};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use sr_analysis::{series, AnalysisResult, ChartKind};
use sr_data::Table;
use std::fs;
use tracing::{debug, info};

/// Maximum label length before truncation on rotated category axes.
const MAX_CATEGORY_LABEL: usize = 14;
/// Maximum label length on the horizontal ranking axis.
const MAX_RANK_LABEL: usize = 18;

/// Stateless chart renderer.
///
/// One call per analysis; each call allocates one transient PNG owned by the
/// returned [`RenderedChart`].
pub struct Renderer {
    config: ChartConfig,
}

impl Renderer {
    /// Create a renderer with the given size configuration.
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Render one analysis result into a chart image.
    pub fn render(&self, result: &AnalysisResult) -> Result<RenderedChart> {
        if result.series.is_empty() {
            return Err(RenderError::EmptySeries {
                title: result.title.clone(),
            });
        }
        debug!(title = %result.title, chart = ?result.chart, "rendering chart");

        let temp = tempfile::Builder::new()
            .prefix("sr-chart-")
            .suffix(".png")
            .tempfile()
            .map_err(|source| RenderError::Resource {
                title: result.title.clone(),
                source,
            })?;

        {
            let root = BitMapBackend::new(temp.path(), (self.config.width_px, self.config.height_px))
                .into_drawing_area();
            root.fill(&WHITE)
                .map_err(draw_failure(&result.title))?;

            match result.chart {
                ChartKind::Histogram => draw_histogram(&root, result)?,
                ChartKind::Boxplot => draw_boxplot(&root, result)?,
                ChartKind::Bars => draw_bars(&root, result, false)?,
                ChartKind::RotatedBars => draw_bars(&root, result, true)?,
                ChartKind::HorizontalBars => draw_horizontal_bars(&root, result)?,
            }

            root.present().map_err(draw_failure(&result.title))?;
        }

        let image_bytes = fs::read(temp.path()).map_err(|source| RenderError::Resource {
            title: result.title.clone(),
            source,
        })?;
        info!(
            title = %result.title,
            bytes = image_bytes.len(),
            path = %temp.path().display(),
            "chart rendered"
        );
        Ok(RenderedChart::new(
            result.title.clone(),
            result.summary.clone(),
            image_bytes,
            temp,
        ))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}

fn draw_failure<E: std::fmt::Display>(title: &str) -> impl Fn(E) -> RenderError + '_ {
    move |err| RenderError::Draw {
        title: title.to_string(),
        reason: err.to_string(),
    }
}

fn numbers(table: &Table, column: &str, title: &str) -> Result<Vec<f64>> {
    Ok(table
        .column(column)
        .map_err(|source| RenderError::Series {
            title: title.to_string(),
            source,
        })?
        .numbers()
        .into_iter()
        .flatten()
        .collect())
}

fn labels(table: &Table, title: &str) -> Result<Vec<String>> {
    Ok(table
        .column(series::LABEL)
        .map_err(|source| RenderError::Series {
            title: title.to_string(),
            source,
        })?
        .labels()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Shorten a label for a crowded axis.
fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let kept: String = label.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Format a tick only when it falls on a category index.
fn category_tick(display: &[String]) -> impl Fn(&f64) -> String + '_ {
    move |x| {
        let nearest = x.round();
        if (x - nearest).abs() > 0.25 || nearest < 0.0 {
            return String::new();
        }
        display.get(nearest as usize).cloned().unwrap_or_default()
    }
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    result: &AnalysisResult,
) -> Result<()> {
    let starts = numbers(&result.series, series::BIN_START, &result.title)?;
    let ends = numbers(&result.series, series::BIN_END, &result.title)?;
    let counts = numbers(&result.series, series::COUNT, &result.title)?;

    let x_min = starts.first().copied().unwrap_or(0.0);
    let x_max = ends.last().copied().unwrap_or(1.0);
    let y_max = counts.iter().copied().fold(0.0, f64::max).max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(&result.title, ("sans-serif", 30))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)
        .map_err(draw_failure(&result.title))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Frequency")
        .draw()
        .map_err(draw_failure(&result.title))?;

    chart
        .draw_series(
            starts
                .iter()
                .zip(&ends)
                .zip(&counts)
                .map(|((&start, &end), &count)| {
                    Rectangle::new([(start, 0.0), (end, count)], BLUE.mix(0.5).filled())
                }),
        )
        .map_err(draw_failure(&result.title))?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    result: &AnalysisResult,
    rotated: bool,
) -> Result<()> {
    let raw_labels = labels(&result.series, &result.title)?;
    let totals = numbers(&result.series, series::TOTAL, &result.title)?;
    let n = raw_labels.len();

    // Long category labels are rotated and truncated; bucket labels are not.
    let display: Vec<String> = if rotated {
        raw_labels
            .iter()
            .map(|l| truncate_label(l, MAX_CATEGORY_LABEL))
            .collect()
    } else {
        raw_labels
    };

    let y_max = totals.iter().copied().fold(0.0, f64::max).max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(&result.title, ("sans-serif", 30))
        .margin(12)
        .x_label_area_size(if rotated { 96 } else { 48 })
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
        .map_err(draw_failure(&result.title))?;

    let tick = category_tick(&display);
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(n.max(1))
        .x_label_formatter(&tick)
        .y_desc("Total sales");
    if rotated {
        mesh.x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90));
    }
    mesh.draw().map_err(draw_failure(&result.title))?;

    chart
        .draw_series(totals.iter().enumerate().map(|(i, &total)| {
            let x = i as f64;
            Rectangle::new([(x - 0.35, 0.0), (x + 0.35, total)], BLUE.mix(0.6).filled())
        }))
        .map_err(draw_failure(&result.title))?;
    Ok(())
}

fn draw_boxplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    result: &AnalysisResult,
) -> Result<()> {
    let display = labels(&result.series, &result.title)?;
    let lo = numbers(&result.series, series::WHISKER_LO, &result.title)?;
    let q1 = numbers(&result.series, series::Q1, &result.title)?;
    let median = numbers(&result.series, series::MEDIAN, &result.title)?;
    let q3 = numbers(&result.series, series::Q3, &result.title)?;
    let hi = numbers(&result.series, series::WHISKER_HI, &result.title)?;
    let n = display.len();

    let y_min = lo.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = hi.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = ((y_max - y_min) * 0.05).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(&result.title, ("sans-serif", 30))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), (y_min - pad)..(y_max + pad))
        .map_err(draw_failure(&result.title))?;

    let tick = category_tick(&display);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.max(1))
        .x_label_formatter(&tick)
        .y_desc("Sales")
        .draw()
        .map_err(draw_failure(&result.title))?;

    // Whiskers, caps and median lines.
    let mut lines: Vec<PathElement<(f64, f64)>> = Vec::new();
    for i in 0..n {
        let x = i as f64;
        lines.push(PathElement::new(vec![(x, lo[i]), (x, q1[i])], &BLACK));
        lines.push(PathElement::new(vec![(x, q3[i]), (x, hi[i])], &BLACK));
        lines.push(PathElement::new(vec![(x - 0.15, lo[i]), (x + 0.15, lo[i])], &BLACK));
        lines.push(PathElement::new(vec![(x - 0.15, hi[i]), (x + 0.15, hi[i])], &BLACK));
        lines.push(PathElement::new(
            vec![(x - 0.25, median[i]), (x + 0.25, median[i])],
            BLACK,
        ));
    }
    chart
        .draw_series(lines)
        .map_err(draw_failure(&result.title))?;

    // Interquartile boxes: fill plus outline.
    chart
        .draw_series((0..n).map(|i| {
            let x = i as f64;
            Rectangle::new([(x - 0.25, q1[i]), (x + 0.25, q3[i])], BLUE.mix(0.35).filled())
        }))
        .map_err(draw_failure(&result.title))?;
    chart
        .draw_series((0..n).map(|i| {
            let x = i as f64;
            Rectangle::new([(x - 0.25, q1[i]), (x + 0.25, q3[i])], &BLACK)
        }))
        .map_err(draw_failure(&result.title))?;
    Ok(())
}

fn draw_horizontal_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    result: &AnalysisResult,
) -> Result<()> {
    let raw_labels = labels(&result.series, &result.title)?;
    let totals = numbers(&result.series, series::TOTAL, &result.title)?;
    let n = raw_labels.len();

    // Rank 0 (largest) draws at the top of the axis.
    let display: Vec<String> = raw_labels
        .iter()
        .rev()
        .map(|l| truncate_label(l, MAX_RANK_LABEL))
        .collect();
    let x_max = totals.iter().copied().fold(0.0, f64::max).max(1.0) * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(&result.title, ("sans-serif", 30))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(170)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))
        .map_err(draw_failure(&result.title))?;

    let tick = category_tick(&display);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n.max(1))
        .y_label_formatter(&tick)
        .x_desc("Total sales")
        .draw()
        .map_err(draw_failure(&result.title))?;

    chart
        .draw_series(totals.iter().enumerate().map(|(rank, &total)| {
            let y = (n - 1 - rank) as f64;
            Rectangle::new([(0.0, y - 0.35), (total, y + 0.35)], BLUE.mix(0.6).filled())
        }))
        .map_err(draw_failure(&result.title))?;
    Ok(())
}
