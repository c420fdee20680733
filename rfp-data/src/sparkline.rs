//! Background sparklines for the metric cards, rendered as SVG data URIs.
//!
//! Samples are placed by elapsed days, interpolated onto a fine grid, smoothed
//! with a Gaussian window and resampled to [`TARGET_POINTS`], so irregular
//! crawl dates land where they belong and long series stay small.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rfp_core::record::DailyTotal;
use serde::Serialize;

pub const CARD_WIDTH: f64 = 280.0;
pub const CARD_HEIGHT: f64 = 120.0;
/// Vertical padding above and below the line.
pub const PADDING: f64 = 15.0;
/// Points in the rendered line.
pub const TARGET_POINTS: usize = 70;

const WINDOW_LEN: usize = 40;
/// Grid samples per output point.
const OVERSAMPLE: usize = 10;

/// Characters left as-is in the data URI besides alphanumerics.
const URI_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Card colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparklineStyle {
    Wealth,
    Count,
    Average,
}

impl SparklineStyle {
    /// (background, fill)
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            SparklineStyle::Wealth => ("#404040", "#1a1a1a"),
            SparklineStyle::Count => ("#3a3a3a", "#222222"),
            SparklineStyle::Average => ("#383838", "#1f1f1f"),
        }
    }
}

/// Sparkline URIs for each metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSparklines {
    pub total_wealth: Option<String>,
    pub billionaire_count: Option<String>,
    pub average_wealth: Option<String>,
}

/// Build the three card sparklines from sorted daily totals.
pub fn card_sparklines(sorted: &[DailyTotal]) -> CardSparklines {
    let dates: Vec<NaiveDate> = sorted.iter().map(|t| t.date).collect();
    let wealth: Vec<f64> = sorted.iter().map(|t| t.total_wealth).collect();
    let count: Vec<f64> = sorted.iter().map(|t| f64::from(t.billionaire_count)).collect();
    let average: Vec<f64> = sorted
        .iter()
        .map(|t| t.total_wealth / f64::from(t.billionaire_count.max(1)))
        .collect();
    CardSparklines {
        total_wealth: sparkline_data_uri(&dates, &wealth, SparklineStyle::Wealth),
        billionaire_count: sparkline_data_uri(&dates, &count, SparklineStyle::Count),
        average_wealth: sparkline_data_uri(&dates, &average, SparklineStyle::Average),
    }
}

fn gaussian_window() -> Vec<f64> {
    let last = (WINDOW_LEN - 1) as f64;
    (0..WINDOW_LEN)
        .map(|i| {
            let t = -2.0 + 4.0 * i as f64 / last;
            (-t * t).exp()
        })
        .collect()
}

/// Linear interpolation of `(xs, ys)` at `x`, clamped to the end values.
/// `xs` must be ascending.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    let hi = xs.partition_point(|&v| v <= x).min(last);
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span <= 0.0 {
        return ys[hi];
    }
    ys[lo] + (ys[hi] - ys[lo]) * (x - xs[lo]) / span
}

/// Smoothed, resampled series of [`TARGET_POINTS`] values.
///
/// `None` unless there are at least two samples spanning at least one day.
pub fn smoothed_series(dates: &[NaiveDate], values: &[f64]) -> Option<Vec<f64>> {
    if dates.len() < 2 || dates.len() != values.len() {
        return None;
    }
    let first = dates[0];
    let span = (dates[dates.len() - 1] - first).num_days();
    if span <= 0 {
        return None;
    }
    let xs: Vec<f64> = dates
        .iter()
        .map(|d| (*d - first).num_days() as f64 / span as f64)
        .collect();

    let interp_len = OVERSAMPLE * TARGET_POINTS - (WINDOW_LEN - 1);
    let grid: Vec<f64> = (0..interp_len + 2 * WINDOW_LEN)
        .map(|i| (i as f64 - WINDOW_LEN as f64) / interp_len as f64)
        .map(|x| interpolate(&xs, values, x))
        .collect();

    // Full convolution sampled every OVERSAMPLE steps, skipping one window at
    // each end.
    let window = gaussian_window();
    let full_len = grid.len() + WINDOW_LEN - 1;
    let series = (WINDOW_LEN..full_len - WINDOW_LEN)
        .step_by(OVERSAMPLE)
        .map(|n| {
            window
                .iter()
                .enumerate()
                .filter_map(|(k, w)| n.checked_sub(k).and_then(|i| grid.get(i)).map(|v| w * v))
                .sum()
        })
        .collect();
    Some(series)
}

/// Card coordinates for a series: x spread across the width, y scaled into
/// the padded height with the minimum at the bottom.
fn coordinates(series: &[f64]) -> Vec<(f64, f64)> {
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let last = series.len().saturating_sub(1).max(1) as f64;
    series
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let normalized = if max > min { (v - min) / (max - min) } else { 0.0 };
            let x = i as f64 / last * CARD_WIDTH;
            let y = CARD_HEIGHT - PADDING - normalized * (CARD_HEIGHT - 2.0 * PADDING);
            (x, y)
        })
        .collect()
}

/// Filled-area sparkline of `values` sampled on `dates`, as a
/// `data:image/svg+xml,` URI.
pub fn sparkline_data_uri(
    dates: &[NaiveDate],
    values: &[f64],
    style: SparklineStyle,
) -> Option<String> {
    let series = smoothed_series(dates, values)?;
    let points: Vec<String> = coordinates(&series)
        .into_iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect();

    let (light, dark) = style.colors();
    let polygon = format!(
        "0,{h} {} {w},{h}",
        points.join(" "),
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    );
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="{light}"/><polygon points="{polygon}" fill="{dark}" stroke="none"/></svg>"#,
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    );
    Some(format!(
        "data:image/svg+xml,{}",
        utf8_percent_encode(&svg, URI_SAFE)
    ))
}
