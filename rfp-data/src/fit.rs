//! Exponential curve fitting for the trend line.
//!
//! The fit is a least-squares line through `ln(value)` against days since the
//! first observation, i.e. `value = a * e^(b * days)`.

use chrono::{Duration, NaiveDate};
use rfp_core::chart_data::{FitParams, TimePoint};
use rfp_utils::dates::format_date;

/// Number of points in a generated trend line.
pub const TREND_LINE_POINTS: usize = 100;

/// Days per year used to annualize the daily growth exponent.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A single observation in fit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Days since the first observation.
    pub days: f64,
    pub value: f64,
}

/// Fit `value = a * e^(b * days)` over the strictly positive samples.
///
/// With fewer than two positive samples the fit is the identity
/// (`a = 1, b = 0`) with zero R² and growth.
pub fn exponential_fit(samples: &[Sample]) -> FitParams {
    let valid: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| s.value > 0.0 && s.value.is_finite())
        .map(|s| (s.days, s.value.ln()))
        .collect();
    if valid.len() < 2 {
        return FitParams::default();
    }

    let n = valid.len() as f64;
    let mean_x = valid.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = valid.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = valid.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    let sxy: f64 = valid
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    // All samples on the same day: no slope to fit.
    let b = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let log_a = mean_y - b * mean_x;

    let ss_res: f64 = valid
        .iter()
        .map(|(x, y)| (y - (b * x + log_a)).powi(2))
        .sum();
    let ss_tot: f64 = valid.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    FitParams {
        a: log_a.exp(),
        b,
        r_squared,
        annual_growth_rate: ((b * DAYS_PER_YEAR).exp() - 1.0) * 100.0,
    }
}

/// Evaluate the fitted curve at `days`.
pub fn evaluate(fit: &FitParams, days: f64) -> f64 {
    fit.a * (fit.b * days).exp()
}

/// Sample the fitted curve at `TREND_LINE_POINTS` evenly spaced offsets
/// between day 0 and `span_days`.
///
/// Each point is dated `start + floor(offset)` days.
pub fn trend_line(start: NaiveDate, span_days: i64, fit: &FitParams) -> Vec<TimePoint> {
    let span = span_days.max(0) as f64;
    let last = (TREND_LINE_POINTS - 1) as f64;
    (0..TREND_LINE_POINTS)
        .map(|i| {
            let days = span * i as f64 / last;
            let date = start + Duration::days(days.floor() as i64);
            TimePoint::new(format_date(&date), evaluate(fit, days))
        })
        .collect()
}
