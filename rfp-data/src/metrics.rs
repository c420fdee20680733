//! Headline dashboard metrics derived from daily totals.

use crate::{DataError, TRILLION};
use chrono::Datelike;
use rfp_core::record::DailyTotal;
use rfp_utils::dates::{days_between, format_date};
use serde::Serialize;

/// Above this many daily totals, growth is computed from monthly averages.
pub const MONTHLY_AVERAGE_THRESHOLD: usize = 60;

/// CAGR is clipped into this range (percent).
pub const CAGR_BOUNDS: (f64, f64) = (-50.0, 100.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub billionaire_count: u32,
    pub total_wealth_trillions: f64,
    pub average_wealth_billions: f64,
    pub wealth_increase_pct: f64,
    pub billionaire_increase_count: i64,
    pub avg_wealth_increase_pct: f64,
    /// Compound annual growth rate, percent.
    pub growth_rate: f64,
    /// Years for total wealth to double at `growth_rate`; `None` without growth.
    pub doubling_time: Option<f64>,
    /// Average wealth added per day, billions USD.
    pub daily_accumulation: f64,
    pub data_start_date: String,
    pub data_end_date: String,
    pub data_days_span: i64,
    pub data_points: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct GrowthMetrics {
    growth_rate: f64,
    doubling_time: Option<f64>,
    daily_accumulation: f64,
}

/// Compute dashboard metrics from daily totals (wealth in USD, any order).
pub fn dashboard_metrics(totals: &[DailyTotal]) -> Result<DashboardMetrics, DataError> {
    if totals.is_empty() {
        return Err(DataError::Empty);
    }
    let mut sorted = totals.to_vec();
    sorted.sort_by_key(|t| t.date);
    let first = &sorted[0];
    let latest = &sorted[sorted.len() - 1];

    let wealth_trillions = latest.total_wealth / TRILLION;
    let first_wealth = first.total_wealth / TRILLION;
    let avg_wealth = average_billions(wealth_trillions, latest.billionaire_count);
    let first_avg = average_billions(first_wealth, first.billionaire_count);

    let growth = growth_metrics(&sorted);
    let data_days_span = days_between(&first.date, &latest.date);

    log::info!(
        "metrics: {} billionaires, ${:.1}T total, {:.1}% CAGR",
        latest.billionaire_count,
        wealth_trillions,
        growth.growth_rate
    );

    Ok(DashboardMetrics {
        billionaire_count: latest.billionaire_count,
        total_wealth_trillions: wealth_trillions,
        average_wealth_billions: avg_wealth,
        wealth_increase_pct: pct_change(wealth_trillions, first_wealth),
        billionaire_increase_count: i64::from(latest.billionaire_count)
            - i64::from(first.billionaire_count),
        avg_wealth_increase_pct: pct_change(avg_wealth, first_avg),
        growth_rate: growth.growth_rate,
        doubling_time: growth.doubling_time,
        daily_accumulation: growth.daily_accumulation,
        data_start_date: format_date(&first.date),
        data_end_date: format_date(&latest.date),
        data_days_span,
        data_points: sorted.len(),
    })
}

fn average_billions(total_trillions: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_trillions * 1000.0 / f64::from(count)
    }
}

/// Percent change from `old` to `new`; zero when `old` is zero.
pub fn pct_change(new: f64, old: f64) -> f64 {
    if old == 0.0 {
        0.0
    } else {
        (new - old) / old * 100.0
    }
}

fn growth_metrics(sorted: &[DailyTotal]) -> GrowthMetrics {
    if sorted.len() < 2 {
        return GrowthMetrics::default();
    }

    let monthly;
    let source = if sorted.len() > MONTHLY_AVERAGE_THRESHOLD {
        monthly = monthly_averages(sorted);
        log::info!("metrics: using monthly averages ({} months)", monthly.len());
        monthly.as_slice()
    } else {
        log::warn!("metrics: using daily data for CAGR (insufficient monthly data)");
        sorted
    };

    let (start, end) = (&source[0], &source[source.len() - 1]);
    let days = days_between(&start.date, &end.date);
    if days == 0 || start.total_wealth == 0.0 {
        return GrowthMetrics::default();
    }

    let years = days as f64 / crate::fit::DAYS_PER_YEAR;
    let cagr = (((end.total_wealth / start.total_wealth).powf(1.0 / years) - 1.0) * 100.0)
        .clamp(CAGR_BOUNDS.0, CAGR_BOUNDS.1);

    if cagr > 0.0 {
        GrowthMetrics {
            growth_rate: cagr,
            doubling_time: Some(2f64.ln() / (1.0 + cagr / 100.0).ln()),
            daily_accumulation: (end.total_wealth - start.total_wealth) / 1e9 / days as f64,
        }
    } else {
        GrowthMetrics {
            growth_rate: cagr,
            doubling_time: None,
            daily_accumulation: 0.0,
        }
    }
}

/// Average the totals of each calendar month, dated by the month's first
/// observation. `sorted` must be in date order.
pub fn monthly_averages(sorted: &[DailyTotal]) -> Vec<DailyTotal> {
    let mut months: Vec<(DailyTotal, f64, u64, usize)> = Vec::new();
    for t in sorted {
        let same_month = months.last().is_some_and(|(m, ..)| {
            m.date.year() == t.date.year() && m.date.month() == t.date.month()
        });
        if same_month {
            if let Some((_, wealth_sum, count_sum, n)) = months.last_mut() {
                *wealth_sum += t.total_wealth;
                *count_sum += u64::from(t.billionaire_count);
                *n += 1;
            }
        } else {
            months.push((t.clone(), t.total_wealth, u64::from(t.billionaire_count), 1));
        }
    }

    months
        .into_iter()
        .map(|(first, wealth_sum, count_sum, n)| DailyTotal {
            date: first.date,
            total_wealth: wealth_sum / n as f64,
            billionaire_count: (count_sum as f64 / n as f64).round() as u32,
            cpi_u: first.cpi_u,
            pce: first.pce,
        })
        .collect()
}
