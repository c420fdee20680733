//! Assembly of the wealth timeline chart data object.

use crate::fit::{exponential_fit, trend_line, Sample};
use crate::{DataError, TRILLION};
use rfp_core::chart_data::{
    AnimationConfig, ChartData, InflationData, SummaryStats, TimePoint, TimeRange, DEFAULT_TITLE,
    DEFAULT_Y_AXIS_TITLE,
};
use rfp_core::record::DailyTotal;
use rfp_utils::dates::{days_between, format_date};

/// Price index columns, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflationIndex {
    CpiU,
    Pce,
}

impl InflationIndex {
    pub const ALL: [InflationIndex; 2] = [InflationIndex::CpiU, InflationIndex::Pce];

    /// Label written to `inflationType`.
    pub fn label(&self) -> &'static str {
        match self {
            InflationIndex::CpiU => "CPI_U",
            InflationIndex::Pce => "PCE",
        }
    }

    fn value(&self, total: &DailyTotal) -> Option<f64> {
        match self {
            InflationIndex::CpiU => total.cpi_u,
            InflationIndex::Pce => total.pce,
        }
    }
}

/// Build the chart data object from daily totals (wealth in USD).
///
/// Totals are sorted by date and scaled to trillions. The trend line is the
/// exponential fit sampled at 100 points; inflation-adjusted data is included
/// when any price index values are present.
pub fn prepare_wealth_timeline(totals: &[DailyTotal]) -> Result<ChartData, DataError> {
    let sorted = sorted_in_trillions(totals)?;
    let first = &sorted[0];
    let last = &sorted[sorted.len() - 1];

    let samples: Vec<Sample> = sorted
        .iter()
        .map(|t| Sample {
            days: days_between(&first.date, &t.date) as f64,
            value: t.total_wealth,
        })
        .collect();
    let fit = exponential_fit(&samples);
    let span_days = days_between(&first.date, &last.date);
    let trend = trend_line(first.date, span_days, &fit);

    let data: Vec<TimePoint> = sorted
        .iter()
        .map(|t| TimePoint::new(format_date(&t.date), t.total_wealth))
        .collect();

    log::info!(
        "timeline: prepared {} points (R² = {:.3})",
        data.len(),
        fit.r_squared
    );

    Ok(ChartData {
        data,
        trend_line: Some(trend),
        fit_params: Some(fit),
        inflation_data: inflation_adjusted(&sorted),
        time_range: Some(time_range(&sorted)?),
        title: DEFAULT_TITLE.to_string(),
        y_axis_title: DEFAULT_Y_AXIS_TITLE.to_string(),
        animation: AnimationConfig::default(),
        summary: Some(summary_stats(&sorted, fit.annual_growth_rate)?),
    })
}

fn sorted_in_trillions(totals: &[DailyTotal]) -> Result<Vec<DailyTotal>, DataError> {
    if totals.is_empty() {
        return Err(DataError::Empty);
    }
    let mut sorted: Vec<DailyTotal> = totals
        .iter()
        .map(|t| DailyTotal {
            total_wealth: t.total_wealth / TRILLION,
            ..t.clone()
        })
        .collect();
    sorted.sort_by_key(|t| t.date);
    Ok(sorted)
}

/// Deflate the series by the first available price index.
///
/// Each value is scaled by `base / index`, where `base` is the first index
/// value in the series, so the series is expressed in start-date dollars.
/// Days without a positive index value are dropped. `totals` must be sorted.
pub fn inflation_adjusted(totals: &[DailyTotal]) -> Option<InflationData> {
    InflationIndex::ALL.iter().find_map(|index| {
        let base = totals.iter().find_map(|t| index.value(t))?;
        let data: Vec<TimePoint> = totals
            .iter()
            .filter_map(|t| {
                let value = index.value(t).filter(|v| *v > 0.0)?;
                Some(TimePoint::new(
                    format_date(&t.date),
                    t.total_wealth * (base / value),
                ))
            })
            .collect();
        Some(InflationData {
            data,
            inflation_type: index.label().to_string(),
            base_value: Some(base),
        })
    })
}

/// First/last dates of sorted totals.
pub fn time_range(totals: &[DailyTotal]) -> Result<TimeRange, DataError> {
    let (first, last) = match (totals.first(), totals.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(DataError::Empty),
    };
    Ok(TimeRange {
        start: format_date(&first.date),
        end: format_date(&last.date),
        total_days: days_between(&first.date, &last.date),
    })
}

/// Summary panel values for sorted totals.
pub fn summary_stats(
    totals: &[DailyTotal],
    exponential_growth_rate: f64,
) -> Result<SummaryStats, DataError> {
    let (first, last) = match (totals.first(), totals.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(DataError::Empty),
    };
    let total_increase = if first.total_wealth != 0.0 {
        (last.total_wealth - first.total_wealth) / first.total_wealth * 100.0
    } else {
        0.0
    };
    Ok(SummaryStats {
        data_points: totals.len(),
        timespan: format!("{} to {}", format_date(&first.date), format_date(&last.date)),
        start_value: first.total_wealth,
        end_value: last.total_wealth,
        total_increase,
        exponential_growth_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn total(day: u32, trillions: f64, cpi_u: Option<f64>, pce: Option<f64>) -> DailyTotal {
        DailyTotal {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            total_wealth: trillions * TRILLION,
            billionaire_count: 10,
            cpi_u,
            pce,
        }
    }

    #[test]
    fn prepares_full_chart_object() {
        // Deliberately out of order.
        let totals = vec![
            total(3, 12.0, None, None),
            total(1, 10.0, None, None),
            total(2, 11.0, None, None),
        ];
        let chart = prepare_wealth_timeline(&totals).unwrap();
        assert_eq!(chart.data.len(), 3);
        assert_eq!(chart.data[0], TimePoint::new("2024-01-01", 10.0));
        assert_eq!(chart.data[2].x, "2024-01-03");
        assert_eq!(chart.trend_points().map(|t| t.len()), Some(100));
        assert_eq!(chart.title, "Total Billionaire Wealth");
        assert!(chart.inflation_data.is_none());

        let range = chart.time_range.unwrap();
        assert_eq!(range.start, "2024-01-01");
        assert_eq!(range.total_days, 2);

        let summary = chart.summary.unwrap();
        assert_eq!(summary.data_points, 3);
        assert_eq!(summary.timespan, "2024-01-01 to 2024-01-03");
        assert!((summary.total_increase - 20.0).abs() < 1e-9);
        assert_eq!(
            summary.exponential_growth_rate,
            chart.fit_params.unwrap().annual_growth_rate
        );
    }

    #[test]
    fn empty_input_is_error() {
        assert_eq!(prepare_wealth_timeline(&[]), Err(DataError::Empty));
    }

    #[test]
    fn inflation_prefers_cpi_and_uses_first_value_as_base() {
        let totals = vec![
            total(1, 10.0, Some(300.0), Some(120.0)),
            total(2, 10.0, None, Some(121.0)),
            total(3, 12.0, Some(330.0), Some(122.0)),
        ];
        let sorted = sorted_in_trillions(&totals).unwrap();
        let inflation = inflation_adjusted(&sorted).unwrap();
        assert_eq!(inflation.inflation_type, "CPI_U");
        assert_eq!(inflation.base_value, Some(300.0));
        assert_eq!(inflation.data.len(), 2);
        assert!((inflation.data[0].y - 10.0).abs() < 1e-12);
        assert!((inflation.data[1].y - 12.0 * 300.0 / 330.0).abs() < 1e-12);
    }

    #[test]
    fn inflation_falls_back_to_pce() {
        let totals = vec![total(1, 10.0, None, Some(120.0)), total(2, 11.0, None, Some(0.0))];
        let inflation = inflation_adjusted(&sorted_in_trillions(&totals).unwrap()).unwrap();
        assert_eq!(inflation.inflation_type, "PCE");
        // Zero index values are dropped.
        assert_eq!(inflation.data.len(), 1);
    }

    #[test]
    fn zero_start_value_gives_zero_increase() {
        let totals = vec![total(1, 0.0, None, None), total(2, 5.0, None, None)];
        let summary = summary_stats(&totals, 0.0).unwrap();
        assert_eq!(summary.total_increase, 0.0);
    }
}
