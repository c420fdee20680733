//! Text shown in chart tooltips, legend and axis.

use rfp_core::chart_data::InflationData;
use rfp_utils::dates::long_date_from_str;
use rfp_utils::format::format_trillions;

/// Legend label of the observed series.
pub const POINTS_LABEL: &str = "Total Wealth";

/// Legend label of the trend series.
pub const TREND_LABEL: &str = "Exponential Trend";

/// Tooltip value, e.g. "Total Wealth: $12.3T".
pub fn tooltip_label(series_label: &str, value: f64) -> String {
    format!("{}: {}", series_label, format_trillions(value))
}

/// Tooltip title for a "YYYY-MM-DD" x value, e.g. "January 5, 2024".
pub fn tooltip_title(x: &str) -> String {
    long_date_from_str(x)
}

/// Y-axis tick label in trillions.
pub fn axis_tick(value: f64) -> String {
    format_trillions(value)
}

/// Y-axis title for the inflation-adjusted view.
pub fn inflation_axis_title(inflation: &InflationData) -> String {
    format!("Wealth (Trillions USD, {}-adjusted)", inflation.inflation_type)
}
