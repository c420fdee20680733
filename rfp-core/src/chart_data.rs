//! Wire types for the wealth timeline data object.
//!
//! The same JSON document is written by the CLI (`rfp-cli timeline`) and read
//! by the web front end from `window.wealthTimelineData`, so field names follow
//! the camelCase keys the page scripts expect.

use serde::{Deserialize, Serialize};

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Total Billionaire Wealth";

/// Default y-axis title for the nominal view.
pub const DEFAULT_Y_AXIS_TITLE: &str = "Wealth (Trillions USD)";

/// Default delay between revealed data points, in milliseconds.
pub const DEFAULT_POINT_DELAY_MS: u32 = 10;

/// Default total duration of the trend line reveal, in milliseconds.
pub const DEFAULT_TREND_LINE_SPEED_MS: u32 = 1500;

/// A single (date, value) pair. `x` is a "YYYY-MM-DD" date string and `y`
/// is wealth in trillions of USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub x: String,
    pub y: f64,
}

impl TimePoint {
    pub fn new(x: impl Into<String>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Parameters of the fitted curve `y = a * e^(b * days)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitParams {
    pub a: f64,
    pub b: f64,
    #[serde(rename = "r_squared", alias = "rSquared")]
    pub r_squared: f64,
    /// Annualized growth implied by `b`, in percent.
    pub annual_growth_rate: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            r_squared: 0.0,
            annual_growth_rate: 0.0,
        }
    }
}

/// Inflation-adjusted alternate series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationData {
    pub data: Vec<TimePoint>,
    /// Index used for the adjustment, e.g. "CPI_U" or "PCE".
    pub inflation_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<f64>,
}

/// First/last dates covered by the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: String,
    pub end: String,
    pub total_days: i64,
}

/// Precomputed values for the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub data_points: usize,
    /// "YYYY-MM-DD to YYYY-MM-DD"
    pub timespan: String,
    pub start_value: f64,
    pub end_value: f64,
    /// Percent change from first to last value.
    pub total_increase: f64,
    pub exponential_growth_rate: f64,
}

/// Reveal animation pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    /// Delay between revealed data points (ms).
    #[serde(deserialize_with = "lenient_millis")]
    pub point_delay: u32,
    /// Total duration of the trend line reveal (ms).
    #[serde(deserialize_with = "lenient_millis")]
    pub trend_line_speed: u32,
}

/// Accept any JSON number as a millisecond count: rounded, negatives clamp to 0.
fn lenient_millis<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let ms = f64::deserialize(deserializer)?;
    Ok(if ms.is_finite() {
        ms.round().clamp(0.0, f64::from(u32::MAX)) as u32
    } else {
        0
    })
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            point_delay: DEFAULT_POINT_DELAY_MS,
            trend_line_speed: DEFAULT_TREND_LINE_SPEED_MS,
        }
    }
}

/// The full data object consumed by the timeline chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub data: Vec<TimePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_line: Option<Vec<TimePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_params: Option<FitParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_data: Option<InflationData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_y_axis_title")]
    pub y_axis_title: String,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryStats>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_y_axis_title() -> String {
    DEFAULT_Y_AXIS_TITLE.to_string()
}

impl ChartData {
    /// Chart data with only the observed series; everything else defaulted.
    pub fn from_points(data: Vec<TimePoint>) -> Self {
        Self {
            data,
            trend_line: None,
            fit_params: None,
            inflation_data: None,
            time_range: None,
            title: default_title(),
            y_axis_title: default_y_axis_title(),
            animation: AnimationConfig::default(),
            summary: None,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Trend series, treating an empty array the same as an absent one.
    pub fn trend_points(&self) -> Option<&[TimePoint]> {
        self.trend_line
            .as_deref()
            .filter(|points| !points.is_empty())
    }

    /// Inflation-adjusted series, if one was supplied and is non-empty.
    pub fn inflation_points(&self) -> Option<&InflationData> {
        self.inflation_data
            .as_ref()
            .filter(|inflation| !inflation.data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{"data":[{"x":"2024-01-01","y":12.5},{"x":"2024-01-02","y":12.7}]}"#;

    #[test]
    fn minimal_object_gets_defaults() {
        let chart = ChartData::from_json(MINIMAL).unwrap();
        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.title, DEFAULT_TITLE);
        assert_eq!(chart.y_axis_title, DEFAULT_Y_AXIS_TITLE);
        assert_eq!(chart.animation, AnimationConfig::default());
        assert!(chart.trend_points().is_none());
        assert!(chart.inflation_points().is_none());
        assert!(chart.summary.is_none());
    }

    #[test]
    fn partial_animation_block_keeps_other_default() {
        let json = r#"{"data":[],"animation":{"pointDelay":25}}"#;
        let chart = ChartData::from_json(json).unwrap();
        assert_eq!(chart.animation.point_delay, 25);
        assert_eq!(chart.animation.trend_line_speed, DEFAULT_TREND_LINE_SPEED_MS);
    }

    #[test]
    fn fractional_and_negative_delays_degrade() {
        let json = r#"{"data":[],"animation":{"pointDelay":12.6,"trendLineSpeed":-300}}"#;
        let chart = ChartData::from_json(json).unwrap();
        assert_eq!(chart.animation.point_delay, 13);
        assert_eq!(chart.animation.trend_line_speed, 0);
    }

    #[test]
    fn full_object_uses_page_field_names() {
        let json = r#"{
            "data": [{"x": "2024-01-01", "y": 12.5}],
            "trendLine": [{"x": "2024-01-01", "y": 12.4}],
            "fitParams": {"a": 12.4, "b": 0.0004, "r_squared": 0.93, "annualGrowthRate": 15.7},
            "inflationData": {"data": [{"x": "2024-01-01", "y": 12.1}], "inflationType": "CPI_U", "baseValue": 308.4},
            "timeRange": {"start": "2024-01-01", "end": "2024-01-01", "totalDays": 0},
            "title": "Wealth",
            "yAxisTitle": "USD",
            "animation": {"pointDelay": 5, "trendLineSpeed": 500},
            "summary": {"dataPoints": 1, "timespan": "2024-01-01 to 2024-01-01", "startValue": 12.5,
                        "endValue": 12.5, "totalIncrease": 0.0, "exponentialGrowthRate": 15.7}
        }"#;
        let chart = ChartData::from_json(json).unwrap();
        assert_eq!(chart.trend_points().map(|t| t.len()), Some(1));
        assert_eq!(chart.fit_params.unwrap().r_squared, 0.93);
        assert_eq!(chart.inflation_points().unwrap().inflation_type, "CPI_U");
        assert_eq!(chart.summary.as_ref().unwrap().data_points, 1);

        let out = serde_json::to_value(&chart).unwrap();
        assert!(out.get("trendLine").is_some());
        assert!(out["fitParams"].get("r_squared").is_some());
        assert_eq!(out["animation"]["trendLineSpeed"], 500);
    }

    #[test]
    fn empty_trend_and_inflation_are_treated_as_absent() {
        let mut chart = ChartData::from_points(vec![TimePoint::new("2024-01-01", 1.0)]);
        chart.trend_line = Some(Vec::new());
        chart.inflation_data = Some(InflationData {
            data: Vec::new(),
            inflation_type: "PCE".to_string(),
            base_value: None,
        });
        assert!(chart.trend_points().is_none());
        assert!(chart.inflation_points().is_none());
    }
}
