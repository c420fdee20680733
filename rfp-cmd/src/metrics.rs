//! `metrics`: headline dashboard numbers for the site.

use crate::{ensure_parent, load_daily_totals};
use anyhow::Context;
use log::info;
use rfp_data::equivalency::{equivalencies, Baselines, Equivalency};
use rfp_data::metrics::{dashboard_metrics, DashboardMetrics};
use rfp_data::sparkline::{card_sparklines, CardSparklines};
use rfp_utils::format::{format_number, format_percentage};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub metrics: DashboardMetrics,
    pub equivalencies: Vec<Equivalency>,
    pub sparklines: CardSparklines,
}

/// Build the metrics report for `input`, optionally overriding the income
/// baselines from a `metric,value` CSV.
pub fn build_report(input: &str, baselines: Option<&str>) -> anyhow::Result<MetricsReport> {
    let baselines = match baselines {
        Some(path) => {
            let csv_data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            Baselines::from_csv(&csv_data)?
        }
        None => Baselines::default(),
    };

    let totals = load_daily_totals(input)?;
    let metrics = dashboard_metrics(&totals).context("Failed to compute dashboard metrics")?;
    Ok(MetricsReport {
        equivalencies: equivalencies(metrics.total_wealth_trillions, &baselines),
        sparklines: card_sparklines(&totals),
        metrics,
    })
}

/// Write the report as minified JSON to `output`, or log a summary.
pub fn run_metrics(input: &str, output: Option<&str>, baselines: Option<&str>) -> anyhow::Result<()> {
    let report = build_report(input, baselines)?;

    match output {
        Some(path) => {
            ensure_parent(path)?;
            let json = serde_json::to_string(&report)?;
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
            info!("Wrote metrics to {}", path);
        }
        None => {
            let m = &report.metrics;
            info!(
                "{} billionaires, ${:.2}T total, ${:.1}B average",
                format_number(f64::from(m.billionaire_count), 0),
                m.total_wealth_trillions,
                m.average_wealth_billions
            );
            info!(
                "Growth {} per year, {} since {}",
                format_percentage(m.growth_rate, 1),
                format_percentage(m.wealth_increase_pct, 1),
                m.data_start_date
            );
            for eq in &report.equivalencies {
                info!("{}: {} ({})", eq.comparison, eq.value, eq.context);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn report_combines_metrics_and_sparklines() {
        let dir = scratch_dir("metrics");
        let input = write_records(dir.path());
        let report = build_report(&input, None).unwrap();
        assert_eq!(report.metrics.billionaire_count, 3);
        assert_eq!(report.metrics.data_points, 3);
        assert_eq!(report.equivalencies.len(), 3);
        assert!(report.sparklines.total_wealth.is_some());
    }

    #[test]
    fn writes_minified_json() {
        let dir = scratch_dir("metrics-out");
        let input = write_records(dir.path());
        let output = dir.path().join("metrics.json").to_string_lossy().into_owned();
        run_metrics(&input, Some(&output), None).unwrap();

        let json = std::fs::read_to_string(&output).unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metrics"]["billionaire_count"], 3);
        assert_eq!(value["equivalencies"][0]["comparison"], "Median US Households");
    }

    #[test]
    fn custom_baselines_change_equivalencies() {
        let dir = scratch_dir("metrics-baselines");
        let input = write_records(dir.path());
        let baselines = dir.path().join("baselines.csv");
        std::fs::write(&baselines, "metric,value\nmedian_household_income,201500\n").unwrap();

        let report = build_report(&input, baselines.to_str()).unwrap();
        // 201.5B / 201,500 = 1,000,000 households
        assert_eq!(report.equivalencies[0].value, "1 million");
    }
}
