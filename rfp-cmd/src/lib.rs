//! Command implementations for the wealth timeline CLI.
//!
//! Both commands read a wealth records CSV, aggregate it into daily totals
//! through the in-memory database, and write JSON for the site.

use anyhow::Context;
use clap::Subcommand;
use rfp_core::record::DailyTotal;
use rfp_db::Database;
use std::path::Path;

pub mod metrics;
pub mod timeline;

#[derive(Subcommand)]
pub enum Command {
    /// Build the timeline chart data object
    Timeline {
        /// Path to the wealth records CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the chart data JSON
        #[arg(short = 'o', long)]
        output: String,

        /// Also write a gzip-compressed copy next to the output
        #[arg(long)]
        gzip: bool,
    },

    /// Compute dashboard metrics, equivalencies and card sparklines
    Metrics {
        /// Path to the wealth records CSV
        #[arg(short = 'i', long)]
        input: String,

        /// Output path for the metrics JSON; logs a summary when omitted
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Optional `metric,value` CSV overriding the income baselines
        #[arg(short = 'b', long)]
        baselines: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Timeline {
            input,
            output,
            gzip,
        } => timeline::run_timeline(&input, &output, gzip),
        Command::Metrics {
            input,
            output,
            baselines,
        } => metrics::run_metrics(&input, output.as_deref(), baselines.as_deref()),
    }
}

/// Load a records CSV and aggregate it into chronological daily totals.
pub fn load_daily_totals(input: &str) -> anyhow::Result<Vec<DailyTotal>> {
    let csv_data =
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?;
    let db = Database::new()?;
    db.load_records_csv(&csv_data)
        .with_context(|| format!("Failed to load records from {}", input))?;
    let totals = db.query_daily_totals()?;
    log::info!("Aggregated {} daily totals from {}", totals.len(), input);
    Ok(totals)
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use tempfile::TempDir;

    pub const RECORDS_CSV: &str = "\
date,person_name,final_worth,cpi_u,pce
2024-01-01,Alice,100000000000,300,120
2024-01-01,Bob,50000000000,300,120
2024-02-01,Alice,110000000000,303,121
2024-02-01,Bob,55000000000,303,121
2024-03-01,Alice,121000000000,306,122
2024-03-01,Bob,60500000000,306,122
2024-03-01,Carol,20000000000,306,122
";

    /// A scratch directory removed when the returned guard drops.
    pub fn scratch_dir(name: &str) -> TempDir {
        tempfile::Builder::new()
            .prefix(&format!("rfp-cmd-{}-", name))
            .tempdir()
            .unwrap()
    }

    pub fn write_records(dir: &Path) -> String {
        let path = dir.join("records.csv");
        std::fs::write(&path, RECORDS_CSV).unwrap();
        path.to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn loads_daily_totals_from_csv() {
        let dir = scratch_dir("load");
        let input = write_records(dir.path());
        let totals = load_daily_totals(&input).unwrap();
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].billionaire_count, 2);
        assert_eq!(totals[2].billionaire_count, 3);
        assert!((totals[2].total_wealth - 201.5e9).abs() < 1.0);
    }

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let dir = scratch_dir("cleanup");
        let path = dir.path().to_path_buf();
        write_records(&path);
        assert!(path.join("records.csv").exists());
        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = load_daily_totals("/nonexistent/records.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
