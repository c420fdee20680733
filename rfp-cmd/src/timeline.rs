//! `timeline`: write the chart data object for the wealth timeline.

use crate::{ensure_parent, load_daily_totals};
use anyhow::Context;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use rfp_data::timeline::prepare_wealth_timeline;
use std::io::Write;

/// Aggregate `input`, prepare the chart data and write it as pretty JSON to
/// `output`. With `gzip`, a compressed copy is written to `{output}.gz`.
pub fn run_timeline(input: &str, output: &str, gzip: bool) -> anyhow::Result<()> {
    let totals = load_daily_totals(input)?;
    let chart_data =
        prepare_wealth_timeline(&totals).context("Failed to prepare timeline chart data")?;
    let json = serde_json::to_string_pretty(&chart_data)?;

    ensure_parent(output)?;
    std::fs::write(output, &json).with_context(|| format!("Failed to write {}", output))?;
    info!(
        "Wrote {} points ({} trend points) to {}",
        chart_data.data.len(),
        chart_data.trend_points().map_or(0, <[_]>::len),
        output
    );

    if gzip {
        let gz_path = format!("{}.gz", output);
        write_gzip(&gz_path, json.as_bytes())?;
        info!("Wrote compressed copy to {}", gz_path);
    }
    Ok(())
}

fn write_gzip(path: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("Failed to create {}", path))?;
    let mut encoder = GzEncoder::new(file, Compression::best());
    encoder.write_all(bytes)?;
    encoder.finish()?;
    Ok(())
}
