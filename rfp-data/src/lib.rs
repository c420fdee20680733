//! Data processing for the wealth timeline.
//!
//! This crate turns daily wealth totals into the chart data object consumed
//! by the web front end, plus the headline metrics shown next to it.

pub mod equivalency;
pub mod fit;
pub mod metrics;
pub mod sparkline;
pub mod timeline;

use thiserror::Error;

/// USD per trillion.
pub const TRILLION: f64 = 1e12;

/// Errors produced while preparing chart data or metrics.
#[derive(Error, Debug, PartialEq)]
pub enum DataError {
    /// No daily totals to work from
    #[error("No data points to process")]
    Empty,

    /// A baselines CSV could not be read
    #[error("Failed to parse baselines: {0}")]
    Baselines(String),
}
