//! The charting engine capability.
//!
//! The controller never talks to a charting library directly; it is handed a
//! [`ChartBackend`] that can build an engine for a canvas, and drives the
//! resulting [`ChartEngine`] through these methods only.

use rfp_core::chart_data::TimePoint;
use thiserror::Error;

/// The two datasets of the timeline chart, in dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Observed data points (dataset 0)
    Points,
    /// Fitted trend line (dataset 1)
    Trend,
}

impl Series {
    /// Index of the series in the engine's dataset list.
    pub fn index(&self) -> usize {
        match self {
            Series::Points => 0,
            Series::Trend => 1,
        }
    }
}

/// Why a chart could not be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// No canvas element with the given id
    #[error("Chart canvas '{0}' not found")]
    CanvasNotFound(String),

    /// The charting library is not loaded
    #[error("Charting engine is not available")]
    EngineUnavailable,

    /// The library rejected the configuration
    #[error("Chart construction failed: {0}")]
    Construction(String),
}

/// Everything a backend needs to build the initial chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSetup<'a> {
    pub title: &'a str,
    pub y_axis_title: &'a str,
    pub points: &'a [TimePoint],
    pub trend: &'a [TimePoint],
}

/// A live chart instance.
///
/// Mutations are not visible until [`update`](ChartEngine::update) is called.
pub trait ChartEngine {
    /// Replace a series wholesale.
    fn set_series(&mut self, series: Series, points: &[TimePoint]);

    /// Append one point to a series.
    fn push_point(&mut self, series: Series, point: &TimePoint);

    fn set_y_axis_title(&mut self, title: &str);

    /// Redraw.
    fn update(&mut self);

    /// Release the underlying instance. No method is called afterwards.
    fn destroy(&mut self);
}

/// Builds chart engines bound to a canvas.
pub trait ChartBackend {
    type Engine: ChartEngine;

    fn create(&self, canvas_id: &str, setup: &ChartSetup<'_>) -> Result<Self::Engine, ChartError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_indices_follow_dataset_order() {
        assert_eq!(Series::Points.index(), 0);
        assert_eq!(Series::Trend.index(), 1);
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(
            ChartError::CanvasNotFound("wealth-chart".into()).to_string(),
            "Chart canvas 'wealth-chart' not found"
        );
        assert_eq!(
            ChartError::EngineUnavailable.to_string(),
            "Charting engine is not available"
        );
    }
}
