//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::WebTimelineChart;
use dioxus::prelude::*;
use rfp_chart::{ChartState, ChartView};
use rfp_core::chart_data::ChartData;

/// Shared state for the wealth timeline page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the data object is still being read
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Decoded chart data (None until loaded)
    pub chart_data: Signal<Option<ChartData>>,
    /// Chart controller (None until the canvas is mounted)
    pub chart: Signal<Option<WebTimelineChart>>,
    /// Series currently displayed
    pub view: Signal<ChartView>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            chart_data: Signal::new(None),
            chart: Signal::new(None),
            view: Signal::new(ChartView::Nominal),
        }
    }

    /// Whether the controller exists and accepts commands.
    pub fn chart_live(&self) -> bool {
        self.chart
            .read()
            .as_ref()
            .is_some_and(|chart| matches!(chart.state(), ChartState::Ready | ChartState::Animating))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
