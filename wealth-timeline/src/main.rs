//! Animated billionaire wealth timeline.
//!
//! Data flow:
//! 1. The generated page assigns the chart data object (written by
//!    `rfp-cli timeline`) to `window.wealthTimelineData` and loads Chart.js.
//! 2. On mount: decode the data object into `ChartData`.
//! 3. Once the canvas exists: build the timeline controller on it and observe
//!    the chart container; the reveal plays the first time it is half visible.
//! 4. The view toggle and replay button drive the controller directly.
//!
//! Site navigation (menu toggle, anchor scrolling, scroll-spy) is attached to
//! the surrounding page at startup, independent of the chart.

use dioxus::prelude::*;
use rfp_chart::{ChartState, TimelineChart};
use rfp_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, ReplayButton, SummaryPanel,
    ViewToggle,
};
use rfp_chart_ui::data::load_page_data;
use rfp_chart_ui::js_bridge::ChartJsBackend;
use rfp_chart_ui::navigation::attach_navigation;
use rfp_chart_ui::scheduler::TimeoutScheduler;
use rfp_chart_ui::state::AppState;
use rfp_chart_ui::visibility::VisibilityTrigger;

/// DOM id of the Chart.js canvas.
const CANVAS_ID: &str = "wealth-timeline-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    attach_navigation();
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("wealth-timeline-root"))
        .launch(App);
}

/// The `.chart-container` wrapping the canvas.
fn chart_container() -> Option<web_sys::Element> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CANVAS_ID)?
        .parent_element()
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut trigger: Signal<Option<VisibilityTrigger>> = use_signal(|| None);

    // ─── Effect 1: Decode the page data once on mount ───
    use_effect(move || {
        match load_page_data() {
            Ok(data) => state.chart_data.set(Some(data)),
            Err(e) => {
                log::error!("[Timeline] {}", e);
                state.error_msg.set(Some(e.to_string()));
            }
        }
        state.loading.set(false);
    });

    // ─── Effect 2: Build the chart once the canvas is mounted ───
    use_effect(move || {
        if (state.loading)() || state.chart.peek().is_some() {
            return;
        }
        let Some(data) = state.chart_data.read().clone() else {
            return;
        };

        let chart = TimelineChart::new(&ChartJsBackend, CANVAS_ID, data, TimeoutScheduler);
        if chart.state() != ChartState::Ready {
            state
                .error_msg
                .set(Some("The chart could not be created.".to_string()));
            state.chart.set(Some(chart));
            return;
        }

        match chart_container() {
            Some(container) => {
                let observed = chart.clone();
                match VisibilityTrigger::observe(&container, move || {
                    observed.on_visible();
                }) {
                    Ok(observer) => trigger.set(Some(observer)),
                    Err(e) => {
                        log::warn!("[Timeline] visibility observer unavailable: {:?}", e);
                        chart.on_visible();
                    }
                }
            }
            None => log::warn!("[Timeline] chart container not found"),
        }
        state.chart.set(Some(chart));
    });

    use_drop(move || {
        trigger.set(None);
        if let Some(chart) = state.chart.peek().as_ref() {
            chart.destroy();
        }
    });

    let data = state.chart_data.read().clone();

    // ─── Render ───
    rsx! {
        div {
            class: "chart-section",
            style: "max-width: 960px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            }

            if let Some(data) = data {
                ChartHeader {
                    title: data.title.clone(),
                    unit_description: data.y_axis_title.clone(),
                }

                div {
                    style: "display: flex; justify-content: space-between; align-items: center;",
                    ViewToggle {}
                    ReplayButton {}
                }

                ChartContainer {
                    canvas_id: CANVAS_ID.to_string(),
                    loading: state.chart.read().is_none(),
                }

                if let Some(summary) = data.summary.clone() {
                    SummaryPanel { summary }
                }
            }
        }
    }
}
