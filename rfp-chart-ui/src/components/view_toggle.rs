//! Nominal / inflation-adjusted view toggle.

use crate::state::AppState;
use dioxus::prelude::*;
use rfp_chart::ChartView;

fn button_style(active: bool) -> &'static str {
    if active {
        "padding: 6px 12px; border: 1px solid #dc2626; background: #dc2626; color: white; cursor: pointer;"
    } else {
        "padding: 6px 12px; border: 1px solid #ccc; background: white; color: #333; cursor: pointer;"
    }
}

fn select(mut state: AppState, view: ChartView) {
    let switched = state
        .chart
        .read()
        .as_ref()
        .is_some_and(|chart| chart.set_view(view));
    if switched {
        state.view.set(view);
    }
}

/// Two-button toggle. Renders nothing when there is no inflation data.
#[component]
pub fn ViewToggle() -> Element {
    let state = use_context::<AppState>();
    let has_inflation = state
        .chart
        .read()
        .as_ref()
        .is_some_and(|chart| chart.has_inflation_data());
    if !has_inflation {
        return rsx! {};
    }
    let current = (state.view)();

    rsx! {
        div {
            style: "display: flex; gap: 0; margin: 8px 0;",
            button {
                style: button_style(current == ChartView::Nominal),
                onclick: move |_| select(state, ChartView::Nominal),
                "Nominal"
            }
            button {
                style: button_style(current == ChartView::InflationAdjusted),
                onclick: move |_| select(state, ChartView::InflationAdjusted),
                "Inflation-adjusted"
            }
        }
    }
}
