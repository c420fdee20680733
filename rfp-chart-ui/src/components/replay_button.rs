//! Button that replays the reveal animation.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ReplayButton() -> Element {
    let state = use_context::<AppState>();
    let disabled = !state.chart_live();

    let on_click = move |_| {
        if let Some(chart) = state.chart.read().as_ref() {
            chart.replay();
        }
    };

    rsx! {
        button {
            class: "replay-button",
            style: "padding: 6px 12px; border: 1px solid #ccc; background: white; cursor: pointer; margin: 8px 0;",
            disabled: disabled,
            onclick: on_click,
            "Replay animation"
        }
    }
}
