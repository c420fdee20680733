//! Summary statistics panel shown beside the chart.

use dioxus::prelude::*;
use rfp_core::chart_data::SummaryStats;
use rfp_utils::format::{format_number, format_percentage, format_trillions};

#[derive(Props, Clone, PartialEq)]
pub struct SummaryPanelProps {
    pub summary: SummaryStats,
}

/// `.chart-info` panel with precomputed summary values. Values are rendered
/// as given, never recomputed.
#[component]
pub fn SummaryPanel(props: SummaryPanelProps) -> Element {
    let s = &props.summary;
    let rows = [
        ("Data points", format_number(s.data_points as f64, 0)),
        ("Timespan", s.timespan.clone()),
        ("Starting wealth", format_trillions(s.start_value)),
        ("Current wealth", format_trillions(s.end_value)),
        ("Total increase", format_percentage(s.total_increase, 1)),
        ("Annual growth rate", format_percentage(s.exponential_growth_rate, 1)),
    ];

    rsx! {
        div {
            class: "chart-info",
            style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 8px; margin-top: 12px;",
            for (label, value) in rows {
                div {
                    key: "{label}",
                    style: "padding: 8px; background: #fafafa; border-radius: 4px;",
                    div { style: "font-size: 11px; color: #888;", "{label}" }
                    div { style: "font-size: 16px; font-weight: bold;", "{value}" }
                }
            }
        }
    }
}
