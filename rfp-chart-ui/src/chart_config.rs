//! Chart.js configuration for the wealth timeline.
//!
//! Built as plain JSON so it can be checked without a browser. Function-valued
//! options (tooltip and tick formatters) are attached afterwards by
//! `js_bridge`, at the paths below.

use rfp_chart::labels::{POINTS_LABEL, TREND_LABEL};
use rfp_chart::ChartSetup;
use serde_json::{json, Value};

pub const POINTS_COLOR: &str = "#dc2626";
pub const TREND_COLOR: &str = "#f59e0b";

pub const TOOLTIP_LABEL_PATH: [&str; 5] = ["options", "plugins", "tooltip", "callbacks", "label"];
pub const TOOLTIP_TITLE_PATH: [&str; 5] = ["options", "plugins", "tooltip", "callbacks", "title"];
pub const Y_TICK_PATH: [&str; 5] = ["options", "scales", "y", "ticks", "callback"];
pub const Y_TITLE_PATH: [&str; 4] = ["options", "scales", "y", "title"];

/// Chart.js config for a timeline showing the full series.
pub fn timeline_config(setup: &ChartSetup<'_>) -> Value {
    json!({
        "type": "line",
        "data": {
            "datasets": [
                {
                    "label": POINTS_LABEL,
                    "data": setup.points,
                    "borderColor": POINTS_COLOR,
                    "backgroundColor": POINTS_COLOR,
                    "borderWidth": 2,
                    "pointRadius": 0,
                    "pointHoverRadius": 4,
                    "tension": 0.1
                },
                {
                    "label": TREND_LABEL,
                    "data": setup.trend,
                    "borderColor": TREND_COLOR,
                    "borderDash": [6, 4],
                    "borderWidth": 2,
                    "pointRadius": 0,
                    "fill": false
                }
            ]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "animation": false,
            "interaction": { "mode": "index", "intersect": false },
            "plugins": {
                "title": { "display": true, "text": setup.title },
                "legend": { "display": true, "position": "bottom" },
                "tooltip": { "callbacks": {} }
            },
            "scales": {
                "x": {
                    "type": "time",
                    "time": { "unit": "year" },
                    "title": { "display": true, "text": "Date" }
                },
                "y": {
                    "title": { "display": true, "text": setup.y_axis_title },
                    "ticks": {}
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfp_core::chart_data::TimePoint;

    fn pointer(path: &[&str]) -> String {
        path.iter().map(|p| format!("/{}", p)).collect()
    }

    #[test]
    fn datasets_follow_series_order() {
        let points = vec![TimePoint::new("2024-01-01", 12.0), TimePoint::new("2024-01-02", 12.5)];
        let trend = vec![TimePoint::new("2024-01-01", 11.9)];
        let setup = ChartSetup {
            title: "Total Billionaire Wealth",
            y_axis_title: "Wealth (Trillions USD)",
            points: &points,
            trend: &trend,
        };
        let config = timeline_config(&setup);

        let datasets = config["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 2);
        assert_eq!(datasets[0]["label"], POINTS_LABEL);
        assert_eq!(datasets[0]["data"][1]["x"], "2024-01-02");
        assert_eq!(datasets[0]["data"][1]["y"], 12.5);
        assert_eq!(datasets[1]["label"], TREND_LABEL);
        assert_eq!(datasets[1]["data"].as_array().unwrap().len(), 1);
        assert_eq!(config["options"]["scales"]["y"]["title"]["text"], "Wealth (Trillions USD)");
        assert_eq!(config["options"]["plugins"]["title"]["text"], "Total Billionaire Wealth");
    }

    #[test]
    fn callback_parents_exist() {
        let setup = ChartSetup {
            title: "",
            y_axis_title: "",
            points: &[],
            trend: &[],
        };
        let config = timeline_config(&setup);
        for path in [&TOOLTIP_LABEL_PATH[..], &TOOLTIP_TITLE_PATH[..], &Y_TICK_PATH[..]] {
            let parent = &path[..path.len() - 1];
            assert!(config.pointer(&pointer(parent)).unwrap().is_object());
        }
        assert!(config.pointer(&pointer(&Y_TITLE_PATH)).unwrap().is_object());
    }
}
