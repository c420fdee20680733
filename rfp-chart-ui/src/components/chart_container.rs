//! Chart container component holding the Chart.js canvas.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id of the canvas Chart.js draws into
    pub canvas_id: String,
    /// Whether the chart is still loading
    #[props(default = false)]
    pub loading: bool,
    /// Optional minimum height in pixels
    #[props(default = 450)]
    pub min_height: u32,
}

/// `.chart-container` with a canvas and loading overlay. The container is the
/// element observed for scroll-into-view.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            class: "chart-container",
            style: "{style}",
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading chart..."
                }
            }
            canvas {
                id: "{props.canvas_id}",
            }
        }
    }
}
