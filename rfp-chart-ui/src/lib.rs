//! Dioxus components and browser bindings for the wealth timeline site.
//!
//! This crate provides:
//! - `js_bridge`: Chart.js bindings implementing the `rfp-chart` engine traits
//! - `chart_config`: the Chart.js configuration object for a timeline
//! - `scheduler`: `setTimeout`-backed scheduler for the reveal
//! - `visibility`: IntersectionObserver trigger for scroll-into-view
//! - `navigation`: DOM binding for menu, anchors and scroll-spy
//! - `data`: loading the page's embedded chart data object
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components

pub mod chart_config;
pub mod components;
pub mod data;
pub mod js_bridge;
pub mod navigation;
pub mod scheduler;
pub mod state;
pub mod visibility;

use rfp_chart::TimelineChart;

/// Timeline controller wired to Chart.js and browser timers.
pub type WebTimelineChart = TimelineChart<js_bridge::ChartJsEngine, scheduler::TimeoutScheduler>;
