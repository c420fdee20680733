//! Page behavior for the wealth timeline site, independent of the browser.
//!
//! This crate provides:
//! - `engine`: the charting engine capability the controller drives
//! - `scheduler`: cancellable one-shot timers, plus a manual clock
//! - `reveal`: the staged reveal as an explicit sequence of steps
//! - `timeline`: the timeline chart controller and its state machine
//! - `navigation`: menu toggle, anchor scrolling and scroll-spy
//! - `labels`: tooltip and axis label text
//!
//! The browser bindings live in `rfp-chart-ui`.

pub mod engine;
pub mod labels;
pub mod navigation;
pub mod reveal;
pub mod scheduler;
pub mod timeline;

pub use engine::{ChartBackend, ChartEngine, ChartError, ChartSetup, Series};
pub use navigation::{LinkAction, NavigationController, NavigationView, Section};
pub use scheduler::{ManualScheduler, Scheduler};
pub use timeline::{ChartState, ChartView, TimelineChart};
