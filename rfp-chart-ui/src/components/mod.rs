//! Reusable Dioxus RSX components for the wealth timeline page.

mod chart_container;
mod chart_header;
mod error_display;
mod loading_spinner;
mod replay_button;
mod summary_panel;
mod view_toggle;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use replay_button::ReplayButton;
pub use summary_panel::SummaryPanel;
pub use view_toggle::ViewToggle;
