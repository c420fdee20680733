//! Loading the chart data object the page embeds as
//! `window.wealthTimelineData`.

use rfp_core::chart_data::ChartData;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Global the generated page assigns the chart data to.
pub const DATA_GLOBAL: &str = "wealthTimelineData";

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("window.{0} is not defined")]
    Missing(&'static str),

    #[error("window.{0} could not be serialized")]
    NotSerializable(&'static str),

    #[error("Invalid chart data: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Read and decode the page's chart data object.
pub fn load_page_data() -> Result<ChartData, DataLoadError> {
    let value = web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str(DATA_GLOBAL)).ok())
        .filter(|v| !v.is_undefined() && !v.is_null())
        .ok_or(DataLoadError::Missing(DATA_GLOBAL))?;

    let json = js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|s| s.as_string())
        .ok_or(DataLoadError::NotSerializable(DATA_GLOBAL))?;

    let data = ChartData::from_json(&json)?;
    log::info!(
        "[Data] loaded {} points, {} trend points",
        data.data.len(),
        data.trend_points().map_or(0, <[_]>::len)
    );
    Ok(data)
}
