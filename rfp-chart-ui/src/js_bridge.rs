//! Chart.js bindings.
//!
//! Chart.js is loaded by the page as the global `Chart`. [`ChartJsBackend`]
//! builds a chart on a canvas and hands back a [`ChartJsEngine`], which drives
//! the instance through `data.datasets[i].data`, `update()` and `destroy()`.

use crate::chart_config::{
    timeline_config, TOOLTIP_LABEL_PATH, TOOLTIP_TITLE_PATH, Y_TICK_PATH, Y_TITLE_PATH,
};
use rfp_chart::labels::{axis_tick, tooltip_label, tooltip_title};
use rfp_chart::{ChartBackend, ChartEngine, ChartError, ChartSetup, Series};
use rfp_core::chart_data::TimePoint;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// A Chart.js instance.
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &web_sys::HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn update(this: &Chart, mode: &str);

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

/// Whether the Chart.js global is present.
pub fn chart_library_loaded() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Chart")).unwrap_or(false)
}

fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

fn get_path(root: &JsValue, path: &[&str]) -> Result<JsValue, JsValue> {
    path.iter().try_fold(root.clone(), |node, key| {
        js_sys::Reflect::get(&node, &JsValue::from_str(key))
    })
}

fn set_path(root: &JsValue, path: &[&str], value: &JsValue) -> Result<(), JsValue> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| JsValue::from_str("empty path"))?;
    let parent = get_path(root, parents)?;
    js_sys::Reflect::set(&parent, &JsValue::from_str(last), value)?;
    Ok(())
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Formatter callbacks referenced by the chart config. They must outlive the
/// chart instance.
struct Formatters {
    _label: Closure<dyn Fn(JsValue) -> JsValue>,
    _title: Closure<dyn Fn(js_sys::Array) -> JsValue>,
    _tick: Closure<dyn Fn(JsValue) -> JsValue>,
}

impl Formatters {
    fn attach(config: &JsValue) -> Result<Self, JsValue> {
        let label = Closure::<dyn Fn(JsValue) -> JsValue>::new(|context: JsValue| {
            let series = get_path(&context, &["dataset", "label"])
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            let value = get_path(&context, &["parsed", "y"])
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or_default();
            JsValue::from_str(&tooltip_label(&series, value))
        });
        let title = Closure::<dyn Fn(js_sys::Array) -> JsValue>::new(|items: js_sys::Array| {
            let x = get_path(&items.get(0), &["raw", "x"])
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            JsValue::from_str(&tooltip_title(&x))
        });
        let tick = Closure::<dyn Fn(JsValue) -> JsValue>::new(|value: JsValue| {
            JsValue::from_str(&axis_tick(value.as_f64().unwrap_or_default()))
        });

        set_path(config, &TOOLTIP_LABEL_PATH, label.as_ref())?;
        set_path(config, &TOOLTIP_TITLE_PATH, title.as_ref())?;
        set_path(config, &Y_TICK_PATH, tick.as_ref())?;

        Ok(Self {
            _label: label,
            _title: title,
            _tick: tick,
        })
    }
}

/// Builds Chart.js charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartJsBackend;

impl ChartBackend for ChartJsBackend {
    type Engine = ChartJsEngine;

    fn create(&self, canvas_id: &str, setup: &ChartSetup<'_>) -> Result<ChartJsEngine, ChartError> {
        if !chart_library_loaded() {
            return Err(ChartError::EngineUnavailable);
        }
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .ok_or_else(|| ChartError::CanvasNotFound(canvas_id.to_string()))?;

        let config = to_js(&timeline_config(setup))
            .map_err(|e| ChartError::Construction(js_message(&e)))?;
        let formatters =
            Formatters::attach(&config).map_err(|e| ChartError::Construction(js_message(&e)))?;
        let chart = Chart::new(&canvas, &config)
            .map_err(|e| ChartError::Construction(js_message(&e)))?;

        log::info!("[Chart.js] created chart on '{}'", canvas_id);
        Ok(ChartJsEngine {
            chart,
            _formatters: formatters,
        })
    }
}

/// A live Chart.js instance.
pub struct ChartJsEngine {
    chart: Chart,
    _formatters: Formatters,
}

impl ChartJsEngine {
    fn dataset(&self, series: Series) -> Option<JsValue> {
        let datasets = get_path(&self.chart, &["data", "datasets"]).ok()?;
        let dataset = datasets
            .dyn_ref::<js_sys::Array>()?
            .get(series.index() as u32);
        (!dataset.is_undefined()).then_some(dataset)
    }
}

impl ChartEngine for ChartJsEngine {
    fn set_series(&mut self, series: Series, points: &[TimePoint]) {
        let Some(dataset) = self.dataset(series) else {
            log::warn!("[Chart.js] dataset {:?} missing", series);
            return;
        };
        let result = to_js(points).and_then(|data| set_path(&dataset, &["data"], &data));
        if let Err(e) = result {
            log::warn!("[Chart.js] set_series failed: {}", js_message(&e));
        }
    }

    fn push_point(&mut self, series: Series, point: &TimePoint) {
        let Some(dataset) = self.dataset(series) else {
            log::warn!("[Chart.js] dataset {:?} missing", series);
            return;
        };
        let result = get_path(&dataset, &["data"])
            .and_then(|data| to_js(point).map(|p| data.unchecked_into::<js_sys::Array>().push(&p)));
        if let Err(e) = result {
            log::warn!("[Chart.js] push_point failed: {}", js_message(&e));
        }
    }

    fn set_y_axis_title(&mut self, title: &str) {
        let mut path = Y_TITLE_PATH.to_vec();
        path.push("text");
        if let Err(e) = set_path(&self.chart, &path, &JsValue::from_str(title)) {
            log::warn!("[Chart.js] set_y_axis_title failed: {}", js_message(&e));
        }
    }

    fn update(&mut self) {
        self.chart.update("none");
    }

    fn destroy(&mut self) {
        self.chart.destroy();
    }
}
