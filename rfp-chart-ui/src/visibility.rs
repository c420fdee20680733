//! Scroll-into-view trigger built on `IntersectionObserver`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Fraction of the element that must be visible to fire.
pub const VISIBLE_THRESHOLD: f64 = 0.5;

/// Observes one element until dropped.
pub struct VisibilityTrigger {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl VisibilityTrigger {
    /// Call `on_visible` each time `element` becomes at least
    /// [`VISIBLE_THRESHOLD`] visible.
    pub fn observe(element: &Element, mut on_visible: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let visible = entries
                    .iter()
                    .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                    .any(|entry| entry.is_intersecting());
                if visible {
                    on_visible();
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(VISIBLE_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        observer.observe(element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
