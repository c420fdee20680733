//! DOM binding for the site navigation.
//!
//! Missing elements are skipped silently: a page without a menu toggle still
//! gets anchor scrolling and scroll-spy.

use rfp_chart::{NavigationController, NavigationView, Section};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions};

const ACTIVE_CLASS: &str = "active";

/// [`NavigationView`] over the live document.
pub struct WebNavigation {
    document: Document,
}

impl WebNavigation {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn set_class(element: &Element, on: bool) {
        let classes = element.class_list();
        let result = if on {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        if let Err(e) = result {
            log::warn!("[Nav] class update failed: {:?}", e);
        }
    }
}

impl NavigationView for WebNavigation {
    fn set_menu_open(&mut self, open: bool) {
        for selector in [".nav-toggle", ".nav"] {
            if let Ok(Some(element)) = self.document.query_selector(selector) {
                Self::set_class(&element, open);
            }
        }
    }

    fn target_offset(&self, id: &str) -> Option<f64> {
        if id.is_empty() {
            return None;
        }
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|el| f64::from(el.offset_top()))
    }

    fn scroll_to(&mut self, top: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }

    fn set_active_link(&mut self, section_id: Option<&str>) {
        let Ok(links) = self.document.query_selector_all(".nav-link") else {
            return;
        };
        let active_href = section_id.map(|id| format!("#{}", id));
        for link in elements(&links) {
            let on = active_href.is_some() && link.get_attribute("href") == active_href;
            Self::set_class(&link, on);
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `section[id]` elements in document order.
pub fn page_sections(document: &Document) -> Vec<Section> {
    let Ok(list) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    elements(&list)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| Section::new(el.id(), f64::from(el.offset_top())))
        .collect()
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[Nav] could not listen for '{}': {:?}", event, e);
    }
    // Page-lifetime listener.
    closure.forget();
}

/// Attach menu toggle, anchor scrolling and scroll-spy to the page.
pub fn attach_navigation() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let controller = Rc::new(RefCell::new(NavigationController::new(WebNavigation::new(
        document.clone(),
    ))));

    if let Ok(Some(toggle)) = document.query_selector(".nav-toggle") {
        let controller = controller.clone();
        listen(&toggle, "click", move |_| {
            controller.borrow_mut().toggle_menu();
        });
    }

    if let Ok(anchors) = document.query_selector_all("a[href^=\"#\"]") {
        for anchor in elements(&anchors) {
            let controller = controller.clone();
            let href = anchor.get_attribute("href").unwrap_or_default();
            listen(&anchor, "click", move |event| {
                if controller.borrow_mut().on_link_click(&href).prevents_default() {
                    event.prevent_default();
                }
            });
        }
    }

    let scroll_window = window.clone();
    listen(&window, "scroll", move |_| {
        let scroll_y = scroll_window.scroll_y().unwrap_or_default();
        let sections = page_sections(&document);
        controller.borrow_mut().on_scroll(scroll_y, &sections);
    });

    log::info!("[Nav] navigation attached");
}
