//! Try-get lookups and listener plumbing shared by every behavior.
//!
//! Lookups return `Option` so callers have to decide what a missing element
//! means for them; none of these helpers panic when markup is absent.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::error::PageError;

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

pub fn require_window() -> Result<Window, PageError> {
    window().ok_or(PageError::MissingGlobal("window"))
}

pub fn require_document() -> Result<Document, PageError> {
    document().ok_or(PageError::MissingGlobal("document"))
}

pub fn require_body() -> Result<HtmlElement, PageError> {
    require_document()?.body().ok_or(PageError::MissingGlobal("document.body"))
}

/// `document.readyState` past `"loading"`: the DOM is parsed.
pub fn dom_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// `document.readyState` of `"complete"`: the `load` event has fired.
pub fn fully_loaded(ready_state: &str) -> bool {
    ready_state == "complete"
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Looks an element up by id and narrows it to a concrete element type.
pub fn by_id_as<T: JsCast>(id: &str) -> Option<T> {
    by_id(id)?.dyn_into::<T>().ok()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    match document.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(e) => {
            log::warn!("Invalid selector {}: {:?}", selector, e);
            Vec::new()
        }
    }
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn offset_top(element: &Element) -> Option<f64> {
    element
        .dyn_ref::<HtmlElement>()
        .map(|el| f64::from(el.offset_top()))
}

/// Animates the viewport to `top`.
pub fn scroll_smooth(top: f64) {
    let Some(window) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// An event subscription that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, PageError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Like [`Listener::new`] but hands the handler the concrete event type,
    /// skipping events that do not cast.
    pub fn typed<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self, PageError>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        Self::new(target, event, move |e: Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_states() {
        assert!(!dom_parsed("loading"));
        assert!(dom_parsed("interactive"));
        assert!(dom_parsed("complete"));
        assert!(!fully_loaded("interactive"));
        assert!(fully_loaded("complete"));
    }
}
