use log::info;
use wasm_bindgen::JsValue;
use web_sys::{ErrorEvent, Event};

use crate::dom::{self, Listener};
use crate::error::PageError;

/// Milliseconds from navigation start until DOM-content-ready finished,
/// or `None` while either mark is still unset.
pub fn load_time_ms(navigation_start: f64, dom_ready_end: f64) -> Option<f64> {
    if navigation_start <= 0.0 || dom_ready_end < navigation_start {
        return None;
    }
    Some(dom_ready_end - navigation_start)
}

fn log_load_time() {
    let Some(timing) = dom::window()
        .and_then(|w| w.performance())
        .map(|p| p.timing())
    else {
        return;
    };
    if let Some(ms) = load_time_ms(timing.navigation_start(), timing.dom_content_loaded_event_end()) {
        info!("Page loaded in {}ms", ms);
    }
}

pub fn wire() -> Result<Vec<Listener>, PageError> {
    let window = dom::require_window()?;
    let mut listeners = Vec::new();

    let already_loaded = dom::document()
        .map(|d| dom::fully_loaded(&d.ready_state()))
        .unwrap_or(false);
    if already_loaded {
        log_load_time();
    } else {
        listeners.push(Listener::new(&window, "load", |_: Event| log_load_time())?);
    }

    listeners.push(Listener::typed(&window, "error", |e: ErrorEvent| {
        let error = e.error();
        if error.is_undefined() || error.is_null() {
            gloo_console::error!("An error occurred:", JsValue::from_str(&e.message()));
        } else {
            gloo_console::error!("An error occurred:", error);
        }
    })?);

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_between_marks() {
        assert_eq!(load_time_ms(1_000.0, 1_450.0), Some(450.0));
    }

    #[test]
    fn unset_marks_yield_nothing() {
        assert_eq!(load_time_ms(0.0, 1_450.0), None);
        assert_eq!(load_time_ms(1_000.0, 0.0), None);
    }
}
