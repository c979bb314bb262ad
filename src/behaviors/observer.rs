use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::PageError;

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl ObserverOptions {
    /// Fires once `threshold` of the element is visible, treating the bottom
    /// `pull_in_px` of the viewport as outside it.
    pub fn pulled_in(threshold: f64, pull_in_px: u32) -> Self {
        Self {
            threshold,
            root_margin: root_margin(pull_in_px),
        }
    }
}

pub fn root_margin(pull_in_px: u32) -> String {
    if pull_in_px == 0 {
        "0px".to_string()
    } else {
        format!("0px 0px -{}px 0px", pull_in_px)
    }
}

/// Calls `on_enter` the first time each observed element intersects the
/// viewport, then stops watching that element.
pub struct OneShotObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl OneShotObserver {
    pub fn new<F>(options: Option<&ObserverOptions>, mut on_enter: F) -> Result<Self, PageError>
    where
        F: FnMut(&Element) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                on_enter(&target);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let observer = match options {
            Some(options) => {
                let init = IntersectionObserverInit::new();
                init.set_threshold(&JsValue::from_f64(options.threshold));
                init.set_root_margin(&options.root_margin);
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?
            }
            None => IntersectionObserver::new(callback.as_ref().unchecked_ref())?,
        };

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe_all(&self, elements: &[Element]) {
        for element in elements {
            self.observer.observe(element);
        }
    }
}

impl Drop for OneShotObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_pulls_in_bottom_edge() {
        assert_eq!(root_margin(50), "0px 0px -50px 0px");
        assert_eq!(root_margin(0), "0px");
    }

    #[test]
    fn options_carry_threshold() {
        let options = ObserverOptions::pulled_in(0.1, 50);
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }
}
