//! Bridge to the page's modal/collapse toolkit (Bootstrap 5).
//!
//! Behaviors only see the [`DialogController`] and [`CollapseController`]
//! traits; [`Bootstrap`] is the implementation used on the live page.

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom;

#[cfg_attr(test, mockall::automock)]
pub trait DialogController {
    /// Closes the dialog. Returns false when no controller exists for it.
    fn hide(&self, dialog_id: &str) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait CollapseController {
    fn hide_collapse(&self, panel_selector: &str) -> bool;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Modal;

    #[wasm_bindgen(catch, static_method_of = Modal, js_namespace = bootstrap, js_name = getInstance)]
    fn get_instance(element: &Element) -> Result<Option<Modal>, JsValue>;

    #[wasm_bindgen(method)]
    fn hide(this: &Modal);

    #[wasm_bindgen(js_namespace = bootstrap)]
    type Collapse;

    #[wasm_bindgen(catch, constructor, js_namespace = bootstrap)]
    fn new(element: &Element) -> Result<Collapse, JsValue>;

    #[wasm_bindgen(method, js_name = hide)]
    fn hide_panel(this: &Collapse);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Bootstrap;

impl DialogController for Bootstrap {
    fn hide(&self, dialog_id: &str) -> bool {
        let Some(element) = dom::by_id(dialog_id) else {
            return false;
        };
        match Modal::get_instance(&element) {
            Ok(Some(modal)) => {
                modal.hide();
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::debug!("bootstrap.Modal unavailable for #{}: {:?}", dialog_id, e);
                false
            }
        }
    }
}

impl CollapseController for Bootstrap {
    fn hide_collapse(&self, panel_selector: &str) -> bool {
        let Some(panel) = dom::query(panel_selector) else {
            return false;
        };
        match Collapse::new(&panel) {
            Ok(collapse) => {
                collapse.hide_panel();
                true
            }
            Err(e) => {
                log::debug!("bootstrap.Collapse unavailable for {}: {:?}", panel_selector, e);
                false
            }
        }
    }
}
