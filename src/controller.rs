//! The single page controller: built once the document is ready and kept for
//! the lifetime of the page.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info};
use wasm_bindgen::prelude::*;
use yew::AppHandle;

use crate::behaviors::observer::OneShotObserver;
use crate::behaviors::{
    accordion, cards, counters, fade_in, forms, instrumentation, lazy_images, navbar, smooth_scroll,
};
use crate::components::alerts::{AlertChannel, Notifier, Severity};
use crate::components::overlays::{Overlays, OverlaysProps, OVERLAY_HOST_ID};
use crate::config::PageConfig;
use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::toolkit::{Bootstrap, CollapseController, DialogController};

thread_local! {
    static PAGE: RefCell<Option<PageController>> = RefCell::new(None);
    // Exists before boot so alerts raised early are queued, not lost.
    static ALERTS: AlertChannel = AlertChannel::default();
}

pub fn alert_channel() -> AlertChannel {
    ALERTS.with(AlertChannel::clone)
}

pub struct PageController {
    config: PageConfig,
    alerts: AlertChannel,
    dialogs: Rc<dyn DialogController>,
    anchors: Vec<Listener>,
    forms: Vec<Listener>,
    listeners: Vec<Listener>,
    observers: Vec<OneShotObserver>,
    _overlays: AppHandle<Overlays>,
}

/// Logs a failed wiring step and carries on with an empty result.
fn attempt<T: Default>(what: &str, result: Result<T, PageError>) -> T {
    result.unwrap_or_else(|e| {
        error!("Failed to initialize {}: {}", what, e);
        T::default()
    })
}

impl PageController {
    pub fn init() -> Result<Self, PageError> {
        let config = PageConfig::load();
        let toolkit = Rc::new(Bootstrap);
        let dialogs: Rc<dyn DialogController> = toolkit.clone();
        let collapse: Rc<dyn CollapseController> = toolkit;
        let alerts = alert_channel();

        let overlays = mount_overlays(&alerts, &config)?;

        let mut listeners = Vec::new();
        listeners.extend(attempt("navbar", navbar::wire(&config, collapse)));
        listeners.extend(attempt("accordions", accordion::wire(&config)));
        listeners.extend(attempt("card keyboard access", cards::wire_keyboard_access()));
        listeners.extend(attempt("hover lift", cards::wire_hover_lift()));
        listeners.extend(attempt("instrumentation", instrumentation::wire()));

        let observers = [
            attempt("fade-in", fade_in::wire(&config)),
            attempt("lazy images", lazy_images::wire()),
            attempt("counters", counters::wire(&config)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut page = Self {
            anchors: Vec::new(),
            forms: Vec::new(),
            listeners,
            observers,
            alerts,
            dialogs,
            config,
            _overlays: overlays,
        };
        page.init_smooth_scrolling();
        page.init_form_handling();
        Ok(page)
    }

    /// (Re)binds fragment links; previously bound listeners are released.
    pub fn init_smooth_scrolling(&mut self) {
        self.anchors = attempt("smooth scrolling", smooth_scroll::wire(&self.config));
    }

    pub fn init_form_handling(&mut self) {
        let notifier: Rc<dyn Notifier> = Rc::new(self.alerts.clone());
        self.forms = attempt("forms", forms::wire(self.dialogs.clone(), notifier));
    }

    pub fn wired(&self) -> usize {
        self.anchors.len() + self.forms.len() + self.listeners.len() + self.observers.len()
    }
}

fn mount_overlays(alerts: &AlertChannel, config: &PageConfig) -> Result<AppHandle<Overlays>, PageError> {
    let document = dom::require_document()?;
    let host = match document.get_element_by_id(OVERLAY_HOST_ID) {
        Some(host) => host,
        None => {
            let host = document.create_element("div")?;
            host.set_id(OVERLAY_HOST_ID);
            dom::require_body()?.append_child(&host)?;
            host
        }
    };
    let props = OverlaysProps {
        channel: alerts.clone(),
        config: config.clone(),
    };
    Ok(yew::Renderer::<Overlays>::with_root_and_props(host, props).render())
}

fn boot() {
    match PageController::init() {
        Ok(page) => {
            info!("ECS Portfolio initialized successfully ({} bindings)", page.wired());
            PAGE.with(|cell| *cell.borrow_mut() = Some(page));
        }
        Err(e) => error!("Page initialization failed: {}", e),
    }
}

/// Boots now if the DOM is parsed, otherwise on `DOMContentLoaded`.
pub fn boot_when_ready() -> Result<(), PageError> {
    let document = dom::require_document()?;
    if dom::dom_parsed(&document.ready_state()) {
        boot();
        return Ok(());
    }
    let on_ready = Closure::once_into_js(boot);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}

fn with_page(action: impl FnOnce(&mut PageController)) {
    PAGE.with(|cell| match cell.borrow_mut().as_mut() {
        Some(page) => action(page),
        None => log::warn!("Page controller is not initialized yet"),
    });
}

#[wasm_bindgen(js_name = showAlert)]
pub fn show_alert(kind: &str, message: &str) {
    alert_channel().notify(Severity::from_tag(kind), message);
}

#[wasm_bindgen(js_name = initSmoothScrolling)]
pub fn init_smooth_scrolling() {
    with_page(PageController::init_smooth_scrolling);
}

#[wasm_bindgen(js_name = initFormHandling)]
pub fn init_form_handling() {
    with_page(PageController::init_form_handling);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_before_boot_are_queued() {
        show_alert("primary", "Welcome back");
        show_alert("danger", "Offline");
        assert_eq!(alert_channel().pending(), 2);
        assert!(alert_channel() == alert_channel());
    }
}
