use gloo_timers::callback::Timeout;
use web_sys::Event;

use crate::behaviors::smooth_scroll::scroll_target;
use crate::config::PageConfig;
use crate::dom::{self, Listener};
use crate::error::PageError;

pub const ACCORDION_TOGGLES: &str = ".accordion-button";
pub const ACCORDION_ITEM: &str = ".accordion-item";

/// Brings an expanded accordion item near the top once its animation settles.
pub fn wire(config: &PageConfig) -> Result<Vec<Listener>, PageError> {
    let delay = config.accordion_settle_ms;
    let offset = config.accordion_offset;

    dom::query_all(ACCORDION_TOGGLES)
        .into_iter()
        .map(|toggle| {
            let button = toggle.clone();
            Listener::new(&toggle, "click", move |_: Event| {
                let button = button.clone();
                Timeout::new(delay, move || {
                    let item = button.closest(ACCORDION_ITEM).ok().flatten();
                    if let Some(top) = item.as_ref().and_then(dom::offset_top) {
                        dom::scroll_smooth(scroll_target(top, offset));
                    }
                })
                .forget();
            })
        })
        .collect()
}
