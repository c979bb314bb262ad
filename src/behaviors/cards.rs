use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::dom::{self, Listener};
use crate::error::PageError;

pub const CARDS: &str = ".card";
pub const HOVER_LIFT: &str = ".hover-lift";
const LIFT_TRANSITION: &str = "transform 0.3s ease, box-shadow 0.3s ease";

pub fn activates_card(key: &str) -> bool {
    key == "Enter"
}

/// Makes every card that wraps a link focusable and lets Enter follow the link.
pub fn wire_keyboard_access() -> Result<Vec<Listener>, PageError> {
    let mut listeners = Vec::new();
    for card in dom::query_all(CARDS) {
        let Some(link) = card
            .query_selector("a")
            .ok()
            .flatten()
            .and_then(|a| a.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        card.set_attribute("tabindex", "0")?;
        let own_target: EventTarget = card.clone().into();
        listeners.push(Listener::typed(&card, "keydown", move |e: KeyboardEvent| {
            // Enter on the link itself already navigates.
            let on_card = e.target().map(|t| t == own_target).unwrap_or(false);
            if on_card && activates_card(&e.key()) {
                link.click();
            }
        })?);
    }
    debug!("{} cards made keyboard-accessible", listeners.len());
    Ok(listeners)
}

pub fn wire_hover_lift() -> Result<Vec<Listener>, PageError> {
    dom::query_all(HOVER_LIFT)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|card| {
            let styled = card.clone();
            Listener::new(&card, "mouseenter", move |_: Event| {
                let _ = styled.style().set_property("transition", LIFT_TRANSITION);
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_activates() {
        assert!(activates_card("Enter"));
        assert!(!activates_card(" "));
        assert!(!activates_card("Tab"));
    }
}
