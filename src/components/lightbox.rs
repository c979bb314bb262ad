use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::dom::{self, Listener};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Hidden,
    Visible {
        src: String,
    },
}

impl LightboxState {
    pub fn is_visible(&self) -> bool {
        matches!(self, LightboxState::Visible { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightboxAction {
    Open(String),
    Dismiss,
}

impl Reducible for LightboxState {
    type Action = LightboxAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            // Opening while visible swaps the image instead of stacking a second overlay.
            LightboxAction::Open(src) => Rc::new(LightboxState::Visible { src }),
            LightboxAction::Dismiss if self.is_visible() => Rc::new(LightboxState::Hidden),
            LightboxAction::Dismiss => self,
        }
    }
}

pub fn is_escape(key: &str) -> bool {
    key == "Escape"
}

/// What a keydown does to the lightbox.
pub fn key_action(key: &str) -> Option<LightboxAction> {
    is_escape(key).then_some(LightboxAction::Dismiss)
}

/// Whether a document-level Escape listener should exist for `state`.
pub fn wants_escape_listener(state: &LightboxState) -> bool {
    state.is_visible()
}

#[derive(Properties, PartialEq)]
pub struct LightboxProps {
    pub gallery_selector: AttrValue,
}

#[function_component(Lightbox)]
pub fn lightbox(props: &LightboxProps) -> Html {
    let state = use_reducer(LightboxState::default);

    {
        let state = state.clone();
        use_effect_with_deps(
            move |selector: &AttrValue| {
                let listeners: Vec<Listener> = dom::query_all(selector)
                    .into_iter()
                    .filter_map(|element| {
                        let image = element.clone();
                        let state = state.clone();
                        let listener = Listener::typed(&element, "click", move |_: MouseEvent| {
                            let src = match image.dyn_ref::<HtmlImageElement>() {
                                Some(img) => img.src(),
                                None => image.get_attribute("src").unwrap_or_default(),
                            };
                            state.dispatch(LightboxAction::Open(src));
                        });
                        match listener {
                            Ok(listener) => Some(listener),
                            Err(e) => {
                                warn!("Could not wire gallery image: {}", e);
                                None
                            }
                        }
                    })
                    .collect();
                debug!("Lightbox wired to {} gallery images", listeners.len());
                move || drop(listeners)
            },
            props.gallery_selector.clone(),
        );
    }

    // The Escape listener only lives while the overlay is up.
    {
        let wanted = wants_escape_listener(&state);
        let state = state.clone();
        use_effect_with_deps(
            move |wanted: &bool| {
                let listener = if *wanted {
                    dom::document().and_then(|document| {
                        Listener::typed(&document, "keydown", move |e: KeyboardEvent| {
                            if let Some(action) = key_action(&e.key()) {
                                state.dispatch(action);
                            }
                        })
                        .map_err(|e| warn!("Could not wire Escape for lightbox: {}", e))
                        .ok()
                    })
                } else {
                    None
                };
                move || drop(listener)
            },
            wanted,
        );
    }

    let dismiss = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(LightboxAction::Dismiss))
    };

    match &*state {
        LightboxState::Hidden => html! {},
        LightboxState::Visible { src } => html! {
            <div
                class="position-fixed top-0 start-0 w-100 h-100 d-flex align-items-center justify-content-center"
                style="background-color: rgba(0, 0, 0, 0.9); z-index: 9999; cursor: pointer;"
                onclick={dismiss}
            >
                <img src={src.clone()} class="img-fluid" style="max-width: 90%; max-height: 90%;" alt="" />
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(state: Rc<LightboxState>, src: &str) -> Rc<LightboxState> {
        state.reduce(LightboxAction::Open(src.to_string()))
    }

    #[test]
    fn click_opens_exactly_one_overlay() {
        let state = open(Rc::new(LightboxState::default()), "/img/a.jpg");
        assert_eq!(*state, LightboxState::Visible { src: "/img/a.jpg".into() });

        let state = open(state, "/img/b.jpg");
        assert_eq!(*state, LightboxState::Visible { src: "/img/b.jpg".into() });
    }

    #[test]
    fn dismiss_hides_and_is_idempotent() {
        let state = open(Rc::new(LightboxState::default()), "/img/a.jpg");
        let hidden = state.reduce(LightboxAction::Dismiss);
        assert_eq!(*hidden, LightboxState::Hidden);

        let again = hidden.clone().reduce(LightboxAction::Dismiss);
        assert!(Rc::ptr_eq(&hidden, &again));
    }

    #[test]
    fn only_escape_dismisses() {
        assert!(is_escape("Escape"));
        assert!(!is_escape("Esc"));
        assert_eq!(key_action("Escape"), Some(LightboxAction::Dismiss));
        assert_eq!(key_action("Enter"), None);
    }

    #[test]
    fn escape_listener_follows_overlay_lifetime() {
        let hidden = Rc::new(LightboxState::default());
        assert!(!wants_escape_listener(&hidden));

        let shown = open(hidden, "/img/a.jpg");
        assert!(wants_escape_listener(&shown));

        let action = key_action("Escape").unwrap();
        let dismissed = shown.reduce(action);
        assert_eq!(*dismissed, LightboxState::Hidden);
        assert!(!wants_escape_listener(&dismissed));
    }

    #[test]
    fn repeated_opens_keep_a_single_listener() {
        // The effect is keyed on the listener flag, so reopening while
        // visible does not re-run it and register another keydown handler.
        let mut state = Rc::new(LightboxState::default());
        let mut registrations = 0;
        let mut wanted = wants_escape_listener(&state);
        for src in ["/a.jpg", "/b.jpg", "/c.jpg"] {
            state = open(state, src);
            let now = wants_escape_listener(&state);
            if now && !wanted {
                registrations += 1;
            }
            wanted = now;
        }
        assert_eq!(registrations, 1);

        state = state.reduce(LightboxAction::Dismiss);
        assert!(!wants_escape_listener(&state));
    }

    #[test]
    fn overlay_click_dismisses() {
        let shown = open(Rc::new(LightboxState::default()), "/img/a.jpg");
        assert_eq!(*shown.reduce(LightboxAction::Dismiss), LightboxState::Hidden);
    }
}
