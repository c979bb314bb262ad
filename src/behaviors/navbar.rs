use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::{Element, Event};

use crate::config::PageConfig;
use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::toolkit::CollapseController;

pub const NAVBAR: &str = ".navbar";
pub const NAV_LINKS: &str = ".nav-link";
pub const MOBILE_MENU: &str = ".navbar-collapse";
const SHADOW_CLASS: &str = "shadow";
const MENU_OPEN_CLASS: &str = "show";

pub fn shadow_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Last observed scroll offset and whether the navbar currently shows its shadow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavbarState {
    pub last_scroll: f64,
    pub scrolled: bool,
}

impl NavbarState {
    /// Records a scroll offset. Returns the new shadow state when it flipped.
    pub fn observe(&mut self, scroll_y: f64, threshold: f64) -> Option<bool> {
        if scroll_y == self.last_scroll {
            return None;
        }
        self.last_scroll = scroll_y;
        let scrolled = shadow_visible(scroll_y, threshold);
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }
}

/// Collapses the mobile menu after a nav link was followed. Returns whether it was asked to.
pub fn close_menu_if_open<C: CollapseController + ?Sized>(open: bool, collapse: &C) -> bool {
    open && collapse.hide_collapse(MOBILE_MENU)
}

fn apply_shadow(navbar: &Element, on: bool) {
    let classes = navbar.class_list();
    let _ = if on {
        classes.add_1(SHADOW_CLASS)
    } else {
        classes.remove_1(SHADOW_CLASS)
    };
}

pub fn wire(config: &PageConfig, collapse: Rc<dyn CollapseController>) -> Result<Vec<Listener>, PageError> {
    let mut listeners = Vec::new();
    let threshold = config.navbar_shadow_threshold;

    match dom::query(NAVBAR) {
        Some(navbar) => {
            let state = Rc::new(RefCell::new(NavbarState::default()));
            if let Some(on) = state.borrow_mut().observe(dom::scroll_y(), threshold) {
                apply_shadow(&navbar, on);
            }
            let window = dom::require_window()?;
            listeners.push(Listener::new(&window, "scroll", move |_: Event| {
                let flipped = state.borrow_mut().observe(dom::scroll_y(), threshold);
                if let Some(on) = flipped {
                    apply_shadow(&navbar, on);
                }
            })?);
        }
        None => debug!("No {} on this page", NAVBAR),
    }

    for link in dom::query_all(NAV_LINKS) {
        let collapse = collapse.clone();
        listeners.push(Listener::new(&link, "click", move |_: Event| {
            let open = dom::query(MOBILE_MENU)
                .map(|menu| menu.class_list().contains(MENU_OPEN_CLASS))
                .unwrap_or(false);
            close_menu_if_open(open, collapse.as_ref());
        })?);
    }

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::MockCollapseController;
    use mockall::predicate::eq;

    #[test]
    fn open_menu_is_collapsed() {
        let mut collapse = MockCollapseController::new();
        collapse
            .expect_hide_collapse()
            .with(eq(MOBILE_MENU))
            .times(1)
            .return_const(true);
        assert!(close_menu_if_open(true, &collapse));
    }

    #[test]
    fn closed_menu_is_left_alone() {
        let mut collapse = MockCollapseController::new();
        collapse.expect_hide_collapse().never();
        assert!(!close_menu_if_open(false, &collapse));
    }

    #[test]
    fn shadow_flips_only_on_threshold_crossings() {
        let mut state = NavbarState::default();
        assert_eq!(state.observe(10.0, 50.0), None);
        assert_eq!(state.observe(51.0, 50.0), Some(true));
        assert_eq!(state.observe(400.0, 50.0), None);
        assert_eq!(state.observe(50.0, 50.0), Some(false));
        assert_eq!(state.last_scroll, 50.0);
        assert!(!state.scrolled);
    }
}
