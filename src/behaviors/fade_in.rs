use log::debug;
use web_sys::Element;

use crate::behaviors::observer::{ObserverOptions, OneShotObserver};
use crate::config::PageConfig;
use crate::dom;
use crate::error::PageError;

pub const FADE_TARGETS: &str = ".card, section";
pub const REVEALED_CLASS: &str = "animate-fade-in";

pub trait RevealTarget {
    fn is_revealed(&self) -> bool;
    fn mark_revealed(&self);
}

impl RevealTarget for Element {
    fn is_revealed(&self) -> bool {
        self.class_list().contains(REVEALED_CLASS)
    }

    fn mark_revealed(&self) {
        let _ = self.class_list().add_1(REVEALED_CLASS);
    }
}

/// Reveals `target` unless it already was. Returns whether anything changed.
pub fn reveal<T: RevealTarget + ?Sized>(target: &T) -> bool {
    if target.is_revealed() {
        return false;
    }
    target.mark_revealed();
    true
}

pub fn wire(config: &PageConfig) -> Result<Option<OneShotObserver>, PageError> {
    let targets = dom::query_all(FADE_TARGETS);
    if targets.is_empty() {
        return Ok(None);
    }
    let options = ObserverOptions::pulled_in(config.fade_in_threshold, config.fade_in_pull_in_px);
    let observer = OneShotObserver::new(Some(&options), |element| {
        reveal(element);
    })?;
    observer.observe_all(&targets);
    debug!("Fade-in watching {} elements", targets.len());
    Ok(Some(observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeElement {
        revealed: Cell<bool>,
        marks: Cell<u32>,
    }

    impl RevealTarget for FakeElement {
        fn is_revealed(&self) -> bool {
            self.revealed.get()
        }

        fn mark_revealed(&self) {
            self.revealed.set(true);
            self.marks.set(self.marks.get() + 1);
        }
    }

    #[test]
    fn reveal_is_one_shot() {
        let element = FakeElement::default();
        assert!(reveal(&element));
        assert!(!reveal(&element));
        assert!(!reveal(&element));
        assert_eq!(element.marks.get(), 1);
    }
}
