use log::debug;
use web_sys::MouseEvent;

use crate::config::PageConfig;
use crate::dom::{self, Listener};
use crate::error::PageError;

pub const FRAGMENT_LINKS: &str = r##"a[href^="#"]"##;

/// Id targeted by an in-page link, or `None` for a bare `#` and non-fragment hrefs.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Where the viewport should land so the target clears the fixed header.
pub fn scroll_target(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

/// What a click on an in-page link should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorClick {
    /// Bare `#` or not a fragment: leave the browser alone.
    Ignore,
    /// Fragment whose target is missing: suppress the jump only.
    PreventOnly,
    /// Suppress the jump and scroll smoothly to this offset.
    ScrollTo(f64),
}

/// `resolve` maps an element id to its offset from the top of the page.
pub fn anchor_click<R>(href: &str, header_offset: f64, resolve: R) -> AnchorClick
where
    R: FnOnce(&str) -> Option<f64>,
{
    let Some(id) = fragment_target(href) else {
        return AnchorClick::Ignore;
    };
    match resolve(id) {
        Some(top) => AnchorClick::ScrollTo(scroll_target(top, header_offset)),
        None => {
            debug!("No element for #{}", id);
            AnchorClick::PreventOnly
        }
    }
}

pub fn wire(config: &PageConfig) -> Result<Vec<Listener>, PageError> {
    let header_offset = config.header_offset;
    let links = dom::query_all(FRAGMENT_LINKS);
    debug!("Smooth scrolling {} fragment links", links.len());

    links
        .into_iter()
        .map(|link| {
            let anchor = link.clone();
            Listener::typed(&link, "click", move |e: MouseEvent| {
                let href = anchor.get_attribute("href").unwrap_or_default();
                let outcome = anchor_click(&href, header_offset, |id| {
                    dom::by_id(id).and_then(|target| dom::offset_top(&target))
                });
                match outcome {
                    AnchorClick::Ignore => {}
                    AnchorClick::PreventOnly => e.prevent_default(),
                    AnchorClick::ScrollTo(top) => {
                        e.prevent_default();
                        dom::scroll_smooth(top);
                    }
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("/about#team"), None);
    }

    #[test]
    fn fragment_resolves_to_id() {
        assert_eq!(fragment_target("#services"), Some("services"));
    }

    #[test]
    fn resolvable_fragment_scrolls_below_header() {
        let outcome = anchor_click("#about", 80.0, |id| (id == "about").then_some(640.0));
        assert_eq!(outcome, AnchorClick::ScrollTo(560.0));
    }

    #[test]
    fn bare_hash_click_does_nothing() {
        let outcome = anchor_click("#", 80.0, |_| panic!("bare # must not be resolved"));
        assert_eq!(outcome, AnchorClick::Ignore);
    }

    #[test]
    fn missing_target_only_suppresses_the_jump() {
        assert_eq!(anchor_click("#gone", 80.0, |_| None), AnchorClick::PreventOnly);
    }

    #[test]
    fn target_clears_header() {
        assert_eq!(scroll_target(1200.0, 80.0), 1120.0);
        assert_eq!(scroll_target(40.0, 80.0), -40.0);
    }
}
