use log::warn;
use web_sys::{Event, MouseEvent};
use yew::prelude::*;

use crate::dom::{self, Listener};

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Properties, PartialEq)]
pub struct BackToTopProps {
    pub threshold: f64,
}

#[function_component(BackToTop)]
pub fn back_to_top(props: &BackToTopProps) -> Html {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |threshold: &f64| {
                let threshold = *threshold;
                visible.set(back_to_top_visible(dom::scroll_y(), threshold));
                let listener = dom::window().and_then(|window| {
                    Listener::new(&window, "scroll", move |_: Event| {
                        visible.set(back_to_top_visible(dom::scroll_y(), threshold));
                    })
                    .map_err(|e| warn!("Could not wire back-to-top: {}", e))
                    .ok()
                });
                move || drop(listener)
            },
            props.threshold,
        );
    }

    let onclick = Callback::from(|_: MouseEvent| dom::scroll_smooth(0.0));

    html! {
        <button
            type="button"
            class="btn btn-primary position-fixed bottom-0 end-0 m-4 rounded-circle"
            style={format!(
                "width: 50px; height: 50px; z-index: 1000; display: {};",
                if *visible { "block" } else { "none" }
            )}
            aria-label="Back to top"
            {onclick}
        >
            <i class="bi bi-arrow-up"></i>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_past_threshold_and_hides_again() {
        assert!(back_to_top_visible(301.0, 300.0));
        assert!(!back_to_top_visible(100.0, 300.0));
        assert!(!back_to_top_visible(300.0, 300.0));
    }
}
