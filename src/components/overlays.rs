use yew::prelude::*;

use crate::components::alerts::{AlertChannel, AlertStack};
use crate::components::back_to_top::BackToTop;
use crate::components::lightbox::Lightbox;
use crate::config::PageConfig;

pub const OVERLAY_HOST_ID: &str = "page-overlays";
pub const GALLERY_SELECTOR: &str = ".gallery-img";

#[derive(Properties, PartialEq)]
pub struct OverlaysProps {
    pub channel: AlertChannel,
    pub config: PageConfig,
}

/// Everything the page layers on top of the static markup.
#[function_component(Overlays)]
pub fn overlays(props: &OverlaysProps) -> Html {
    html! {
        <>
            <AlertStack channel={props.channel.clone()} lifetime_ms={props.config.alert_lifetime_ms} />
            <Lightbox gallery_selector={GALLERY_SELECTOR} />
            <BackToTop threshold={props.config.back_to_top_threshold} />
        </>
    }
}
