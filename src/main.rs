mod config;
mod controller;
mod dom;
mod error;
mod toolkit;
mod components {
    pub mod alerts;
    pub mod back_to_top;
    pub mod lightbox;
    pub mod overlays;
}
mod behaviors {
    pub mod accordion;
    pub mod cards;
    pub mod counters;
    pub mod fade_in;
    pub mod forms;
    pub mod instrumentation;
    pub mod lazy_images;
    pub mod navbar;
    pub mod observer;
    pub mod smooth_scroll;
}

use log::{error, info};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting page controller");
    if let Err(e) = controller::boot_when_ready() {
        error!("Could not schedule page initialization: {}", e);
    }
}
