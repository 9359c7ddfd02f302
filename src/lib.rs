/// Site Timer - Chrome Extension for per-site focus time
/// Built with Rust + WASM + Yew

mod background;
mod chrome;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod hostname;
pub mod report;
pub mod site_time;
pub mod storage;
pub mod tab_data;
pub mod tracker;
pub mod ui;

#[cfg(test)]
mod test_utils;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Exposed for debugging from the extension console
#[wasm_bindgen]
pub fn hostname_of(url: &str) -> Option<String> {
    hostname::hostname_of(url)
}

// Start tracking from the background service worker
#[wasm_bindgen]
pub fn start_tracker() {
    background::start(config::TrackerConfig::default());
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
