/// Lookup Companion - side panel companion for Oxford Learner's Dictionaries
/// Built with Rust + WASM

pub mod config;
pub mod error;
pub mod tab;
pub mod origin;
pub mod protocol;
pub mod extractor;
pub mod page_actions;
pub mod executor;
pub mod gatekeeper;
pub mod panel;
pub mod chrome;
pub mod web_page;
mod contexts;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod testing;

use wasm_bindgen::prelude::*;

use crate::config::{Settings, init_settings, settings};
use crate::contexts::{background, content, side_panel};

// Set up panic hook and logging for every context
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    wasm_logger::init(wasm_logger::Config::new(level));
}

fn load_settings(config: JsValue) {
    if !init_settings(Settings::from_js(config)) {
        log::warn!("Settings already loaded, ignoring new configuration");
    }
}

// Start the background service worker
#[wasm_bindgen]
pub fn start_background(config: JsValue) {
    load_settings(config);
    background::start();
}

// Start the content script inside a dictionary page
#[wasm_bindgen]
pub fn start_content_script(config: JsValue) {
    load_settings(config);
    content::start();
}

// Start the side panel
#[wasm_bindgen]
pub fn start_side_panel(config: JsValue) {
    load_settings(config);
    side_panel::start();
}

// Side panel commands against the active tab

#[wasm_bindgen]
pub async fn dictionary_lookup(search_text: String) -> Result<(), JsValue> {
    Ok(side_panel::executor().dictionary_lookup(&search_text).await?)
}

#[wasm_bindgen]
pub async fn open_url(url: String) -> Result<(), JsValue> {
    Ok(side_panel::executor().open_url(&url).await?)
}

#[wasm_bindgen]
pub async fn update_current_tab_data() -> Result<(), JsValue> {
    Ok(side_panel::executor().update_current_tab_data().await?)
}

#[wasm_bindgen]
pub async fn play_phonetics() -> Result<(), JsValue> {
    Ok(side_panel::executor().play_phonetics().await?)
}

#[wasm_bindgen]
pub fn current_tab_data() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&side_panel::current_tab_data()).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn set_autoplay(autoplay: bool) {
    side_panel::set_autoplay(autoplay);
}

// Whether the side panel is offered for a page at `url`
#[wasm_bindgen]
pub fn is_supported_page(url: &str) -> bool {
    origin::matches_origin(Some(url), &settings().site_origin).unwrap_or(false)
}
