/// Extension-wide settings, loaded once per context at startup
use std::sync::OnceLock;

use log::warn;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// The only origin whose pages get the side panel
pub const SITE_ORIGIN: &str = "https://www.oxfordlearnersdictionaries.com";

/// Panel document activated for supported tabs
pub const SIDE_PANEL_PATH: &str = "sidepanel.html";

static SETTINGS: SettingsCell = SettingsCell::new();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub site_origin: String,
    pub side_panel_path: String,
    /// Play the pronunciation as soon as a new entry page is reported
    pub autoplay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            site_origin: SITE_ORIGIN.to_string(),
            side_panel_path: SIDE_PANEL_PATH.to_string(),
            autoplay: true,
        }
    }
}

impl Settings {
    /// Read settings handed over by the JS loader. Missing or malformed input
    /// yields the defaults.
    pub fn from_js(value: JsValue) -> Settings {
        if value.is_null() || value.is_undefined() {
            return Settings::default();
        }

        serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
            warn!("Ignoring malformed settings, using defaults: {}", e);
            Settings::default()
        })
    }
}

/// Write-once holder. Reading before the first write sees the defaults
/// without claiming the slot, so a later `init` still takes effect.
#[derive(Default)]
pub struct SettingsCell(OnceLock<Settings>);

impl SettingsCell {
    pub const fn new() -> Self {
        SettingsCell(OnceLock::new())
    }

    pub fn init(&self, settings: Settings) -> bool {
        self.0.set(settings).is_ok()
    }

    pub fn get(&self) -> Settings {
        self.0.get().cloned().unwrap_or_default()
    }
}

/// Store the settings for this context. The first call wins; returns false if
/// settings were already in place.
pub fn init_settings(settings: Settings) -> bool {
    SETTINGS.init(settings)
}

/// Current settings, or the defaults while `start_*` has not run yet
pub fn settings() -> Settings {
    SETTINGS.get()
}
