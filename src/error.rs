/// Error types shared by the extension contexts
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::tab::TabId;

/// Injection failure reason when the tab has no content script listening
pub const NO_PAGE_AGENT: &str = "page agent not installed";

/// Failure of a call into the browser platform (tabs, scripting, side panel,
/// runtime messaging). These reach the caller; nothing retries them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("no active tab in the current window")]
    NoActiveTab,

    #[error("tab query failed: {0}")]
    TabQuery(String),

    #[error("script injection into tab {tab_id} failed: {reason}")]
    Injection { tab_id: TabId, reason: String },

    #[error("side panel update for tab {tab_id} failed: {reason}")]
    SidePanel { tab_id: TabId, reason: String },

    #[error("message delivery failed: {0}")]
    Messaging(String),

    #[error("malformed data: {0}")]
    Serialization(String),
}

impl From<serde_wasm_bindgen::Error> for BridgeError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        BridgeError::Serialization(e.to_string())
    }
}

impl From<BridgeError> for JsValue {
    fn from(e: BridgeError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Failure inside the page itself. Page actions swallow these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PageError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),

    #[error("page script error: {0}")]
    Script(String),
}

impl PageError {
    pub fn from_js(value: JsValue) -> PageError {
        PageError::Script(format!("{:?}", value))
    }
}
