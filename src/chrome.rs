/// Bindings to the `chrome.*` extension APIs through the JS bridge module
use async_trait::async_trait;
use wasm_bindgen::prelude::*;

use crate::error::BridgeError;
use crate::executor::TabHost;
use crate::gatekeeper::{PanelEnablement, SidePanel};
use crate::protocol::{Command, MessageRelay, RelayMessage};
use crate::tab::{TabContext, TabId};

// Import JS bridge functions
#[wasm_bindgen(module = "/chrome.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: TabId) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn executeInTab(tab_id: TabId, command: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setPanelOptions(tab_id: TabId, options: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setPanelBehavior(open_on_action_click: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendRuntimeMessage(message: JsValue) -> Result<(), JsValue>;

    fn addRuntimeMessageListener(callback: &js_sys::Function);

    fn addCommandListener(callback: &js_sys::Function);

    fn installPageAgent(agent: &js_sys::Function);
}

// Background events, listened for from the bridge's first evaluation and
// queued until a handler is attached
#[wasm_bindgen(module = "/background_bridge.js")]
extern "C" {
    fn attachInstalledHandler(callback: &js_sys::Function);

    fn attachTabUpdatedHandler(callback: &js_sys::Function);

    fn attachTabActivatedHandler(callback: &js_sys::Function);
}

fn describe(value: JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `chrome.tabs` + `chrome.scripting`
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabHost for ChromeTabs {
    async fn active_tab(&self) -> Result<TabContext, BridgeError> {
        let tab_js = queryActiveTab().await.map_err(|e| BridgeError::TabQuery(describe(e)))?;
        let tab: Option<TabContext> = serde_wasm_bindgen::from_value(tab_js)?;
        tab.ok_or(BridgeError::NoActiveTab)
    }

    async fn tab(&self, tab_id: TabId) -> Result<TabContext, BridgeError> {
        let tab_js = getTab(tab_id).await.map_err(|e| BridgeError::TabQuery(describe(e)))?;
        Ok(serde_wasm_bindgen::from_value(tab_js)?)
    }

    async fn inject(&self, tab_id: TabId, command: &Command) -> Result<(), BridgeError> {
        let command_js = serde_wasm_bindgen::to_value(command)?;
        executeInTab(tab_id, command_js).await.map_err(|e| BridgeError::Injection {
            tab_id,
            reason: describe(e),
        })
    }
}

/// `chrome.sidePanel`
pub struct ChromeSidePanel;

#[async_trait(?Send)]
impl SidePanel for ChromeSidePanel {
    async fn set_options(&self, tab_id: TabId, enablement: &PanelEnablement) -> Result<(), BridgeError> {
        let options_js = serde_wasm_bindgen::to_value(enablement)?;
        setPanelOptions(tab_id, options_js).await.map_err(|e| BridgeError::SidePanel {
            tab_id,
            reason: describe(e),
        })
    }
}

/// Let the action icon open the side panel (where it is enabled)
pub async fn open_panel_on_action_click() -> Result<(), BridgeError> {
    setPanelBehavior(true).await.map_err(|e| BridgeError::Messaging(describe(e)))
}

/// `chrome.runtime.sendMessage`
pub struct ChromeRuntime;

#[async_trait(?Send)]
impl MessageRelay for ChromeRuntime {
    async fn send(&self, message: &RelayMessage) -> Result<(), BridgeError> {
        let message_js = serde_wasm_bindgen::to_value(message)?;
        sendRuntimeMessage(message_js).await.map_err(|e| BridgeError::Messaging(describe(e)))
    }
}

// Listener registration. The closures live as long as the context does.
// Background handlers also receive events queued before they were attached.

pub fn on_installed(mut callback: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(move || callback());
    attachInstalledHandler(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Called with the tab id and its new url whenever a tab's url changes
pub fn on_tab_url_changed(mut callback: impl FnMut(TabId, Option<String>) + 'static) {
    let closure = Closure::<dyn FnMut(TabId, JsValue)>::new(move |tab_id: TabId, url: JsValue| {
        callback(tab_id, url.as_string())
    });
    attachTabUpdatedHandler(closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn on_tab_activated(mut callback: impl FnMut(TabId) + 'static) {
    let closure = Closure::<dyn FnMut(TabId)>::new(move |tab_id: TabId| callback(tab_id));
    attachTabActivatedHandler(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Called with the raw message and the url of the sending tab, if any
pub fn on_runtime_message(mut callback: impl FnMut(JsValue, Option<String>) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |message: JsValue, sender_url: JsValue| {
        callback(message, sender_url.as_string())
    });
    addRuntimeMessageListener(closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn on_command(mut callback: impl FnMut(String) + 'static) {
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |command: JsValue| {
        callback(command.as_string().unwrap_or_default())
    });
    addCommandListener(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Expose `agent` to functions injected with `chrome.scripting`
pub fn install_page_agent(agent: Closure<dyn FnMut(JsValue) -> js_sys::Promise>) {
    installPageAgent(agent.as_ref().unchecked_ref());
    agent.forget();
}
