/// Content script: reports the entry on load and serves injected commands
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use crate::chrome::{self, ChromeRuntime};
use crate::page_actions::{do_update_current_tab_data, run_command};
use crate::protocol::Command;
use crate::web_page::WebPage;

pub fn start() {
    let Some(page) = WebPage::current() else {
        warn!("content script started without a document");
        return;
    };

    chrome::install_page_agent(Closure::new(|command: JsValue| {
        future_to_promise(async move {
            serve(command).await;
            Ok(JsValue::UNDEFINED)
        })
    }));

    // The script may start after the load event already fired
    if page.is_loaded() {
        report(page);
        return;
    }

    let window = page.window().clone();
    let on_load = Closure::once_into_js(move || report(page));
    if let Err(e) = window.add_event_listener_with_callback("load", on_load.unchecked_ref()) {
        warn!("Failed to wait for page load: {:?}", e);
    }
}

/// Fire and forget: delivery failures are logged and dropped
fn report(page: WebPage) {
    spawn_local(async move {
        do_update_current_tab_data(&page, &ChromeRuntime).await;
    });
}

async fn serve(command: JsValue) {
    let command: Command = match serde_wasm_bindgen::from_value(command) {
        Ok(command) => command,
        Err(e) => {
            warn!("Ignoring malformed command: {}", e);
            return;
        }
    };

    match WebPage::current() {
        Some(page) => {
            debug!("content: running {:?}", command);
            run_command(&page, &ChromeRuntime, command).await;
        }
        None => warn!("Command {:?} arrived without a document", command),
    }
}
