/// Side panel: consumes page records and drives the current tab
use std::cell::RefCell;

use log::debug;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::chrome::{self, ChromeTabs};
use crate::config::settings;
use crate::executor::TabCommandExecutor;
use crate::panel::{CurrentTabData, PanelReaction, PanelState};
use crate::protocol::RelayMessage;

thread_local! {
    static PANEL: RefCell<PanelState> = RefCell::new(PanelState::new(&settings()));
}

/// Executor bound to the real browser; cheap, make one per call
pub fn executor() -> TabCommandExecutor<ChromeTabs> {
    TabCommandExecutor::new(ChromeTabs)
}

pub fn start() {
    // Exports may have touched the panel before the settings were loaded
    PANEL.with(|panel| *panel.borrow_mut() = PanelState::new(&settings()));

    chrome::on_runtime_message(|message: JsValue, sender_url| {
        match serde_wasm_bindgen::from_value::<RelayMessage>(message) {
            Ok(message) => receive(message, sender_url.as_deref()),
            Err(e) => debug!("side panel: ignoring unrelated message: {}", e),
        }
    });

    chrome::on_command(|command| receive(RelayMessage::keyboard(command), None));

    debug!("side panel: listeners registered");
}

fn receive(message: RelayMessage, sender_url: Option<&str>) {
    let reaction = PANEL.with(|panel| panel.borrow_mut().receive(message, sender_url));

    match reaction {
        Some(PanelReaction::Run(command)) => spawn_local(async move {
            if let Err(e) = executor().execute(&command).await {
                debug!("side panel: {:?} not delivered: {}", command, e);
            }
        }),
        Some(PanelReaction::ScrollTo(id)) => scroll_to(&id),
        None => {}
    }
}

fn scroll_to(id: &str) {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id));

    match element {
        Some(element) => element.scroll_into_view(),
        None => debug!("side panel: nothing to scroll to at #{}", id),
    }
}

pub fn current_tab_data() -> CurrentTabData {
    PANEL.with(|panel| panel.borrow().current().clone())
}

pub fn set_autoplay(autoplay: bool) {
    PANEL.with(|panel| panel.borrow_mut().set_autoplay(autoplay));
}
