/// Background service worker: gates the side panel per tab
///
/// Gating is event driven. Every url change and every tab activation
/// re-evaluates that tab; the action icon only opens the panel where it is
/// already enabled. Events that arrive while the module is still loading are
/// queued by the bridge and handled once `start` attaches the handlers.
use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;

use crate::chrome::{self, ChromeSidePanel, ChromeTabs};
use crate::config::settings;
use crate::gatekeeper::OriginGatekeeper;
use crate::tab::{TabContext, TabId};

pub fn start() {
    chrome::on_installed(|| {
        spawn_local(async {
            if let Err(e) = chrome::open_panel_on_action_click().await {
                warn!("Failed to set side panel behavior: {}", e);
            }
        });
    });

    chrome::on_tab_url_changed(|tab_id, url| {
        spawn_local(gate(TabContext::new(tab_id, url)));
    });

    chrome::on_tab_activated(|tab_id| {
        spawn_local(gate_activated(tab_id));
    });

    debug!("background: listeners registered");
}

fn gatekeeper() -> OriginGatekeeper<ChromeSidePanel> {
    OriginGatekeeper::new(ChromeSidePanel, &settings())
}

async fn gate_activated(tab_id: TabId) {
    // Fresh lookup: the url may have changed since the tab was last seen
    if let Err(e) = gatekeeper().apply_to_tab(&ChromeTabs, tab_id).await {
        warn!("Failed to update side panel for tab {}: {}", tab_id, e);
    }
}

async fn gate(tab: TabContext) {
    if let Err(e) = gatekeeper().apply(&tab).await {
        warn!("Failed to update side panel for tab {}: {}", tab.id, e);
    }
}
