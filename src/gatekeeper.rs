/// Keeps side panel availability in step with the origin of each tab
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::BridgeError;
use crate::executor::TabHost;
use crate::origin::matches_origin;
use crate::tab::{TabContext, TabId};

/// Options handed to `chrome.sidePanel.setOptions` for one tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEnablement {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PanelEnablement {
    pub fn enabled(path: &str) -> PanelEnablement {
        PanelEnablement {
            enabled: true,
            path: Some(path.to_string()),
        }
    }

    pub fn disabled() -> PanelEnablement {
        PanelEnablement {
            enabled: false,
            path: None,
        }
    }
}

/// The browser's per-tab side panel registry
#[async_trait(?Send)]
pub trait SidePanel {
    async fn set_options(&self, tab_id: TabId, enablement: &PanelEnablement) -> Result<(), BridgeError>;
}

pub struct OriginGatekeeper<P> {
    panel: P,
    site_origin: String,
    panel_path: String,
}

impl<P: SidePanel> OriginGatekeeper<P> {
    pub fn new(panel: P, settings: &Settings) -> Self {
        OriginGatekeeper {
            panel,
            site_origin: settings.site_origin.clone(),
            panel_path: settings.side_panel_path.clone(),
        }
    }

    /// Enablement for a tab showing `url`; None when the url can't tell us
    pub fn decide(&self, url: Option<&str>) -> Option<PanelEnablement> {
        matches_origin(url, &self.site_origin).map(|supported| {
            if supported {
                PanelEnablement::enabled(&self.panel_path)
            } else {
                PanelEnablement::disabled()
            }
        })
    }

    /// Apply the decision for `tab`. Only that tab's entry is touched, and a
    /// tab without a usable url is left as it is.
    pub async fn apply(&self, tab: &TabContext) -> Result<Option<PanelEnablement>, BridgeError> {
        let Some(enablement) = self.decide(tab.url.as_deref()) else {
            debug!("gatekeeper: tab {} has no usable url, leaving side panel alone", tab.id);
            return Ok(None);
        };

        self.panel.set_options(tab.id, &enablement).await?;
        debug!("gatekeeper: tab {} side panel enabled={}", tab.id, enablement.enabled);
        Ok(Some(enablement))
    }

    /// Look `tab_id` up afresh and apply the decision for its current url.
    /// A tab that is gone by then is left alone.
    pub async fn apply_to_tab<H: TabHost>(
        &self,
        host: &H,
        tab_id: TabId,
    ) -> Result<Option<PanelEnablement>, BridgeError> {
        match host.tab(tab_id).await {
            Ok(tab) => self.apply(&tab).await,
            Err(e) => {
                debug!("gatekeeper: tab {} vanished before gating: {}", tab_id, e);
                Ok(None)
            }
        }
    }
}
