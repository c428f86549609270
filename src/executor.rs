/// Runs commands inside whichever tab is active when they are issued
use async_trait::async_trait;
use log::debug;

use crate::error::BridgeError;
use crate::protocol::Command;
use crate::tab::{TabContext, TabId};

/// The browser's tab manager and script injection
#[async_trait(?Send)]
pub trait TabHost {
    /// Active tab of the current window, BridgeError::NoActiveTab if none
    async fn active_tab(&self) -> Result<TabContext, BridgeError>;

    async fn tab(&self, tab_id: TabId) -> Result<TabContext, BridgeError>;

    /// Run `command` in the page of `tab_id`, resolving once the injected
    /// function has finished
    async fn inject(&self, tab_id: TabId, command: &Command) -> Result<(), BridgeError>;
}

pub struct TabCommandExecutor<H> {
    host: H,
}

impl<H: TabHost> TabCommandExecutor<H> {
    pub fn new(host: H) -> Self {
        TabCommandExecutor { host }
    }

    /// Resolve the active tab now and run `command` there. The tab is looked
    /// up on every call; if the user switches tabs while the injection is in
    /// flight, the command still lands on the tab that was active when it
    /// was resolved. Returns that tab.
    pub async fn execute(&self, command: &Command) -> Result<TabContext, BridgeError> {
        let tab = self.host.active_tab().await?;
        self.execute_in(tab.id, command).await?;
        Ok(tab)
    }

    /// Run `command` in a tab the caller already holds
    pub async fn execute_in(&self, tab_id: TabId, command: &Command) -> Result<(), BridgeError> {
        debug!("executor: {:?} -> tab {}", command, tab_id);
        self.host.inject(tab_id, command).await
    }

    pub async fn dictionary_lookup(&self, search_text: &str) -> Result<(), BridgeError> {
        self.execute(&Command::Lookup(search_text.to_string())).await.map(drop)
    }

    pub async fn open_url(&self, url: &str) -> Result<(), BridgeError> {
        self.execute(&Command::Navigate(url.to_string())).await.map(drop)
    }

    pub async fn update_current_tab_data(&self) -> Result<(), BridgeError> {
        self.execute(&Command::RefreshExtraction).await.map(drop)
    }

    pub async fn play_phonetics(&self) -> Result<(), BridgeError> {
        self.execute(&Command::PlayPronunciation).await.map(drop)
    }
}
