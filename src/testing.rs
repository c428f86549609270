/// In-memory stand-ins for the browser used by the unit tests
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{BridgeError, NO_PAGE_AGENT, PageError};
use crate::executor::TabHost;
use crate::extractor::{PageDocument, PageElement};
use crate::gatekeeper::{PanelEnablement, SidePanel};
use crate::page_actions::PageControl;
use crate::protocol::{Command, MessageRelay, RelayMessage};
use crate::tab::{TabContext, TabId};

fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

impl<'a> PageElement for ElementRef<'a> {
    fn name(&self) -> String {
        self.value().name().to_string()
    }

    fn first_with_class(&self, class: &str) -> Option<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| has_class(element, class))
    }

    fn first_child_text(&self) -> Option<String> {
        let child = self.first_child()?;
        match child.value() {
            Node::Text(text) => Some(text.text.to_string()),
            _ => Some(ElementRef::wrap(child).map(|e| e.text().collect()).unwrap_or_default()),
        }
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn parent_container(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_owned)
    }
}

/// A parsed page that records what the page actions do to it
pub struct HtmlPage {
    html: Html,
    href: RefCell<String>,
    pub navigations: RefCell<Vec<String>>,
    pub searches: RefCell<Vec<String>>,
    pub played: RefCell<Vec<String>>,
    pub block_audio: bool,
}

impl HtmlPage {
    pub fn new(href: &str, html: &str) -> HtmlPage {
        HtmlPage {
            html: Html::parse_document(html),
            href: RefCell::new(href.to_string()),
            navigations: RefCell::new(Vec::new()),
            searches: RefCell::new(Vec::new()),
            played: RefCell::new(Vec::new()),
            block_audio: false,
        }
    }
}

impl PageDocument for HtmlPage {
    type Element<'a> = ElementRef<'a>;

    fn href(&self) -> String {
        self.href.borrow().clone()
    }

    fn elements_by_class<'a>(&'a self, class: &str) -> Vec<ElementRef<'a>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| has_class(element, class))
            .collect()
    }

    fn head_title(&self) -> Option<String> {
        let selector = Selector::parse("head title").unwrap();
        self.html.select(&selector).next().map(|title| title.text().collect())
    }
}

#[async_trait(?Send)]
impl PageControl for HtmlPage {
    fn submit_search(&self, text: &str) -> Result<(), PageError> {
        self.first_with_class("searchfield_input")
            .ok_or(PageError::MissingElement("searchfield_input"))?;
        let form = Selector::parse("form#search-form").unwrap();
        self.html.select(&form).next().ok_or(PageError::MissingElement("search-form"))?;

        self.searches.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn set_location(&self, url: &str) -> Result<(), PageError> {
        self.navigations.borrow_mut().push(url.to_string());
        *self.href.borrow_mut() = url.to_string();
        Ok(())
    }

    async fn play_audio(&self, src: &str) -> Result<(), PageError> {
        if self.block_audio {
            return Err(PageError::Script("NotAllowedError: play() failed".to_string()));
        }
        self.played.borrow_mut().push(src.to_string());
        Ok(())
    }
}

/// Relay that keeps every message it was asked to deliver
#[derive(Default)]
pub struct RecordingRelay {
    pub sent: RefCell<Vec<RelayMessage>>,
    pub fail: bool,
}

#[async_trait(?Send)]
impl MessageRelay for RecordingRelay {
    async fn send(&self, message: &RelayMessage) -> Result<(), BridgeError> {
        self.sent.borrow_mut().push(message.clone());
        if self.fail {
            return Err(BridgeError::Messaging("Receiving end does not exist.".to_string()));
        }
        Ok(())
    }
}

/// Tab manager with a movable active-tab pointer
pub struct FakeTabs {
    tabs: Vec<TabContext>,
    active: Cell<Option<TabId>>,
    /// Tab the user switches to right after the active tab was resolved
    pub switch_after_query: Cell<Option<TabId>>,
    pub restricted: Vec<TabId>,
    /// Tabs whose content script never installed the page agent
    pub without_agent: Vec<TabId>,
    pub injected: RefCell<Vec<(TabId, Command)>>,
}

impl FakeTabs {
    pub fn new(tabs: Vec<TabContext>, active: Option<TabId>) -> FakeTabs {
        FakeTabs {
            tabs,
            active: Cell::new(active),
            switch_after_query: Cell::new(None),
            restricted: Vec::new(),
            without_agent: Vec::new(),
            injected: RefCell::new(Vec::new()),
        }
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active.get()
    }
}

#[async_trait(?Send)]
impl TabHost for FakeTabs {
    async fn active_tab(&self) -> Result<TabContext, BridgeError> {
        let tab = self
            .active
            .get()
            .and_then(|id| self.tabs.iter().find(|tab| tab.id == id).cloned())
            .ok_or(BridgeError::NoActiveTab)?;

        if let Some(next) = self.switch_after_query.take() {
            self.active.set(Some(next));
        }
        Ok(tab)
    }

    async fn tab(&self, tab_id: TabId) -> Result<TabContext, BridgeError> {
        self.tabs
            .iter()
            .find(|tab| tab.id == tab_id)
            .cloned()
            .ok_or_else(|| BridgeError::TabQuery(format!("No tab with id: {}.", tab_id)))
    }

    async fn inject(&self, tab_id: TabId, command: &Command) -> Result<(), BridgeError> {
        if self.restricted.contains(&tab_id) {
            return Err(BridgeError::Injection {
                tab_id,
                reason: "Cannot access contents of the page.".to_string(),
            });
        }
        if self.without_agent.contains(&tab_id) {
            return Err(BridgeError::Injection {
                tab_id,
                reason: NO_PAGE_AGENT.to_string(),
            });
        }
        self.injected.borrow_mut().push((tab_id, command.clone()));
        Ok(())
    }
}

/// Side panel registry keyed by tab
#[derive(Default)]
pub struct FakeSidePanel {
    pub options: RefCell<HashMap<TabId, PanelEnablement>>,
    pub calls: Cell<usize>,
}

#[async_trait(?Send)]
impl SidePanel for FakeSidePanel {
    async fn set_options(&self, tab_id: TabId, enablement: &PanelEnablement) -> Result<(), BridgeError> {
        self.calls.set(self.calls.get() + 1);
        self.options.borrow_mut().insert(tab_id, enablement.clone());
        Ok(())
    }
}
