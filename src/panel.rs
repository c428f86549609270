/// Side panel state fed by page records and keyboard shortcuts
use log::debug;
use serde::Serialize;

use crate::config::Settings;
use crate::origin::matches_origin;
use crate::protocol::{Command, ExtractedWordRecord, PageEvent, RelayMessage};

/// What the panel knows about the entry shown in the current tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTabData {
    pub url: String,
    pub word: String,
    pub word_class: String,
    pub phonetics: String,
}

impl CurrentTabData {
    /// Trim the record; when the page gave no headword, take it from the
    /// title ("cat noun - Definition ..." → "cat noun").
    pub fn from_record(url: &str, record: &ExtractedWordRecord) -> CurrentTabData {
        let record = record.trimmed();
        let word = if record.word.is_empty() {
            word_from_title(&record.title)
        } else {
            record.word
        };

        CurrentTabData {
            url: url.to_string(),
            word,
            word_class: record.word_class,
            phonetics: record.phonetics,
        }
    }
}

fn word_from_title(title: &str) -> String {
    title
        .split_once(" - ")
        .or_else(|| title.split_once(" | "))
        .map(|(head, _)| head.to_string())
        .unwrap_or_default()
}

/// Shortcuts declared in the extension manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    PreviousItem,
    NextItem,
}

impl Shortcut {
    pub fn parse(command: &str) -> Option<Shortcut> {
        match command {
            "previous_item" => Some(Shortcut::PreviousItem),
            "next_item" => Some(Shortcut::NextItem),
            _ => None,
        }
    }
}

/// Follow-up the panel context has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelReaction {
    Run(Command),
    /// Element id of the word list item to bring into view
    ScrollTo(String),
}

pub struct PanelState {
    site_origin: String,
    autoplay: bool,
    current: CurrentTabData,
    selected_item: Option<u32>,
}

impl PanelState {
    pub fn new(settings: &Settings) -> Self {
        PanelState {
            site_origin: settings.site_origin.clone(),
            autoplay: settings.autoplay,
            current: CurrentTabData::default(),
            selected_item: None,
        }
    }

    pub fn current(&self) -> &CurrentTabData {
        &self.current
    }

    pub fn selected_item(&self) -> Option<u32> {
        self.selected_item
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    pub fn receive(&mut self, message: RelayMessage, sender_url: Option<&str>) -> Option<PanelReaction> {
        match message {
            RelayMessage::Page(PageEvent::Loaded(record)) => self.on_page_loaded(sender_url, &record),
            RelayMessage::Keyboard(keyboard) => self.on_keyboard_command(&keyboard.command),
        }
    }

    fn on_page_loaded(&mut self, sender_url: Option<&str>, record: &ExtractedWordRecord) -> Option<PanelReaction> {
        if matches_origin(sender_url, &self.site_origin) == Some(false) {
            debug!("panel: ignoring record from {:?}", sender_url);
            return None;
        }

        self.current = CurrentTabData::from_record(sender_url.unwrap_or_default(), record);
        debug!("panel: current entry is {:?}", self.current);

        self.autoplay.then_some(PanelReaction::Run(Command::PlayPronunciation))
    }

    fn on_keyboard_command(&mut self, command: &str) -> Option<PanelReaction> {
        let Some(shortcut) = Shortcut::parse(command) else {
            debug!("panel: unknown keyboard command {:?}", command);
            return None;
        };

        let selected = match (shortcut, self.selected_item) {
            (_, None) => 0,
            (Shortcut::PreviousItem, Some(index)) => index.saturating_sub(1),
            (Shortcut::NextItem, Some(index)) => index.saturating_add(1),
        };
        self.selected_item = Some(selected);

        Some(PanelReaction::ScrollTo(format!("word-{}", selected)))
    }
}
