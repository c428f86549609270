/// Messages exchanged between the page, background and panel contexts
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// What the page reports about the dictionary entry it shows. Every field is
/// always present; missing data is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedWordRecord {
    pub word: String,
    pub word_class: String,
    pub title: String,
    pub phonetics: String,
}

impl ExtractedWordRecord {
    /// Copy with leading/trailing whitespace removed from every field
    pub fn trimmed(&self) -> ExtractedWordRecord {
        ExtractedWordRecord {
            word: self.word.trim().to_string(),
            word_class: self.word_class.trim().to_string(),
            title: self.title.trim().to_string(),
            phonetics: self.phonetics.trim().to_string(),
        }
    }
}

/// Events raised by the content script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PageEvent {
    #[serde(rename = "page-loaded")]
    Loaded(ExtractedWordRecord),
}

/// A global shortcut, forwarded verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardCommand {
    pub command: String,
}

/// Everything that travels over the runtime message channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayMessage {
    Page(PageEvent),
    Keyboard(KeyboardCommand),
}

impl RelayMessage {
    pub fn page_loaded(record: ExtractedWordRecord) -> RelayMessage {
        RelayMessage::Page(PageEvent::Loaded(record))
    }

    pub fn keyboard(command: impl Into<String>) -> RelayMessage {
        RelayMessage::Keyboard(KeyboardCommand {
            command: command.into(),
        })
    }
}

/// Request from the panel to act on the current tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "arg", rename_all = "kebab-case")]
pub enum Command {
    Lookup(String),
    Navigate(String),
    PlayPronunciation,
    RefreshExtraction,
}

/// One-way, best-effort mailbox between contexts
#[async_trait(?Send)]
pub trait MessageRelay {
    async fn send(&self, message: &RelayMessage) -> Result<(), BridgeError>;
}
