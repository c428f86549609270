/// Actions injected into the dictionary page on behalf of the side panel
///
/// All of these swallow in-page failures: the worst outcome of a command is
/// that nothing visible happens.
use async_trait::async_trait;
use log::debug;

use crate::error::PageError;
use crate::extractor::{PageDocument, PageElement, class, extract};
use crate::protocol::{Command, MessageRelay, RelayMessage};

pub const SEARCH_INPUT_CLASS: &str = "searchfield_input";
pub const SEARCH_FORM_ID: &str = "search-form";

const MP3_SOURCE: &str = "data-src-mp3";
const OGG_SOURCE: &str = "data-src-ogg";

/// Page mutations the actions need on top of reading the DOM
#[async_trait(?Send)]
pub trait PageControl: PageDocument {
    /// Put `text` in the site's search box and submit the search form
    fn submit_search(&self, text: &str) -> Result<(), PageError>;

    fn set_location(&self, url: &str) -> Result<(), PageError>;

    /// Start playing the audio at `src`; resolves once playback started
    async fn play_audio(&self, src: &str) -> Result<(), PageError>;
}

pub fn do_dictionary_lookup<P: PageControl>(page: &P, search_text: &str) {
    if let Err(e) = page.submit_search(search_text) {
        debug!("lookup of {:?} skipped: {}", search_text, e);
    }
}

/// Navigate unless the page is already there. Returns whether it navigated.
pub fn do_open_url<P: PageControl>(page: &P, url: &str) -> bool {
    if page.href() == url {
        return false;
    }

    match page.set_location(url) {
        Ok(()) => true,
        Err(e) => {
            debug!("navigation to {} failed: {}", url, e);
            false
        }
    }
}

/// Extract the record again and send it to the panel
pub async fn do_update_current_tab_data<P: PageDocument, R: MessageRelay>(page: &P, relay: &R) {
    let message = RelayMessage::page_loaded(extract(page));
    if let Err(e) = relay.send(&message).await {
        debug!("page-loaded message dropped: {}", e);
    }
}

/// UK pronunciation audio of the entry, mp3 preferred
pub fn pronunciation_source<P: PageDocument>(page: &P) -> Option<String> {
    let audio = page
        .first_with_class(class::PHONETICS)?
        .first_with_class(class::BRITISH_PRONUNCIATION)?
        .first_with_class(class::UK_AUDIO)?;

    [MP3_SOURCE, OGG_SOURCE]
        .into_iter()
        .filter_map(|name| audio.attribute(name))
        .find(|src| !src.is_empty())
}

/// Play the UK pronunciation. Autoplay blocking and the like are ignored.
pub async fn do_play_phonetics<P: PageControl>(page: &P) {
    let Some(src) = pronunciation_source(page) else {
        debug!("no pronunciation audio on {}", page.href());
        return;
    };

    if let Err(e) = page.play_audio(&src).await {
        debug!("playback of {} failed: {}", src, e);
    }
}

/// Entry point of every injected command
pub async fn run_command<P: PageControl, R: MessageRelay>(page: &P, relay: &R, command: Command) {
    match command {
        Command::Lookup(search_text) => do_dictionary_lookup(page, &search_text),
        Command::Navigate(url) => {
            do_open_url(page, &url);
        }
        Command::RefreshExtraction => do_update_current_tab_data(page, relay).await,
        Command::PlayPronunciation => do_play_phonetics(page).await,
    }
}
