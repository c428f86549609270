/// Dictionary entry extraction from the page DOM
///
/// The extractor only sees the page through [`PageDocument`] and
/// [`PageElement`], so the same code runs against the live `web-sys` DOM in the
/// content script and against parsed fixtures in tests.
use log::debug;

use crate::protocol::ExtractedWordRecord;

/// Path segment marking the American-English dictionary
pub const AMERICAN_ENGLISH: &str = "american_english";

/// Class names used by the dictionary's entry pages
pub mod class {
    pub const WORD_HEAD_GROUP: &str = "webtop-g";
    pub const HEAD: &str = "h";
    pub const HEADWORD: &str = "headword";
    pub const PART_OF_SPEECH: &str = "pos";
    pub const PHONETICS: &str = "phonetics";
    pub const BRITISH_PRONUNCIATION: &str = "phons_br";
    pub const PHONETIC_TEXT: &str = "phon";
    pub const UK_AUDIO: &str = "pron-uk";
}

/// Read-only view of one DOM element
pub trait PageElement: Sized {
    /// Element name, e.g. "DIV" or "h1" (compared case-insensitively)
    fn name(&self) -> String;

    /// First descendant carrying `class` (getElementsByClassName(..)[0])
    fn first_with_class(&self, class: &str) -> Option<Self>;

    /// Text of the first child node, None if there are no children
    fn first_child_text(&self) -> Option<String>;

    /// Concatenated text of the element and its descendants
    fn text(&self) -> String;

    /// Parent element, None at the root
    fn parent_container(&self) -> Option<Self>;

    fn attribute(&self, name: &str) -> Option<String>;

    fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }
}

/// Read-only view of the page
pub trait PageDocument {
    type Element<'a>: PageElement
    where
        Self: 'a;

    /// Current address of the page
    fn href(&self) -> String;

    /// All elements carrying `class`, in document order
    fn elements_by_class<'a>(&'a self, class: &str) -> Vec<Self::Element<'a>>;

    /// Text of the first `<title>` in the document head
    fn head_title(&self) -> Option<String>;

    fn first_with_class<'a>(&'a self, class: &str) -> Option<Self::Element<'a>> {
        self.elements_by_class(class).into_iter().next()
    }
}

/// Entry page layouts. The dictionary renders American and British entries
/// differently; anything without a locale segment is treated as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    AmericanEnglish,
    BritishEnglish,
    Unknown,
}

impl PageLayout {
    /// Pick the layout from the locale segment of the address:
    /// `https://host/definition/<locale>/<entry>`
    pub fn detect(href: &str) -> PageLayout {
        match href.split('/').nth(4) {
            Some(AMERICAN_ENGLISH) => PageLayout::AmericanEnglish,
            Some(segment) if !segment.is_empty() => PageLayout::BritishEnglish,
            _ => PageLayout::Unknown,
        }
    }

    /// Fill headword, part of speech and phonetics. Stops at the first
    /// missing piece; whatever was filled before that stays.
    fn fill<D: PageDocument>(self, page: &D, record: &mut ExtractedWordRecord) -> Option<()> {
        match self {
            PageLayout::AmericanEnglish => fill_american(page, record),
            PageLayout::BritishEnglish => fill_british(page, record),
            PageLayout::Unknown => Some(()),
        }
    }
}

fn fill_american<D: PageDocument>(page: &D, record: &mut ExtractedWordRecord) -> Option<()> {
    let group = page
        .elements_by_class(class::WORD_HEAD_GROUP)
        .into_iter()
        .find(|element| element.is("div"))?;

    record.word = group.first_with_class(class::HEAD)?.first_child_text()?;
    record.word_class = group.first_with_class(class::PART_OF_SPEECH)?.text();
    Some(())
}

fn fill_british<D: PageDocument>(page: &D, record: &mut ExtractedWordRecord) -> Option<()> {
    let heading = page
        .elements_by_class(class::HEADWORD)
        .into_iter()
        .find(|element| element.is("h1"));

    if let Some(heading) = heading {
        record.word = heading.first_child_text()?;
        record.word_class = heading
            .parent_container()?
            .first_with_class(class::PART_OF_SPEECH)?
            .text();
    }

    record.phonetics = page
        .first_with_class(class::PHONETICS)?
        .first_with_class(class::BRITISH_PRONUNCIATION)?
        .first_with_class(class::PHONETIC_TEXT)?
        .text();
    Some(())
}

/// Build the record for the page, choosing the layout from its address
pub fn extract<D: PageDocument>(page: &D) -> ExtractedWordRecord {
    extract_with_layout(page, PageLayout::detect(&page.href()))
}

/// Build the record for the page with a given layout. Never fails: the
/// headword phase and the title phase are independent, and any piece that
/// can't be found is left empty.
pub fn extract_with_layout<D: PageDocument>(page: &D, layout: PageLayout) -> ExtractedWordRecord {
    let mut record = ExtractedWordRecord::default();

    if layout.fill(page, &mut record).is_none() {
        debug!("extract: {:?} entry structure incomplete, sending partial record", layout);
    }

    match page.head_title() {
        Some(title) => record.title = title,
        None => debug!("extract: document has no <title>"),
    }

    record
}
