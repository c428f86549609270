/// The live page, as seen from the content script
use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlAudioElement, HtmlCollection, HtmlFormElement, HtmlInputElement, Node, Window};

use crate::error::PageError;
use crate::extractor::{PageDocument, PageElement};
use crate::page_actions::{PageControl, SEARCH_FORM_ID, SEARCH_INPUT_CLASS};

fn collect(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length()).filter_map(|i| collection.item(i)).collect()
}

impl PageElement for Element {
    fn name(&self) -> String {
        Node::node_name(self)
    }

    fn first_with_class(&self, class: &str) -> Option<Self> {
        Element::get_elements_by_class_name(self, class).item(0)
    }

    fn first_child_text(&self) -> Option<String> {
        Node::first_child(self).map(|child| child.text_content().unwrap_or_default())
    }

    fn text(&self) -> String {
        Node::text_content(self).unwrap_or_default()
    }

    fn parent_container(&self) -> Option<Self> {
        Node::parent_element(self)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        Element::get_attribute(self, name)
    }
}

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// The page this script runs in; None outside a document (workers)
    pub fn current() -> Option<WebPage> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(WebPage { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the load event has already fired
    pub fn is_loaded(&self) -> bool {
        self.document.ready_state() == "complete"
    }
}

impl PageDocument for WebPage {
    type Element<'a> = Element;

    fn href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn elements_by_class<'a>(&'a self, class: &str) -> Vec<Element> {
        collect(self.document.get_elements_by_class_name(class))
    }

    fn head_title(&self) -> Option<String> {
        let head = self.document.head()?;
        let title = head.get_elements_by_tag_name("title").item(0)?;
        Some(title.text_content().unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl PageControl for WebPage {
    fn submit_search(&self, text: &str) -> Result<(), PageError> {
        let input = self
            .first_with_class(SEARCH_INPUT_CLASS)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .ok_or(PageError::MissingElement(SEARCH_INPUT_CLASS))?;
        let form = self
            .document
            .get_element_by_id(SEARCH_FORM_ID)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
            .ok_or(PageError::MissingElement(SEARCH_FORM_ID))?;

        input.set_value(text);
        form.submit().map_err(PageError::from_js)
    }

    fn set_location(&self, url: &str) -> Result<(), PageError> {
        self.window.location().set_href(url).map_err(PageError::from_js)
    }

    async fn play_audio(&self, src: &str) -> Result<(), PageError> {
        let audio = HtmlAudioElement::new_with_src(src).map_err(PageError::from_js)?;
        let playing = audio.play().map_err(PageError::from_js)?;
        JsFuture::from(playing).await.map(drop).map_err(PageError::from_js)
    }
}
