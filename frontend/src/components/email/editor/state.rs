//! Component state of the email editor.
//!
//! Holds the live document with its undo/redo history, references to DOM
//! nodes, the AI dialog input and the in-flight generation session.

use common::document::generation::Generation;
use common::document::Document;
use web_sys::HtmlElement;
use yew::prelude::*;

/// Dropdown menus of the toolbar. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Variables,
    Templates,
}

pub struct EmailEditor {
    /// Current content.
    pub document: Document,

    /// Linear history for undo/redo. Each entry is a full snapshot.
    pub history: Vec<Document>,

    /// Index into `history` of the active snapshot.
    pub history_index: usize,

    /// Set when `document` changed and the editable element must be rewritten.
    pub dom_stale: bool,

    /// The `contenteditable` element.
    pub editor_ref: NodeRef,

    /// The AI dialog top sheet.
    pub ai_dialog_ref: NodeRef,

    /// Text of the AI prompt textarea.
    pub prompt: String,

    /// AI generation sessions; fragments are tagged with their session id.
    pub generation: Generation,

    /// A simulated send is in progress.
    pub sending: bool,

    pub open_menu: Option<Menu>,
}

impl EmailEditor {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            history: vec![Document::new()],
            history_index: 0,
            dom_stale: false,
            editor_ref: NodeRef::default(),
            ai_dialog_ref: NodeRef::default(),
            prompt: String::new(),
            generation: Generation::new(),
            sending: false,
            open_menu: None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generation.is_running()
    }

    /// Pushes the current document onto the history, dropping any redo tail.
    pub fn record(&mut self) {
        self.history.truncate(self.history_index + 1);
        self.history.push(self.document.clone());
        self.history_index = self.history.len() - 1;
    }

    /// Replaces the document and schedules a DOM rewrite.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.dom_stale = true;
    }

    /// Re-reads the editable element into `document`. Returns whether the
    /// content changed.
    pub fn read_dom(&mut self) -> bool {
        let Some(element) = self.editor_ref.cast::<HtmlElement>() else {
            return false;
        };
        let document = Document::from_html(&element.inner_html());
        if document == self.document {
            return false;
        }
        self.document = document;
        self.record();
        true
    }

    /// Writes `document` into the editable element.
    pub fn write_dom(&mut self) {
        if let Some(element) = self.editor_ref.cast::<HtmlElement>() {
            element.set_inner_html(&self.document.to_html());
            self.dom_stale = false;
        }
    }
}
