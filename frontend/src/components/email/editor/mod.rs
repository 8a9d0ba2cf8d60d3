//! Email editor: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering, and helpers.
//!
//! The editable area is a `contenteditable` element the browser edits
//! directly. Its content is mirrored into a `common::document::Document`
//! after every input, and the document is the source of truth for undo/redo,
//! templates, AI generation and the preview. Whenever the document changes
//! from outside the browser's own editing, `dom_stale` is set and the next
//! `rendered` call rewrites the element's HTML.

use yew::prelude::*;

mod dialogs;
mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::EmailEditorProps;
pub use state::EmailEditor;

impl Component for EmailEditor {
    type Message = Msg;
    type Properties = EmailEditorProps;

    fn create(_ctx: &Context<Self>) -> Self {
        EmailEditor::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            // New lines become `<p>` instead of the browser's default `<div>`.
            helpers::exec_command("defaultParagraphSeparator", Some("p"));
        }
        if self.dom_stale {
            self.write_dom();
        }
    }
}
