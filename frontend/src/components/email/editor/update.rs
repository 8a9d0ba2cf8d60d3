//! Update function for the email editor component.
//!
//! Elm-style: receives the state, the `Context` and a `Msg`, mutates the
//! state and returns whether the view should re-render.
//!
//! Key behaviors
//! - Mirroring browser edits into the document, with undo/redo history.
//! - Formatting and variable insertion through `execCommand` at the caret,
//!   falling back to appending when the caret is outside the editor.
//! - AI generation: one session per request; the document is cleared when
//!   the backend accepts the request, then grows paragraph by paragraph as
//!   the reconciler completes them.
//! - A simulated send with a confirmation toast.

use common::document::Document;
use common::model::template::message_templates;
use common::preview::render_preview;
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::services::api;
use crate::tops_sheet::top_sheet::{close_top_sheet, open_top_sheet};

use super::helpers::{
    alert, exec_command, focus, generation_request, placeholder_token, preview_values,
    selection_inside, show_toast,
};
use super::messages::Msg;
use super::state::EmailEditor;

/// Simulated delivery time of the Send stub.
const SEND_DELAY_MS: u32 = 1000;

pub fn update(component: &mut EmailEditor, ctx: &Context<EmailEditor>, msg: Msg) -> bool {
    match msg {
        Msg::Input => component.read_dom(),
        Msg::Undo => {
            if component.history_index > 0 {
                component.history_index -= 1;
                let snapshot = component.history[component.history_index].clone();
                component.replace_document(snapshot);
            }
            true
        }
        Msg::Redo => {
            if component.history_index + 1 < component.history.len() {
                component.history_index += 1;
                let snapshot = component.history[component.history_index].clone();
                component.replace_document(snapshot);
            }
            true
        }
        Msg::Format(command) => {
            if !selection_inside(&component.editor_ref) {
                focus(&component.editor_ref);
            }
            exec_command(command.command_id(), None);
            component.read_dom();
            true
        }
        Msg::ToggleMenu(menu) => {
            component.open_menu = if component.open_menu == Some(menu) {
                None
            } else {
                Some(menu)
            };
            true
        }
        Msg::InsertVariable(key) => {
            component.open_menu = None;
            let token = placeholder_token(&key);
            if selection_inside(&component.editor_ref)
                && exec_command("insertText", Some(token.as_str()))
            {
                component.read_dom();
            } else {
                let mut document = component.document.clone();
                document.append_text(&token);
                component.replace_document(document);
                component.record();
            }
            true
        }
        Msg::ApplyTemplate(index) => {
            component.open_menu = None;
            if let Some(template) = message_templates().get(index) {
                component.replace_document(Document::from_html(&template.content));
                component.record();
            }
            true
        }
        Msg::OpenAiDialog => {
            component.open_menu = None;
            open_top_sheet(component.ai_dialog_ref.clone());
            true
        }
        Msg::CloseAiDialog => {
            close_top_sheet(component.ai_dialog_ref.clone());
            false
        }
        Msg::PromptChanged(prompt) => {
            component.prompt = prompt;
            true
        }
        Msg::Generate => {
            if component.is_generating() || component.prompt.trim().is_empty() {
                return false;
            }
            let prompt = std::mem::take(&mut component.prompt);
            close_top_sheet(component.ai_dialog_ref.clone());

            let session = component.generation.begin();

            let request = generation_request(prompt, ctx.props().order.as_ref());
            let link = ctx.link().clone();
            spawn_local(async move {
                let started = link.clone();
                let fragments = link.clone();
                let result = api::stream_generation(
                    &request,
                    move || started.send_message(Msg::GenerationStarted(session)),
                    move |content| fragments.send_message(Msg::Fragment { session, content }),
                )
                .await;
                link.send_message(Msg::GenerationFinished { session, result });
            });
            true
        }
        Msg::GenerationStarted(session) => {
            let mut document = component.document.clone();
            if !component.generation.accept(session, &mut document) {
                return false;
            }
            component.replace_document(document);
            true
        }
        Msg::Fragment { session, content } => {
            let mut document = component.document.clone();
            if !component.generation.fragment(session, &content, &mut document) {
                return false;
            }
            component.replace_document(document);
            true
        }
        Msg::GenerationFinished { session, result } => {
            let mut document = component.document.clone();
            if !component.generation.finish(session, &mut document) {
                return false;
            }
            component.replace_document(document);
            component.record();
            if let Err(e) = result {
                gloo_console::error!(format!("Error generating email: {}", e));
                alert("Failed to generate email. Please try again.");
            }
            true
        }
        Msg::Send => {
            let values = preview_values(ctx.props().order.as_ref());
            if component.sending || render_preview(&component.document, &values).trim().is_empty() {
                return false;
            }
            component.sending = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                TimeoutFuture::new(SEND_DELAY_MS).await;
                link.send_message(Msg::SendCompleted);
            });
            true
        }
        Msg::SendCompleted => {
            component.sending = false;
            show_toast("Email sent successfully!");
            true
        }
    }
}
