//! View rendering for the email editor component.
//!
//! Left column: toolbar and the editable area. Right column: the live
//! preview, recomputed on every render from the document and the order's
//! values. The Send button and the AI dialog sit below.

use common::model::template::message_templates;
use common::preview::render_preview;
use yew::html::Scope;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;

use crate::workspace_grid::WorkspaceGrid;

use super::dialogs::ai::ai_dialog;
use super::helpers::{available_variables, preview_values};
use super::messages::{FormatCommand, Msg};
use super::state::{EmailEditor, Menu};

const EDITOR_PLACEHOLDER: &str = "Write your email here...";

pub fn view(component: &EmailEditor, ctx: &Context<EmailEditor>) -> Html {
    let link = ctx.link();
    let values = preview_values(ctx.props().order.as_ref());
    let preview = render_preview(&component.document, &values);
    let preview_blank = preview.trim().is_empty();

    html! {
        <section class="card email-editor">
            <div class="card-header">
                <h1>{"Email Template Editor"}</h1>
            </div>
            <WorkspaceGrid columns="minmax(300px, 1fr) minmax(300px, 1fr)">
                <div class="editor-column">
                    { build_toolbar(component, ctx) }
                    { build_editable(component, link) }
                </div>
                <div class="preview-column">
                    <h2 class="preview-title">{"Preview"}</h2>
                    <div class="preview card">
                        { Html::from_html_unchecked(AttrValue::from(preview)) }
                    </div>
                </div>
            </WorkspaceGrid>
            <div class="actions">
                <button
                    class="primary-btn send-btn"
                    disabled={component.sending || preview_blank}
                    onclick={link.callback(|_| Msg::Send)}
                >
                    <i class={classes!("material-icons", component.sending.then_some("spin"))}>
                        { if component.sending { "autorenew" } else { "send" } }
                    </i>
                    { if component.sending { "Sending..." } else { "Send Email" } }
                </button>
            </div>
            { ai_dialog(component, link) }
        </section>
    }
}

/// Formatting buttons, the two dropdown menus and the AI Assistant button.
fn build_toolbar(component: &EmailEditor, ctx: &Context<EmailEditor>) -> Html {
    let link = ctx.link();
    html! {
        <div class="icon-toolbar">
            { icon_button("undo", "Undo", link.callback(|_| Msg::Undo)) }
            { icon_button("redo", "Redo", link.callback(|_| Msg::Redo)) }
            <span class="toolbar-divider" />
            { format_button(link, "format_bold", "Bold", FormatCommand::Bold) }
            { format_button(link, "format_italic", "Italic", FormatCommand::Italic) }
            { format_button(link, "format_underlined", "Underline", FormatCommand::Underline) }
            { format_button(link, "strikethrough_s", "Strikethrough", FormatCommand::Strikethrough) }
            <span class="toolbar-divider" />
            { format_button(link, "format_align_left", "Align left", FormatCommand::AlignLeft) }
            { format_button(link, "format_align_center", "Align center", FormatCommand::AlignCenter) }
            { format_button(link, "format_align_right", "Align right", FormatCommand::AlignRight) }
            <span class="toolbar-divider" />
            { format_button(link, "format_list_bulleted", "Bullets", FormatCommand::BulletList) }
            { format_button(link, "format_list_numbered", "Numbers", FormatCommand::NumberedList) }
            <span class="toolbar-divider" />
            { variables_menu(component, ctx) }
            { templates_menu(component, link) }
            <button class="icon-btn wide" onclick={link.callback(|_| Msg::OpenAiDialog)}>
                <i class={classes!("material-icons", component.is_generating().then_some("spin"))}>
                    { if component.is_generating() { "autorenew" } else { "smart_toy" } }
                </i>
                <span class="icon-label">{"AI Assistant"}</span>
            </button>
        </div>
    }
}

fn build_editable(component: &EmailEditor, link: &Scope<EmailEditor>) -> Html {
    html! {
        <div
            class="editor-surface card"
            contenteditable="true"
            ref={component.editor_ref.clone()}
            data-placeholder={EDITOR_PLACEHOLDER}
            spellcheck="true"
            oninput={link.callback(|_: InputEvent| Msg::Input)}
            onkeydown={link.batch_callback(|e: KeyboardEvent| {
                if !(e.ctrl_key() || e.meta_key()) {
                    return None;
                }
                match e.key().as_str() {
                    "z" if e.shift_key() => {
                        e.prevent_default();
                        Some(Msg::Redo)
                    }
                    "z" => {
                        e.prevent_default();
                        Some(Msg::Undo)
                    }
                    "y" => {
                        e.prevent_default();
                        Some(Msg::Redo)
                    }
                    _ => None,
                }
            })}
        />
    }
}

fn variables_menu(component: &EmailEditor, ctx: &Context<EmailEditor>) -> Html {
    let link = ctx.link();
    let variables = available_variables(&preview_values(ctx.props().order.as_ref()));
    let items = variables
        .into_iter()
        .map(|variable| {
            let key = variable.key.clone();
            html! {
                <button
                    class="menu-item"
                    onmousedown={keep_selection()}
                    onclick={link.callback(move |_| Msg::InsertVariable(key.clone()))}
                >
                    { variable.label }
                </button>
            }
        })
        .collect::<Html>();

    dropdown(component, link, Menu::Variables, "data_object", "Insert Variable", items)
}

fn templates_menu(component: &EmailEditor, link: &Scope<EmailEditor>) -> Html {
    let items = message_templates()
        .into_iter()
        .enumerate()
        .map(|(index, template)| {
            html! {
                <button class="menu-item" onclick={link.callback(move |_| Msg::ApplyTemplate(index))}>
                    { template.name }
                </button>
            }
        })
        .collect::<Html>();

    dropdown(component, link, Menu::Templates, "description", "Templates", items)
}

fn dropdown(
    component: &EmailEditor,
    link: &Scope<EmailEditor>,
    menu: Menu,
    icon_name: &str,
    label: &str,
    items: Html,
) -> Html {
    let open = component.open_menu == Some(menu);
    html! {
        <div class="dropdown">
            <button
                class={classes!("icon-btn", "wide", open.then_some("active"))}
                onmousedown={keep_selection()}
                onclick={link.callback(move |_| Msg::ToggleMenu(menu))}
            >
                <i class="material-icons">{ icon_name.to_string() }</i>
                <span class="icon-label">{ label.to_string() }</span>
            </button>
            if open {
                <div class="dropdown-menu">{ items }</div>
            }
        </div>
    }
}

/// Toolbar button for a formatting command. Keeps the editor selection.
fn format_button(
    link: &Scope<EmailEditor>,
    icon_name: &str,
    label: &str,
    command: FormatCommand,
) -> Html {
    icon_button(icon_name, label, link.callback(move |_| Msg::Format(command)))
}

/// Renders a toolbar button with a Material icon and a label.
fn icon_button(icon_name: &str, label: &str, on_click: Callback<MouseEvent>) -> Html {
    html! {
        <button class="icon-btn" title={label.to_string()} onmousedown={keep_selection()} onclick={on_click}>
            <i class="material-icons">{ icon_name.to_string() }</i>
            <span class="icon-label">{ label.to_string() }</span>
        </button>
    }
}

/// Prevents a button from taking focus away from the editable area, so the
/// caret is still there when the click handler runs.
fn keep_selection() -> Callback<MouseEvent> {
    Callback::from(|e: MouseEvent| e.prevent_default())
}
