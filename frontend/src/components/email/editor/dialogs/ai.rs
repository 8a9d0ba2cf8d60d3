use crate::components::email::editor::messages::Msg;
use crate::components::email::editor::state::EmailEditor;
use crate::tops_sheet::top_sheet::TopSheet;
use web_sys::HtmlTextAreaElement;
use yew::html::Scope;
use yew::prelude::*;

/// "AI Message Generator" dialog: a prompt textarea and a Generate button.
///
/// Generate is disabled while a generation runs or the prompt is blank.
/// Submitting closes the dialog and clears the prompt.
pub fn ai_dialog(component: &EmailEditor, link: &Scope<EmailEditor>) -> Html {
    let generating = component.is_generating();
    let disabled = generating || component.prompt.trim().is_empty();

    html! {
        <TopSheet
            node_ref={component.ai_dialog_ref.clone()}
            title="AI Message Generator"
            description={AttrValue::from("Create a personalized message using AI")}
            on_close={link.callback(|_| Msg::CloseAiDialog)}
        >
            <div class="dialog-body">
                <textarea
                    class="prompt-input"
                    placeholder="Enter your message prompt (e.g., 'Create a thank you message with a special offer')"
                    value={component.prompt.clone()}
                    oninput={link.callback(|e: InputEvent| {
                        Msg::PromptChanged(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
                <button
                    class="primary-btn full-width"
                    {disabled}
                    onclick={link.callback(|_| Msg::Generate)}
                >
                    { if generating { "Generating..." } else { "Generate Message" } }
                </button>
            </div>
        </TopSheet>
    }
}
