//! Utility functions for the email editor component.
//!
//! - **Browser editing**: running `execCommand` on the current selection and
//!   checking whether the caret sits inside the editable area.
//! - **User feedback**: toasts and blocking alerts.
//! - **Order context**: the values, variables and request payload derived
//!   from the selected order (or the sample catalog when none is selected).

use common::model::order::Order;
use common::model::variable::{example_values, sample_variables, VariableDescriptor};
use common::preview::PreviewValues;
use common::requests::GenerateEmailRequest;
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement, Node};
use yew::NodeRef;

/// Runs a `document.execCommand` on the current selection.
///
/// Returns `false` when the browser refused or the document is unavailable.
pub fn exec_command(command: &str, value: Option<&str>) -> bool {
    let Some(document) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
    else {
        return false;
    };
    let result = match value {
        Some(value) => document.exec_command_with_show_ui_and_value(command, false, value),
        None => document.exec_command(command),
    };
    match result {
        Ok(applied) => applied,
        Err(e) => {
            gloo_console::error!(format!("execCommand {} failed", command), e);
            false
        }
    }
}

/// True when the selection's anchor lies inside the element behind `editor_ref`.
pub fn selection_inside(editor_ref: &NodeRef) -> bool {
    let Some(editor) = editor_ref.cast::<Node>() else {
        return false;
    };
    web_sys::window()
        .and_then(|w| w.get_selection().ok().flatten())
        .and_then(|selection| selection.anchor_node())
        .is_some_and(|anchor| editor.contains(Some(&anchor)))
}

/// Gives keyboard focus to the element behind `editor_ref`.
pub fn focus(editor_ref: &NodeRef) {
    if let Some(editor) = editor_ref.cast::<HtmlElement>() {
        editor.focus().ok();
    }
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast is plain text and removes itself after three seconds.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
        toast.set_class_name("toast");
        toast.set_text_content(Some(message));
        if body.append_child(&toast).is_ok() {
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(3000).await;
                toast.remove();
            });
        }
    }
}

/// Blocking alert dialog.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

/// `{{key}}` for a variable key.
pub fn placeholder_token(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}

/// Values used by the preview: the order's, or the sample examples.
pub fn preview_values(order: Option<&Order>) -> PreviewValues {
    match order {
        Some(order) => order.preview_values(),
        None => example_values(&sample_variables()),
    }
}

/// Catalog entries that have a value to substitute.
pub fn available_variables(values: &PreviewValues) -> Vec<VariableDescriptor> {
    sample_variables()
        .into_iter()
        .filter(|variable| values.contains_key(&variable.key))
        .collect()
}

/// Payload of an AI generation request.
pub fn generation_request(prompt: String, order: Option<&Order>) -> GenerateEmailRequest {
    let variables = available_variables(&preview_values(order));
    let order_details = match order.map(serde_json::to_value) {
        Some(Ok(Value::Object(details))) => details,
        _ => Map::new(),
    };
    GenerateEmailRequest {
        prompt,
        variables,
        order_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::model::order::OrderedItem;

    fn order(review: Option<&str>) -> Order {
        Order {
            order_id: "0f3a9c12-aaaa".into(),
            customer_name: "Ann Lee".into(),
            customer_email: "ann.lee@example.com".into(),
            ordered_items: vec![OrderedItem {
                name: "Ramen".into(),
                quantity: 2,
                price: 12.5,
            }],
            total: 25.0,
            customer_review: review.map(str::to_string),
            ratings: Vec::new(),
            created_at: Utc::now(),
            restaurant_name: "Spice Route".into(),
        }
    }

    #[test]
    fn placeholder_tokens_use_double_braces() {
        assert_eq!(placeholder_token("customerName"), "{{customerName}}");
    }

    #[test]
    fn all_sample_variables_are_offered_without_an_order() {
        let offered = available_variables(&preview_values(None));
        assert_eq!(offered.len(), sample_variables().len());
    }

    #[test]
    fn review_variable_is_hidden_when_the_order_has_none() {
        let keys: Vec<String> = available_variables(&preview_values(Some(&order(None))))
            .into_iter()
            .map(|v| v.key)
            .collect();
        assert!(!keys.contains(&"customerReview".to_string()));
        assert!(keys.contains(&"customerName".to_string()));
    }

    #[test]
    fn request_carries_the_order_as_camel_case_json() {
        let order = order(Some("Great"));
        let request = generation_request("Say thanks".into(), Some(&order));
        assert_eq!(request.prompt, "Say thanks");
        assert_eq!(request.order_details["customerName"], "Ann Lee");
        assert_eq!(request.order_details["customerReview"], "Great");

        let without = generation_request("Say thanks".into(), None);
        assert!(without.order_details.is_empty());
    }
}
