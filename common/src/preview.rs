//! Placeholder substitution for the live preview.
//!
//! Every `{{key}}` whose key has a value is replaced; tokens for unknown keys
//! are left exactly as written. Values are inserted as raw HTML, which is only
//! acceptable because the preview renders the operator's own content in a
//! trusted demo environment.

use crate::document::Document;
use crate::model::order::OrderedItem;
use crate::model::variable::VariableValue;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Key to value mapping used to fill placeholders.
pub type PreviewValues = BTreeMap<String, VariableValue>;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid"));

/// Renders the preview for `document`. An empty document previews as an
/// empty string.
pub fn render_preview(document: &Document, values: &PreviewValues) -> String {
    if document.is_empty() {
        return String::new();
    }
    substitute(&document.to_html(), values)
}

/// Replaces each known `{{key}}` in `html` in a single pass, so placeholder
/// text inside inserted values is never substituted again.
pub fn substitute(html: &str, values: &PreviewValues) -> String {
    PLACEHOLDER_RE
        .replace_all(html, |caps: &Captures| match values.get(&caps[1]) {
            Some(VariableValue::Text(text)) => text.clone(),
            Some(VariableValue::Items(items)) => items_list(items),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn items_list(items: &[OrderedItem]) -> String {
    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<li class="editor-listitem">{} x{} {}</li>"#,
                item.name, item.quantity, item.price
            )
        })
        .collect();
    format!(r#"<ul class="editor-list-ul">{}</ul>"#, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> VariableValue {
        VariableValue::Text(value.into())
    }

    #[test]
    fn known_keys_are_replaced_and_unknown_kept() {
        let values = PreviewValues::from([("customerName".to_string(), text("Ann"))]);
        assert_eq!(
            substitute("Hi {{customerName}}, re {{orderId}}", &values),
            "Hi Ann, re {{orderId}}"
        );
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let values = PreviewValues::from([("restaurantName".to_string(), text("Luigi's"))]);
        assert_eq!(
            substitute("{{restaurantName}} / {{restaurantName}}", &values),
            "Luigi's / Luigi's"
        );
    }

    #[test]
    fn item_lists_render_as_unordered_list() {
        let values = PreviewValues::from([(
            "orderedItems".to_string(),
            VariableValue::Items(vec![OrderedItem {
                name: "Tea".into(),
                quantity: 1,
                price: 2.0,
            }]),
        )]);
        let html = substitute("{{orderedItems}}", &values);
        assert!(html.starts_with("<ul"));
        assert!(html.contains("Tea x1 2"));
        assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn values_are_not_substituted_twice() {
        let values = PreviewValues::from([
            ("a".to_string(), text("{{b}}")),
            ("b".to_string(), text("B")),
        ]);
        assert_eq!(substitute("{{a}} {{b}}", &values), "{{b}} B");
    }

    #[test]
    fn empty_document_previews_as_nothing() {
        let values = PreviewValues::new();
        assert_eq!(render_preview(&Document::from_html("<p><br></p>"), &values), "");
        assert_eq!(
            render_preview(&Document::from_html("<p>{{x}}</p>"), &values),
            "<p>{{x}}</p>"
        );
    }
}
