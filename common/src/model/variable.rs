use crate::model::order::OrderedItem;
use crate::preview::PreviewValues;
use serde::{Deserialize, Serialize};

/// A variable the operator can insert into a template as `{{key}}`.
///
/// `example` is shown to the completion model and used for the preview when
/// no order is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub key: String,
    pub label: String,
    pub example: VariableValue,
}

/// Value bound to a placeholder: either a scalar string or a list of items.
///
/// Serialized untagged, so on the wire it is a plain JSON string or an array
/// of `{name, quantity, price}` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Text(String),
    Items(Vec<OrderedItem>),
}

impl VariableValue {
    /// Human-readable single-line rendering, used when the value is written
    /// into prose (the generation prompt) rather than into HTML.
    pub fn display_text(&self) -> String {
        match self {
            VariableValue::Text(text) => text.clone(),
            VariableValue::Items(items) => items
                .iter()
                .map(|item| format!("{} x{} {}", item.name, item.quantity, item.price))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl VariableDescriptor {
    fn text(key: &str, label: &str, example: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            example: VariableValue::Text(example.to_string()),
        }
    }
}

/// The static variable catalog with its example values.
pub fn sample_variables() -> Vec<VariableDescriptor> {
    vec![
        VariableDescriptor::text("customerName", "Customer Name", "John Doe"),
        VariableDescriptor::text("customerEmail", "Customer Email", "john@example.com"),
        VariableDescriptor::text("orderId", "Order ID", "#123456"),
        VariableDescriptor {
            key: "orderedItems".to_string(),
            label: "Ordered Items".to_string(),
            example: VariableValue::Items(vec![
                OrderedItem {
                    name: "Spicy Chicken Bowl".to_string(),
                    quantity: 1,
                    price: 10.99,
                },
                OrderedItem {
                    name: "Vegetable Spring Rolls".to_string(),
                    quantity: 2,
                    price: 5.99,
                },
            ]),
        },
        VariableDescriptor::text("total", "Total", "$45.67"),
        VariableDescriptor::text(
            "customerReview",
            "Customer Review",
            "The food was delicious, but delivery took longer than expected.",
        ),
        VariableDescriptor::text("restaurantName", "Restaurant Name", "The Best Restaurant"),
    ]
}

/// Preview mapping built from the example values of `variables`.
pub fn example_values(variables: &[VariableDescriptor]) -> PreviewValues {
    variables
        .iter()
        .map(|v| (v.key.clone(), v.example.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_deserializes_from_string_or_item_list() {
        let scalar: VariableDescriptor =
            serde_json::from_str(r#"{"key":"total","label":"Total","example":"$1.00"}"#).unwrap();
        assert_eq!(scalar.example, VariableValue::Text("$1.00".into()));

        let list: VariableDescriptor = serde_json::from_str(
            r#"{"key":"orderedItems","label":"Items","example":[{"name":"Tea","quantity":1,"price":2}]}"#,
        )
        .unwrap();
        assert_eq!(
            list.example.display_text(),
            "Tea x1 2",
        );
    }

    #[test]
    fn catalog_keys_are_unique() {
        let variables = sample_variables();
        let values = example_values(&variables);
        assert_eq!(values.len(), variables.len());
        assert!(values.contains_key("restaurantName"));
    }
}
