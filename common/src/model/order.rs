use crate::model::variable::VariableValue;
use crate::preview::PreviewValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A past customer order, as served by `/api/orders`.
///
/// Orders are read-only from the editor's point of view: the backend produces
/// them (randomly, in this demo) and the frontend only displays them and feeds
/// their fields into the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub ordered_items: Vec<OrderedItem>,
    /// Stored total. Generated orders keep it equal to `computed_total()`
    /// rounded to cents, but nothing enforces that for deserialized input.
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_review: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    pub created_at: DateTime<Utc>,
    pub restaurant_name: String,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedItem {
    pub name: String,
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
}

/// A (criterion, rating) pair left by the customer, rating in 1..=5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub criterion: String,
    pub rating: u8,
}

impl Order {
    /// Sum of quantity times unit price over all items.
    pub fn computed_total(&self) -> f64 {
        self.ordered_items
            .iter()
            .map(|item| item.quantity as f64 * item.price)
            .sum()
    }

    /// Mean of all ratings, `None` when the customer left none.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.iter().map(|r| r.rating as u32).sum();
        Some(sum as f64 / self.ratings.len() as f64)
    }

    /// First eight characters of the identifier, used in lists and cards.
    pub fn short_id(&self) -> &str {
        match self.order_id.char_indices().nth(8) {
            Some((idx, _)) => &self.order_id[..idx],
            None => &self.order_id,
        }
    }

    /// Key/value mapping used to fill `{{key}}` placeholders in the preview.
    ///
    /// Keys follow the JSON field names. `customerReview` is left out when the
    /// order has no review so the placeholder stays visible in the preview.
    pub fn preview_values(&self) -> PreviewValues {
        let mut values = PreviewValues::new();
        values.insert("orderId".into(), VariableValue::Text(self.order_id.clone()));
        values.insert(
            "customerName".into(),
            VariableValue::Text(self.customer_name.clone()),
        );
        values.insert(
            "customerEmail".into(),
            VariableValue::Text(self.customer_email.clone()),
        );
        values.insert(
            "orderedItems".into(),
            VariableValue::Items(self.ordered_items.clone()),
        );
        values.insert("total".into(), VariableValue::Text(self.total.to_string()));
        if let Some(review) = &self.customer_review {
            values.insert("customerReview".into(), VariableValue::Text(review.clone()));
        }
        values.insert(
            "restaurantName".into(),
            VariableValue::Text(self.restaurant_name.clone()),
        );
        values.insert(
            "createdAt".into(),
            VariableValue::Text(self.created_at.to_rfc3339()),
        );
        values
    }
}
