//! Chat messages sent to the completion API.

use crate::completion::ChatMessage;
use common::model::order::OrderedItem;
use common::model::variable::VariableValue;
use common::requests::GenerateEmailRequest;
use log::debug;
use serde_json::{Map, Value};

pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant that helps restaurant owners write professional emails to their customers.";

const FORMAT_EXAMPLE: &str = r#"<p>Dear {{customerName}},</p>
<p>Thank you for your order of {{mealName}}!</p>
<p>We hope you enjoy your meal. If you have any questions, please don't hesitate to contact us.</p>
<p>Best regards,</p>
<p>{{restaurantName}}</p>"#;

/// Builds the system and user messages for a generation request.
pub fn build_messages(request: &GenerateEmailRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(user_message(request)),
    ]
}

fn user_message(request: &GenerateEmailRequest) -> String {
    let details = &request.order_details;
    let variables: Vec<String> = request
        .variables
        .iter()
        .map(|v| format!("- {{{{{}}}}} (Example: {})", v.key, v.example.display_text()))
        .collect();

    let mut message = format!(
        "You are helping a restaurant owner write an email to a customer.\n\
         Here are the order details:\n\
         - Customer Name: {}\n\
         - Order ID: {}\n\
         - Ordered Items: {}\n\
         - Total: {}\n\
         - Customer Review: \"{}\"\n\
         \n\
         The restaurant owner has provided this prompt: \"{}\"\n\
         \n\
         You can use the following variables in your message:\n\
         {}\n\
         \n\
         Don't add subject line to the email.\n\
         The message should be formatted in HTML. This is an example of the HTML format:\n",
        order_field(details, "customerName"),
        order_field(details, "orderId"),
        order_field(details, "orderedItems"),
        order_field(details, "total"),
        order_field(details, "customerReview"),
        request.prompt,
        variables.join("\n"),
    );
    message.push_str(FORMAT_EXAMPLE);
    message.push_str(
        "\n\nPlease generate a professional and friendly email message based on this information.",
    );
    message
}

/// Renders one order field for the prompt. Absent fields become empty text.
fn order_field(details: &Map<String, Value>, key: &str) -> String {
    match details.get(key) {
        None | Some(Value::Null) => {
            debug!("orderDetails.{} is missing, using an empty string", key);
            String::new()
        }
        Some(Value::String(text)) => text.clone(),
        Some(value @ Value::Array(_)) => {
            match serde_json::from_value::<Vec<OrderedItem>>(value.clone()) {
                Ok(items) => VariableValue::Items(items).display_text(),
                Err(_) => value.to_string(),
            }
        }
        // f64 display drops a zero fraction: 25.0 renders as 25.
        Some(Value::Number(number)) => match number.as_f64() {
            Some(float) if number.is_f64() => float.to_string(),
            _ => number.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Role;
    use common::model::variable::sample_variables;
    use serde_json::json;

    fn request(order_details: Value) -> GenerateEmailRequest {
        serde_json::from_value(json!({
            "prompt": "Thank them for the review",
            "variables": sample_variables(),
            "orderDetails": order_details,
        }))
        .unwrap()
    }

    #[test]
    fn messages_carry_order_context_and_variables() {
        let messages = build_messages(&request(json!({
            "customerName": "Ann Lee",
            "orderId": "abc-123",
            "orderedItems": [{ "name": "Ramen", "quantity": 2, "price": 12.5 }],
            "total": 25.0,
            "customerReview": "Great!"
        })));

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_PROMPT);

        let user = &messages[1].content;
        assert_eq!(messages[1].role, Role::User);
        assert!(user.contains("- Customer Name: Ann Lee\n"));
        assert!(user.contains("- Order ID: abc-123\n"));
        assert!(user.contains("- Ordered Items: Ramen x2"));
        assert!(user.contains("- Total: 25\n"));
        assert!(user.contains("- Customer Review: \"Great!\"\n"));
        assert!(user.contains("prompt: \"Thank them for the review\""));
        assert!(user.contains("- {{customerName}} (Example: "));
        assert!(user.contains("<p>Dear {{customerName}},</p>"));
        assert!(user.contains("Don't add subject line"));
    }

    #[test]
    fn missing_fields_interpolate_as_empty() {
        let messages = build_messages(&request(json!({ "customerName": "Ann" })));
        let user = &messages[1].content;
        assert!(user.contains("- Order ID: \n"));
        assert!(user.contains("- Customer Review: \"\"\n"));
    }

    #[test]
    fn numbers_render_without_a_trailing_zero_fraction() {
        let details = json!({ "total": 25.0, "cents": 12.5, "count": 3 });
        let details = details.as_object().unwrap();
        assert_eq!(order_field(details, "total"), "25");
        assert_eq!(order_field(details, "cents"), "12.5");
        assert_eq!(order_field(details, "count"), "3");
    }
}
