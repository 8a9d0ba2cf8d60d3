//! # Email Generation Service
//!
//! Relays a generation request to the completion API and streams the answer
//! back to the browser as server-sent events.
//!
//! ## Sub-modules:
//! - `prompt`: Builds the chat messages from the operator prompt, the variable
//!   catalog and the order context.
//! - `relay`: The HTTP handler that opens the upstream stream and re-frames
//!   each text delta for the client.

mod prompt;
mod relay;

use actix_web::web::{post, resource};
use actix_web::Resource;

/// Path of the generation endpoint.
const API_PATH: &str = "/api/generate-email";

/// Configures the `POST /api/generate-email` resource.
///
/// Registered as a single resource instead of a scope so it does not capture
/// the other `/api/*` routes.
///
/// *   **`POST /api/generate-email`**:
///     - **Handler**: `relay::process`
///     - **Body**: `GenerateEmailRequest` (`prompt`, `variables`, `orderDetails`).
///     - **Response**: `text/event-stream` of `data: {"content": ...}` events
///       ending with `data: [DONE]`, or `500` with
///       `{"error": "Failed to generate email"}` when the upstream call fails.
pub fn configure_routes() -> Resource {
    resource(API_PATH).route(post().to(relay::process))
}
