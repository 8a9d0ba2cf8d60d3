//! # Order Catalog Service
//!
//! Serves the demo order catalog under `/api/orders`. There is no store
//! behind it: every request gets freshly generated orders.
//!
//! ## Sub-modules:
//! - `list`: A batch of orders for the sidebar.
//! - `get`: One order whose identifier echoes the requested one.
//! - `mock`: The random order generator both handlers share.

mod get;
mod list;
mod mock;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for all order endpoints.
const API_PATH: &str = "/api/orders";

/// Configures the `/api/orders` scope.
///
/// *   **`GET /api/orders`**: `list::process`, JSON array of `Order`.
/// *   **`GET /api/orders/{order_id}`**: `get::process`, one `Order` whose
///     `orderId` is the path parameter. The rest of the order is regenerated
///     on every call.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{order_id}", get().to(get::process))
}
