//! `GET /api/orders/{order_id}`.

use crate::services::orders::mock;
use actix_web::{web, HttpResponse, Responder};
use common::model::order::Order;
use rand::Rng;

pub async fn process(order_id: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(lookup_order(&order_id, &mut rand::thread_rng()))
}

/// Generates an order that carries `order_id`.
pub fn lookup_order<R: Rng + ?Sized>(order_id: &str, rng: &mut R) -> Order {
    let mut order = mock::generate_order(rng);
    order.order_id = order_id.to_string();
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn only_the_identifier_is_stable() {
        let mut rng = StdRng::seed_from_u64(7);
        let first = lookup_order("abc123", &mut rng);
        let second = lookup_order("abc123", &mut rng);
        assert_eq!(first.order_id, "abc123");
        assert_eq!(second.order_id, "abc123");
        assert_ne!(first, second);
    }
}
