//! Random but plausible restaurant orders.
//!
//! Every generator takes the random source as a parameter, so tests can use a
//! seeded `StdRng` and handlers use `thread_rng()`.

use chrono::{Duration, Utc};
use common::model::order::{Order, OrderedItem, Rating};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Builder;

/// Number of orders returned by the list endpoint.
pub const BATCH_SIZE: usize = 10;

const FIRST_NAMES: &[&str] = &[
    "Ann", "Carlos", "Mei", "Oliver", "Priya", "Lucas", "Fatima", "Noah", "Elena", "Kenji",
];
const LAST_NAMES: &[&str] = &[
    "Lee", "Garcia", "Chen", "Smith", "Patel", "Martin", "Khan", "Brown", "Rossi", "Tanaka",
];
const RESTAURANTS: &[&str] = &[
    "Luigi's Trattoria",
    "The Green Bowl",
    "Sakura Sushi Bar",
    "Burger Barn",
    "Spice Route",
];
/// Menu entries with their unit price.
const MENU: &[(&str, f64)] = &[
    ("Margherita Pizza", 11.5),
    ("Spaghetti Carbonara", 13.0),
    ("Caesar Salad", 8.75),
    ("Salmon Nigiri", 6.5),
    ("Chicken Tikka Masala", 14.25),
    ("Veggie Burger", 10.0),
    ("Pad Thai", 12.5),
    ("Tiramisu", 6.0),
    ("Lemonade", 3.5),
    ("Garlic Bread", 4.25),
];
const REVIEWS: &[&str] = &[
    "Food arrived hot and tasted amazing!",
    "Delivery took longer than expected, but the food was good.",
    "The portion was smaller than last time.",
    "Absolutely loved it, will order again.",
    "My order was missing a drink.",
    "Great value for money.",
];
const CRITERIA: &[&str] = &["Food Quality", "Delivery Time", "Packaging", "Value for Money"];

/// Share of orders that come with a written review.
const REVIEW_PROBABILITY: f64 = 0.7;
/// Orders are placed within this many minutes before now (two weeks).
const MAX_AGE_MINUTES: i64 = 60 * 24 * 14;

pub fn generate_orders<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Order> {
    (0..count).map(|_| generate_order(rng)).collect()
}

pub fn generate_order<R: Rng + ?Sized>(rng: &mut R) -> Order {
    let first = pick(rng, FIRST_NAMES, "Guest");
    let last = pick(rng, LAST_NAMES, "Customer");
    let customer_name = format!("{} {}", first, last);
    let customer_email = format!(
        "{}.{}@example.com",
        first.to_lowercase(),
        last.to_lowercase()
    );

    let item_count = rng.gen_range(1..=4);
    let ordered_items: Vec<OrderedItem> = MENU
        .choose_multiple(rng, item_count)
        .map(|(name, price)| OrderedItem {
            name: name.to_string(),
            quantity: rng.gen_range(1..=3),
            price: *price,
        })
        .collect();

    let customer_review = if rng.gen_bool(REVIEW_PROBABILITY) {
        REVIEWS.choose(rng).map(|review| review.to_string())
    } else {
        None
    };

    let ratings = CRITERIA
        .iter()
        .map(|criterion| Rating {
            criterion: criterion.to_string(),
            rating: rng.gen_range(1..=5),
        })
        .collect();

    let order_id = Builder::from_random_bytes(rng.gen::<[u8; 16]>()).into_uuid().to_string();
    let created_at = Utc::now() - Duration::minutes(rng.gen_range(5..MAX_AGE_MINUTES));
    let restaurant_name = pick(rng, RESTAURANTS, "Our Restaurant").to_string();

    let mut order = Order {
        order_id,
        customer_name,
        customer_email,
        ordered_items,
        total: 0.0,
        customer_review,
        ratings,
        created_at,
        restaurant_name,
    };
    order.total = (order.computed_total() * 100.0).round() / 100.0;
    order
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str], fallback: &'a str) -> &'a str {
    pool.choose(rng).copied().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn generated_orders_are_consistent() {
        let mut rng = StdRng::seed_from_u64(42);
        for order in generate_orders(&mut rng, 50) {
            assert!((1..=4).contains(&order.ordered_items.len()));
            assert!(order.ordered_items.iter().all(|i| (1..=3).contains(&i.quantity)));
            assert!((order.total - order.computed_total()).abs() < 0.005);
            assert_eq!(order.ratings.len(), CRITERIA.len());
            assert!(order.ratings.iter().all(|r| (1..=5).contains(&r.rating)));
            assert!(order.customer_email.ends_with("@example.com"));
            assert!(order.created_at < Utc::now());

            let names: HashSet<&str> =
                order.ordered_items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names.len(), order.ordered_items.len());
        }
    }

    #[test]
    fn identifiers_are_unique_uuids() {
        let mut rng = StdRng::seed_from_u64(1);
        let ids: HashSet<String> = generate_orders(&mut rng, BATCH_SIZE)
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(ids.len(), BATCH_SIZE);
        assert!(ids.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn same_seed_gives_same_orders_apart_from_timestamps() {
        let a = generate_order(&mut StdRng::seed_from_u64(9));
        let b = generate_order(&mut StdRng::seed_from_u64(9));
        assert_eq!(a.order_id, b.order_id);
        assert_eq!(a.ordered_items, b.ordered_items);
        assert_eq!(a.customer_review, b.customer_review);
    }
}
