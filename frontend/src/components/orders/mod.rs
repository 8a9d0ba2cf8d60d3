//! Order sidebar and the details card of the selected order.

mod details;
mod sidebar;

pub use details::OrderDetails;
pub use sidebar::OrderSidebar;

/// Formats an amount as dollars with two decimals.
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(12.5), "$12.50");
        assert_eq!(format_money(3.0), "$3.00");
    }
}
