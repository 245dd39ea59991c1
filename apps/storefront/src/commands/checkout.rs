//! # Checkout Commands
//!
//! Checkout only records the request: it snapshots the cart, closes the
//! panel and leaves every line in place. Clearing is a separate command.

use kashify_core::CheckoutSummary;
use serde::Serialize;
use tracing::debug;

use crate::commands::cart::CartResponse;
use crate::state::Storefront;

/// Checkout acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub summary: CheckoutSummary,
    pub total_display: String,
    /// Cart after checkout (same lines, panel closed)
    pub cart: CartResponse,
}

/// Requests checkout of the current cart.
pub fn checkout(store: &mut Storefront) -> CheckoutResponse {
    debug!("checkout command");
    let summary = store.checkout();
    CheckoutResponse {
        total_display: store.config().format_currency(summary.totals.total_price),
        summary,
        cart: CartResponse::from(&*store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{buy, open_cart, rent};
    use kashify_core::Money;

    #[test]
    fn test_checkout_keeps_cart() {
        let mut store = Storefront::default();
        buy(&mut store, "1".to_string());
        rent(&mut store, "1".to_string());
        open_cart(&mut store);

        let response = checkout(&mut store);
        assert_eq!(response.summary.lines.len(), 2);
        assert_eq!(response.summary.totals.total_price, Money::from_rupees(852_500));
        assert_eq!(response.total_display, "₹852,500");
        assert_eq!(response.cart.items.len(), 2);
        assert!(!response.cart.is_open);
    }

    #[test]
    fn test_checkout_ids_are_unique() {
        let mut store = Storefront::default();
        buy(&mut store, "4".to_string());
        let first = checkout(&mut store).summary.id;
        let second = checkout(&mut store).summary.id;
        assert_ne!(first, second);
    }
}
