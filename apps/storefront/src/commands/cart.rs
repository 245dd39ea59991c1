//! # Cart Commands
//!
//! Commands for cart manipulation and the cart panel.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Panel   │────►│ Checkout │       │
//! │  │  Cart    │     │          │     │  Open    │     │ Requested│       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart / buy / rent          panel closes,       │
//! │                   update_cart_item                  lines stay          │
//! │                   remove_from_cart                  (checkout.rs)       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                    │
//! │                                                      (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kashify_core::{CartLine, CartTotals, TransactionType};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::Storefront;

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    /// Grand total formatted for the panel footer
    pub total_display: String,
    pub is_open: bool,
}

impl From<&Storefront> for CartResponse {
    fn from(store: &Storefront) -> Self {
        let cart = store.cart();
        let totals = cart.totals();
        CartResponse {
            items: cart.lines().to_vec(),
            total_display: store.config().format_currency(totals.total_price),
            totals,
            is_open: store.is_cart_open(),
        }
    }
}

/// Gets the current cart contents.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  Shopping Cart                                                 │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Mahindra 575 DI Tractor   Buy    [-] 2 [+]     ₹1,700,000     │
/// │  Mahindra 575 DI Tractor   Rent   [-] 1 [+]         ₹2,500     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Total                                          ₹1,702,500     │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(store: &Storefront) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(store)
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Same product and type already in cart: quantity increases
/// - Otherwise: new line with name and prices frozen
/// - Unknown product: ignored, cart returned unchanged
///
/// ## Arguments
/// * `product_id` - Catalog id
/// * `kind` - Buy or rent (default: buy)
pub fn add_to_cart(
    store: &mut Storefront,
    product_id: String,
    kind: Option<TransactionType>,
) -> CartResponse {
    let kind = kind.unwrap_or_default();
    debug!(product_id = %product_id, %kind, "add_to_cart command");
    store.add_to_cart(&product_id, kind);
    CartResponse::from(&*store)
}

/// "Buy Now" on a product card.
pub fn buy(store: &mut Storefront, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "buy command");
    store.buy(&product_id);
    CartResponse::from(&*store)
}

/// "Rent" on a product card.
pub fn rent(store: &mut Storefront, product_id: String) -> CartResponse {
    debug!(product_id = %product_id, "rent command");
    store.rent(&product_id);
    CartResponse::from(&*store)
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity 0: removes the line
/// - Negative quantity: `INVALID_QUANTITY`, cart unchanged
/// - Line not in cart: no-op
pub fn update_cart_item(
    store: &mut Storefront,
    product_id: String,
    kind: TransactionType,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, %kind, quantity = %quantity, "update_cart_item command");
    store.update_quantity(&product_id, kind, quantity)?;
    Ok(CartResponse::from(&*store))
}

/// Removes a line from the cart.
pub fn remove_from_cart(
    store: &mut Storefront,
    product_id: String,
    kind: TransactionType,
) -> CartResponse {
    debug!(product_id = %product_id, %kind, "remove_from_cart command");
    store.remove_from_cart(&product_id, kind);
    CartResponse::from(&*store)
}

/// Clears all lines from the cart.
pub fn clear_cart(store: &mut Storefront) -> CartResponse {
    debug!("clear_cart command");
    store.clear_cart();
    CartResponse::from(&*store)
}

pub fn open_cart(store: &mut Storefront) -> CartResponse {
    debug!("open_cart command");
    store.open_cart();
    CartResponse::from(&*store)
}

pub fn close_cart(store: &mut Storefront) -> CartResponse {
    debug!("close_cart command");
    store.close_cart();
    CartResponse::from(&*store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use kashify_core::Money;

    #[test]
    fn test_tractor_scenario() {
        let mut store = Storefront::default();

        buy(&mut store, "1".to_string());
        let response = add_to_cart(&mut store, "1".to_string(), None);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total_price, Money::from_rupees(1_700_000));

        let response = rent(&mut store, "1".to_string());
        assert_eq!(response.totals.total_price, Money::from_rupees(1_702_500));
        assert_eq!(response.total_display, "₹1,702,500");

        let response = remove_from_cart(&mut store, "1".to_string(), TransactionType::Buy);
        assert_eq!(response.totals.total_price, Money::from_rupees(2_500));
        assert_eq!(response.totals.total_item_count, 1);
    }

    #[test]
    fn test_add_unknown_product_returns_unchanged_cart() {
        let mut store = Storefront::default();
        buy(&mut store, "2".to_string());
        let response = add_to_cart(&mut store, "ghost".to_string(), Some(TransactionType::Rent));
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total_item_count, 1);
    }

    #[test]
    fn test_update_cart_item_negative() {
        let mut store = Storefront::default();
        rent(&mut store, "3".to_string());

        let err = update_cart_item(&mut store, "3".to_string(), TransactionType::Rent, -5)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(get_cart(&store).items[0].quantity, 1);
    }

    #[test]
    fn test_update_cart_item_zero_removes() {
        let mut store = Storefront::default();
        rent(&mut store, "3".to_string());
        let response =
            update_cart_item(&mut store, "3".to_string(), TransactionType::Rent, 0).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_panel_flag() {
        let mut store = Storefront::default();
        assert!(open_cart(&mut store).is_open);
        assert!(!close_cart(&mut store).is_open);
    }

    #[test]
    fn test_clear_cart() {
        let mut store = Storefront::default();
        buy(&mut store, "6".to_string());
        rent(&mut store, "6".to_string());
        let response = clear_cart(&mut store);
        assert!(response.items.is_empty());
        assert_eq!(response.total_display, "₹0");
    }

    #[test]
    fn test_response_json_shape() {
        let mut store = Storefront::default();
        let response = rent(&mut store, "5".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["productId"], "5");
        assert_eq!(json["items"][0]["type"], "rent");
        assert_eq!(json["totals"]["totalItemCount"], 1);
        assert_eq!(json["isOpen"], false);
    }
}
