//! # Store Events
//!
//! Notifications produced by cart and favorite mutations.
//!
//! ## Delivery
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront::add_to_cart(...)                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  StoreEvent::ItemAdded { name, kind, unit_price, quantity }             │
//! │        │                                                                │
//! │        ├──────────► EventSink::publish  (TracingSink → log line)        │
//! │        │                                                                │
//! │        └──────────► outbox ──► take_events() ──► bridge response        │
//! │                                                   "events": [           │
//! │                                                     { "title": ...,     │
//! │                                                       "description": ...│
//! │                                                     } ]                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kashify_core::{CartLine, Money, TransactionType};
use serde::Serialize;
use tracing::info;

/// A user-visible change to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum StoreEvent {
    #[serde(rename_all = "camelCase")]
    ItemAdded {
        product_id: String,
        name: String,
        #[serde(rename = "type")]
        kind: TransactionType,
        unit_price: Money,
        /// Line quantity after the add
        quantity: i64,
    },

    #[serde(rename_all = "camelCase")]
    ItemRemoved {
        product_id: String,
        name: String,
        #[serde(rename = "type")]
        kind: TransactionType,
        unit_price: Money,
        /// Quantity the line had when it was removed
        quantity: i64,
        line_total: Money,
    },

    #[serde(rename_all = "camelCase")]
    QuantityChanged {
        product_id: String,
        name: String,
        #[serde(rename = "type")]
        kind: TransactionType,
        unit_price: Money,
        previous: i64,
        quantity: i64,
        /// Line total at the new quantity
        line_total: Money,
    },

    #[serde(rename_all = "camelCase")]
    CartCleared { lines_removed: usize },

    #[serde(rename_all = "camelCase")]
    CheckoutRequested {
        checkout_id: String,
        line_count: usize,
        total_item_count: i64,
        total_price: Money,
    },

    #[serde(rename_all = "camelCase")]
    FavoriteToggled {
        product_id: String,
        name: String,
        is_favorite: bool,
    },
}

impl StoreEvent {
    /// Event for a line that left the cart.
    pub fn item_removed(line: &CartLine) -> Self {
        StoreEvent::ItemRemoved {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            kind: line.kind,
            unit_price: line.unit_price(),
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }

    /// Toast title.
    pub fn title(&self) -> &'static str {
        match self {
            StoreEvent::ItemAdded {
                kind: TransactionType::Buy,
                ..
            } => "Added to Cart",
            StoreEvent::ItemAdded {
                kind: TransactionType::Rent,
                ..
            } => "Rental Added",
            StoreEvent::ItemRemoved { .. } => "Removed from Cart",
            StoreEvent::QuantityChanged { .. } => "Cart Updated",
            StoreEvent::CartCleared { .. } => "Cart Cleared",
            StoreEvent::CheckoutRequested { .. } => "Checkout Initiated",
            StoreEvent::FavoriteToggled {
                is_favorite: true, ..
            } => "Added to Favorites",
            StoreEvent::FavoriteToggled {
                is_favorite: false,
                ..
            } => "Removed from Favorites",
        }
    }

    /// Toast body.
    pub fn description(&self) -> String {
        match self {
            StoreEvent::ItemAdded {
                name,
                kind: TransactionType::Buy,
                ..
            } => format!("{} added to your cart", name),
            StoreEvent::ItemAdded {
                name,
                kind: TransactionType::Rent,
                ..
            } => format!("{} rental added to your cart", name),
            StoreEvent::ItemRemoved { name, .. } => format!("{} removed from your cart", name),
            StoreEvent::QuantityChanged { name, quantity, .. } => {
                format!("{} quantity set to {}", name, quantity)
            }
            StoreEvent::CartCleared { lines_removed } => {
                format!("Removed {} items from your cart", lines_removed)
            }
            StoreEvent::CheckoutRequested { line_count, .. } => {
                format!("Processing {} items for checkout", line_count)
            }
            StoreEvent::FavoriteToggled {
                name,
                is_favorite: true,
                ..
            } => format!("{} saved to your favorites", name),
            StoreEvent::FavoriteToggled { name, .. } => {
                format!("{} removed from your favorites", name)
            }
        }
    }

    pub fn notification(&self) -> Notification<'_> {
        Notification {
            event: self,
            title: self.title(),
            description: self.description(),
        }
    }
}

/// Wire form of an event: the event fields plus its toast text.
#[derive(Debug, Serialize)]
pub struct Notification<'a> {
    #[serde(flatten)]
    pub event: &'a StoreEvent,
    pub title: &'static str,
    pub description: String,
}

// =============================================================================
// Sinks
// =============================================================================

/// Receives every event as it is emitted.
pub trait EventSink {
    fn publish(&mut self, event: &StoreEvent);
}

/// Logs each event at INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn publish(&mut self, event: &StoreEvent) {
        info!(
            title = event.title(),
            description = %event.description(),
            "Store event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tractor_added(kind: TransactionType) -> StoreEvent {
        StoreEvent::ItemAdded {
            product_id: "1".to_string(),
            name: "Mahindra 575 DI Tractor".to_string(),
            kind,
            unit_price: Money::from_rupees(850_000),
            quantity: 1,
        }
    }

    #[test]
    fn test_item_added_text() {
        let event = tractor_added(TransactionType::Buy);
        assert_eq!(event.title(), "Added to Cart");
        assert_eq!(event.description(), "Mahindra 575 DI Tractor added to your cart");

        let rent = tractor_added(TransactionType::Rent);
        assert_eq!(rent.title(), "Rental Added");
    }

    #[test]
    fn test_checkout_text() {
        let event = StoreEvent::CheckoutRequested {
            checkout_id: "c".to_string(),
            line_count: 2,
            total_item_count: 3,
            total_price: Money::from_rupees(852_500),
        };
        assert_eq!(event.title(), "Checkout Initiated");
        assert_eq!(event.description(), "Processing 2 items for checkout");
    }

    #[test]
    fn test_removal_and_quantity_json_carry_prices() {
        let removed = StoreEvent::ItemRemoved {
            product_id: "2".to_string(),
            name: "Automatic Seed Drill Machine".to_string(),
            kind: TransactionType::Rent,
            unit_price: Money::from_rupees(800),
            quantity: 2,
            line_total: Money::from_rupees(1_600),
        };
        let json = serde_json::to_value(removed.notification()).unwrap();
        assert_eq!(json["event"], "itemRemoved");
        assert_eq!(json["type"], "rent");
        assert_eq!(json["unitPrice"], 80_000);
        assert_eq!(json["lineTotal"], 160_000);
        assert_eq!(json["title"], "Removed from Cart");

        let changed = StoreEvent::QuantityChanged {
            product_id: "2".to_string(),
            name: "Automatic Seed Drill Machine".to_string(),
            kind: TransactionType::Buy,
            unit_price: Money::from_rupees(125_000),
            previous: 1,
            quantity: 3,
            line_total: Money::from_rupees(375_000),
        };
        let json = serde_json::to_value(changed.notification()).unwrap();
        assert_eq!(json["event"], "quantityChanged");
        assert_eq!(json["unitPrice"], 12_500_000);
        assert_eq!(json["lineTotal"], 37_500_000);
        assert_eq!(json["previous"], 1);
        assert_eq!(json["quantity"], 3);
        assert_eq!(
            changed.description(),
            "Automatic Seed Drill Machine quantity set to 3"
        );
    }

    #[test]
    fn test_notification_json() {
        let event = tractor_added(TransactionType::Rent);
        let json = serde_json::to_value(event.notification()).unwrap();
        assert_eq!(json["event"], "itemAdded");
        assert_eq!(json["productId"], "1");
        assert_eq!(json["type"], "rent");
        assert_eq!(json["unitPrice"], 85_000_000);
        assert_eq!(json["title"], "Rental Added");
    }
}
