//! # Cart Model
//!
//! Owns the shopper's cart lines and derives totals from them.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A line is keyed by (product id, transaction type):                     │
//! │                                                                         │
//! │    add(tractor, buy)   ──► [ (1, buy)  × 1 ]                            │
//! │    add(tractor, buy)   ──► [ (1, buy)  × 2 ]                  in place  │
//! │    add(tractor, rent)  ──► [ (1, buy)  × 2, (1, rent) × 1 ]   appended  │
//! │    update(1, buy, 0)   ──► [ (1, rent) × 1 ]                  removed   │
//! │                                                                         │
//! │  Invariants                                                             │
//! │  • no two lines share a key                                             │
//! │  • every line has 1 ≤ quantity ≤ MAX_ITEM_QUANTITY (999)                │
//! │  • lines keep the position of their first add                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are computed from the lines on every call and never cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, TransactionType};
use crate::validation::validate_quantity;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Line Key
// =============================================================================

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl LineKey {
    pub fn new(product_id: impl Into<String>, kind: TransactionType) -> Self {
        LineKey {
            product_id: product_id.into(),
            kind,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One (product, transaction type) entry in the cart.
///
/// ## Snapshot Semantics
/// Name, prices and image are copied from the product when the line is
/// first added. Later catalog changes do not reach existing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Buy price at time of adding (frozen)
    pub buy_price: Money,

    /// Rent price at time of adding (frozen)
    pub rent_price: Money,

    pub image: String,

    /// Between 1 and `MAX_ITEM_QUANTITY` while the line exists
    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a quantity-1 line from a product.
    pub fn from_product(product: &Product, kind: TransactionType) -> Self {
        CartLine {
            product_id: product.id.clone(),
            kind,
            name: product.name.clone(),
            buy_price: product.buy_price,
            rent_price: product.rent_price,
            image: product.image.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.kind)
    }

    #[inline]
    fn is(&self, product_id: &str, kind: TransactionType) -> bool {
        self.kind == kind && self.product_id == product_id
    }

    /// Buy price for buy lines, rent price for rent lines.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.kind.unit_price(self.buy_price, self.rent_price)
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quantity Change
// =============================================================================

/// Outcome of `Cart::update_quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// Quantity was set; `previous` may equal `current`.
    Updated {
        line: CartLine,
        previous: i64,
    },
    /// Quantity 0 was requested and the line is gone.
    Removed(CartLine),
    /// No line has that key; nothing happened.
    NotInCart,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: insertion-ordered lines, unique by `LineKey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created/last cleared
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a product under the given transaction type.
    ///
    /// ## Behavior
    /// - Line with key `(product.id, kind)` exists: quantity + 1, position kept
    /// - Line already at `MAX_ITEM_QUANTITY`: left as is
    /// - Otherwise: new quantity-1 line appended with a product snapshot
    ///
    /// Returns the affected line.
    pub fn add_item(&mut self, product: &Product, kind: TransactionType) -> &CartLine {
        let index = match self.position(&product.id, kind) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = (line.quantity + 1).min(MAX_ITEM_QUANTITY);
                index
            }
            None => {
                self.lines.push(CartLine::from_product(product, kind));
                self.lines.len() - 1
            }
        };
        &self.lines[index]
    }

    /// Removes the line for a key. Absent keys are a no-op.
    ///
    /// Returns the removed line, if there was one.
    pub fn remove_item(&mut self, product_id: &str, kind: TransactionType) -> Option<CartLine> {
        self.position(product_id, kind)
            .map(|index| self.lines.remove(index))
    }

    /// Sets a line's quantity to an absolute value.
    ///
    /// ## Behavior
    /// - `quantity < 0` or above `MAX_ITEM_QUANTITY`: rejected with
    ///   `InvalidQuantity`, cart unchanged
    /// - `quantity == 0`: same as `remove_item`
    /// - `quantity > 0`: line quantity becomes exactly `quantity`
    /// - Absent key: `NotInCart`, nothing is created
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        kind: TransactionType,
        quantity: i64,
    ) -> CoreResult<QuantityChange> {
        validate_quantity(quantity).map_err(|_| CoreError::InvalidQuantity {
            product_id: product_id.to_string(),
            kind,
            requested: quantity,
        })?;

        if quantity == 0 {
            return Ok(self
                .remove_item(product_id, kind)
                .map_or(QuantityChange::NotInCart, QuantityChange::Removed));
        }

        match self.lines.iter_mut().find(|l| l.is(product_id, kind)) {
            Some(line) => {
                let previous = line.quantity;
                line.quantity = quantity;
                Ok(QuantityChange::Updated {
                    line: line.clone(),
                    previous,
                })
            }
            None => Ok(QuantityChange::NotInCart),
        }
    }

    /// Clears all lines. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        self.created_at = Utc::now();
        removed
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: &str, kind: TransactionType) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.is(product_id, kind))
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Σ quantity (the header badge).
    pub fn total_item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ quantity × applicable unit price.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ line totals for one transaction type.
    pub fn subtotal(&self, kind: TransactionType) -> Money {
        self.lines
            .iter()
            .filter(|l| l.kind == kind)
            .map(CartLine::line_total)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Live totals for the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    /// Read-only summary handed to the order system.
    ///
    /// Does not clear or otherwise touch the cart.
    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary {
            id: Uuid::new_v4(),
            requested_at: Utc::now(),
            lines: self.lines.clone(),
            totals: self.totals(),
        }
    }

    fn position(&self, product_id: &str, kind: TransactionType) -> Option<usize> {
        self.lines.iter().position(|l| l.is(product_id, kind))
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_item_count: i64,
    pub buy_subtotal: Money,
    pub rent_subtotal: Money,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_item_count: cart.total_item_count(),
            buy_subtotal: cart.subtotal(TransactionType::Buy),
            rent_subtotal: cart.subtotal(TransactionType::Rent),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// Snapshot of the cart at the moment checkout was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    #[ts(as = "String")]
    pub id: Uuid,
    #[ts(as = "String")]
    pub requested_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::Category;

    fn test_product(id: &str, buy: i64, rent: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            buy_price: Money::from_rupees(buy),
            rent_price: Money::from_rupees(rent),
            description: String::new(),
            image: format!("assets/{}.jpg", id),
            category: Category::Others,
        }
    }

    #[test]
    fn test_tractor_buy_and_rent_scenario() {
        let catalog = Catalog::builtin();
        let tractor = catalog.resolve("1").unwrap();
        let mut cart = Cart::new();

        cart.add_item(tractor, TransactionType::Buy);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(cart.total_price(), Money::from_rupees(850_000));

        let line = cart.add_item(tractor, TransactionType::Buy);
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_price(), Money::from_rupees(1_700_000));

        cart.add_item(tractor, TransactionType::Rent);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.subtotal(TransactionType::Rent), Money::from_rupees(2_500));
        assert_eq!(cart.total_price(), Money::from_rupees(1_702_500));

        let change = cart.update_quantity("1", TransactionType::Buy, 0).unwrap();
        assert!(matches!(change, QuantityChange::Removed(ref l) if l.quantity == 2));
        assert!(cart.get("1", TransactionType::Buy).is_none());

        let totals = cart.totals();
        assert_eq!(totals.total_price, Money::from_rupees(2_500));
        assert_eq!(totals.total_item_count, 1);
        assert_eq!(totals.line_count, 1);
    }

    #[test]
    fn test_buy_and_rent_are_independent_lines() {
        let product = test_product("4", 2_500, 50);
        let mut cart = Cart::new();

        cart.add_item(&product, TransactionType::Rent);
        cart.add_item(&product, TransactionType::Buy);

        let rent = cart.get("4", TransactionType::Rent).unwrap();
        let buy = cart.get("4", TransactionType::Buy).unwrap();
        assert_eq!(rent.quantity, 1);
        assert_eq!(buy.quantity, 1);
        // First add decides position
        assert_eq!(cart.lines()[0].kind, TransactionType::Rent);
        assert_eq!(cart.lines()[1].kind, TransactionType::Buy);
    }

    #[test]
    fn test_repeat_add_keeps_position() {
        let a = test_product("a", 10, 1);
        let b = test_product("b", 20, 2);
        let mut cart = Cart::new();

        cart.add_item(&a, TransactionType::Buy);
        cart.add_item(&b, TransactionType::Buy);
        cart.add_item(&a, TransactionType::Buy);

        let keys: Vec<LineKey> = cart.lines().iter().map(CartLine::key).collect();
        assert_eq!(
            keys,
            vec![
                LineKey::new("a", TransactionType::Buy),
                LineKey::new("b", TransactionType::Buy),
            ]
        );
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_totals_match_line_sums() {
        let products = [
            test_product("a", 850_000, 2_500),
            test_product("b", 8_500, 150),
            test_product("c", 0, 0),
        ];
        let kinds = [TransactionType::Buy, TransactionType::Rent];
        let mut cart = Cart::new();

        for step in 0..25usize {
            let product = &products[step % products.len()];
            let kind = kinds[step % 2];
            cart.add_item(product, kind);

            let totals = cart.totals();
            let expected_count: i64 = cart.lines().iter().map(|l| l.quantity).sum();
            let expected_price: Money = cart
                .lines()
                .iter()
                .map(|l| match l.kind {
                    TransactionType::Buy => l.buy_price * l.quantity,
                    TransactionType::Rent => l.rent_price * l.quantity,
                })
                .sum();
            assert_eq!(totals.total_item_count, expected_count);
            assert_eq!(totals.total_item_count, step as i64 + 1);
            assert_eq!(totals.total_price, expected_price);
            assert_eq!(totals.buy_subtotal + totals.rent_subtotal, totals.total_price);
        }
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let product = test_product("6", 8_500, 150);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Buy);

        let change = cart.update_quantity("6", TransactionType::Buy, 5).unwrap();
        assert!(matches!(
            change,
            QuantityChange::Updated { ref line, previous: 1 } if line.quantity == 5
        ));
        cart.update_quantity("6", TransactionType::Buy, 3).unwrap();
        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price(), Money::from_rupees(25_500));
    }

    #[test]
    fn test_negative_quantity_rejected_and_state_kept() {
        let product = test_product("6", 8_500, 150);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Rent);
        let before = cart.clone();

        let err = cart
            .update_quantity("6", TransactionType::Rent, -1)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidQuantity { requested: -1, kind: TransactionType::Rent, .. }
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_quantity_above_cap_rejected_and_totals_safe() {
        let catalog = Catalog::builtin();
        let tractor = catalog.resolve("1").unwrap();
        let mut cart = Cart::new();
        cart.add_item(tractor, TransactionType::Buy);
        let before = cart.clone();

        let err = cart
            .update_quantity("1", TransactionType::Buy, 1_000_000_000_000)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidQuantity { requested: 1_000_000_000_000, .. }
        ));
        assert!(cart
            .update_quantity("1", TransactionType::Buy, MAX_ITEM_QUANTITY + 1)
            .is_err());
        assert_eq!(cart, before);
        assert_eq!(cart.totals().total_price, Money::from_rupees(850_000));

        cart.update_quantity("1", TransactionType::Buy, MAX_ITEM_QUANTITY)
            .unwrap();
        assert_eq!(
            cart.totals().total_price,
            Money::from_rupees(850_000 * MAX_ITEM_QUANTITY)
        );
    }

    #[test]
    fn test_add_item_stops_at_cap() {
        let product = test_product("4", 2_500, 50);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Rent);
        cart.update_quantity("4", TransactionType::Rent, MAX_ITEM_QUANTITY)
            .unwrap();

        let line = cart.add_item(&product, TransactionType::Rent);
        assert_eq!(line.quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.total_item_count(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_update_missing_line_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.update_quantity("1", TransactionType::Buy, 4).unwrap(),
            QuantityChange::NotInCart
        );
        assert_eq!(
            cart.update_quantity("1", TransactionType::Buy, 0).unwrap(),
            QuantityChange::NotInCart
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let product = test_product("2", 125_000, 800);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Buy);
        cart.add_item(&product, TransactionType::Rent);

        assert!(cart.remove_item("2", TransactionType::Buy).is_some());
        assert!(cart.remove_item("2", TransactionType::Buy).is_none());
        assert_eq!(cart.line_count(), 1);
        assert!(cart.get("2", TransactionType::Rent).is_some());
    }

    #[test]
    fn test_lines_are_snapshots() {
        let mut product = test_product("3", 75_000, 500);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Buy);

        product.buy_price = Money::from_rupees(1);
        product.name = "Renamed".to_string();
        cart.add_item(&product, TransactionType::Buy);

        let line = cart.get("3", TransactionType::Buy).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.name, "Product 3");
        assert_eq!(line.buy_price, Money::from_rupees(75_000));
    }

    #[test]
    fn test_checkout_summary_does_not_mutate() {
        let product = test_product("5", 35_000, 300);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Buy);
        cart.add_item(&product, TransactionType::Rent);
        let before = cart.clone();

        let summary = cart.checkout_summary();
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.totals.total_price, Money::from_rupees(35_300));
        assert_eq!(cart, before);

        let again = cart.checkout_summary();
        assert_ne!(summary.id, again.id);
    }

    #[test]
    fn test_clear() {
        let product = test_product("1", 1, 1);
        let mut cart = Cart::new();
        cart.add_item(&product, TransactionType::Buy);
        cart.add_item(&product, TransactionType::Rent);

        assert_eq!(cart.clear(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.totals().total_price, Money::zero());
    }

    #[test]
    fn test_line_serializes_with_type_field() {
        let product = test_product("1", 10, 1);
        let line = CartLine::from_product(&product, TransactionType::Rent);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["type"], "rent");
        assert_eq!(value["productId"], "1");
        assert_eq!(value["quantity"], 1);
    }
}
