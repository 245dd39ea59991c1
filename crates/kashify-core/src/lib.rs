//! # kashify-core: Pure Storefront Logic for Kashify
//!
//! This crate holds the catalog, the product grid derivation and the cart
//! model as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kashify Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web UI (excluded)                            │   │
//! │  │   Filter Bar ──► Product Grid ──► Cart Panel ──► Toasts         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kashify-storefront (session)                    │   │
//! │  │   list_products, add_to_cart, update_cart_item, checkout ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kashify-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   view    │  │   cart    │  │   money   │  │   │
//! │  │   │  Product  │  │  filter   │  │ CartLine  │  │   Money   │  │   │
//! │  │   │  seed     │  │  sort     │  │  totals   │  │  display  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING SINKS • DETERMINISTIC                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Category, TransactionType
//! - [`catalog`] - Validated product list and builtin seed
//! - [`view`] - Category filter + sort key derivation
//! - [`cart`] - Cart lines keyed by (product, transaction type), totals
//! - [`money`] - Integer paise money type
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kashify_core::{Cart, Catalog, CategoryFilter, Money, ProductView, SortKey, TransactionType};
//!
//! let catalog = Catalog::builtin();
//! let listing = ProductView::new(&catalog).list(CategoryFilter::All, SortKey::PriceLow);
//! assert_eq!(listing.len(), 6);
//!
//! let mut cart = Cart::new();
//! let tractor = catalog.resolve("1").unwrap();
//! cart.add_item(tractor, TransactionType::Buy);
//! cart.add_item(tractor, TransactionType::Rent);
//! assert_eq!(cart.totals().total_price, Money::from_rupees(852_500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals, CheckoutSummary, LineKey, QuantityChange};
pub use catalog::{Catalog, CatalogEntry, CategoryCount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use view::{filter_and_sort, filter_options, CategoryFilter, FilterOptions, Listing, ProductView, SortKey};

// =============================================================================
// Business Constants
// =============================================================================

/// Maximum quantity of a single cart line.
///
/// `add_item` stops here and `update_quantity` rejects anything above it.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest catalog price, in whole rupees.
///
/// With `MAX_ITEM_QUANTITY` this bounds line and cart totals to fit `i64`
/// paise.
pub const MAX_PRICE_RUPEES: i64 = 10_000_000_000;
