//! # Storefront Session
//!
//! One shopper's session: the catalog, the grid selection, the cart,
//! favorites and the cart panel flag.
//!
//! ## Intent Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Session                                   │
//! │                                                                         │
//! │  Intent                     State touched          Event                │
//! │  ──────                     ─────────────          ─────                │
//! │  set_category / set_sort ─► selection              (none)               │
//! │  add_to_cart / buy / rent ► cart line +1           ItemAdded            │
//! │  remove_from_cart ────────► cart line removed      ItemRemoved          │
//! │  update_quantity(n > 0) ──► cart line = n          QuantityChanged      │
//! │  update_quantity(0) ──────► cart line removed      ItemRemoved          │
//! │  update_quantity(n < 0) ──► nothing                (error returned)     │
//! │  update_quantity(n > 999) ► nothing                (error returned)     │
//! │  clear_cart ──────────────► cart emptied           CartCleared          │
//! │  checkout ────────────────► panel closed           CheckoutRequested    │
//! │  toggle_favorite ─────────► favorites              FavoriteToggled      │
//! │                                                                         │
//! │  Unknown product ids on intents are logged and ignored.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The session is owned by the single bridge loop, so it is plain `&mut`
//! state with no locking.

use std::collections::BTreeSet;

use kashify_core::{
    Cart, CartLine, CartTotals, Catalog, CategoryFilter, CheckoutSummary, CoreResult, Listing,
    Product, ProductView, QuantityChange, SortKey, TransactionType, MAX_ITEM_QUANTITY,
};
use tracing::{debug, info, warn};

use crate::events::{EventSink, StoreEvent};
use crate::state::config::{ConfigResult, ConfigState};

/// The storefront session state.
pub struct Storefront {
    config: ConfigState,
    catalog: Catalog,
    cart: Cart,

    /// Category as requested, kept verbatim so unknown values stay selected
    category: String,
    sort: SortKey,

    favorites: BTreeSet<String>,
    cart_open: bool,

    outbox: Vec<StoreEvent>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Storefront {
    /// Creates a session with an empty cart and the configured defaults
    /// selected.
    pub fn new(config: ConfigState, catalog: Catalog) -> Self {
        let category = config.default_category.as_str().to_string();
        let sort = config.default_sort;
        Storefront {
            config,
            catalog,
            cart: Cart::new(),
            category,
            sort,
            favorites: BTreeSet::new(),
            cart_open: false,
            outbox: Vec::new(),
            sinks: Vec::new(),
        }
    }

    /// Creates a session, loading the catalog the config points at.
    pub fn from_config(config: ConfigState) -> ConfigResult<Self> {
        let catalog = config.load_catalog()?;
        info!(products = catalog.len(), "Catalog loaded");
        Ok(Storefront::new(config, catalog))
    }

    /// Registers a sink that sees every event as it is emitted.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Product Grid
    // =========================================================================

    /// The selected category value.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Listing for the current selection.
    pub fn current_listing(&self) -> Listing<'_> {
        self.listing(&self.category, self.sort)
    }

    /// Listing for an arbitrary selection. Does not change the session.
    ///
    /// A category value that names no category yields an empty listing.
    pub fn listing(&self, category: &str, sort: SortKey) -> Listing<'_> {
        match category.parse::<CategoryFilter>() {
            Ok(filter) => ProductView::new(&self.catalog).list(filter, sort),
            Err(_) => {
                debug!(category = %category, "Category matches no products");
                Listing::unmatched(sort)
            }
        }
    }

    /// Selects a category. Any string is accepted.
    pub fn set_category(&mut self, category: &str) -> Listing<'_> {
        self.category = category.to_string();
        self.current_listing()
    }

    /// Selects a sort key. Unknown keys sort by name.
    pub fn set_sort(&mut self, sort: &str) -> Listing<'_> {
        let key = SortKey::parse_or_default(Some(sort));
        if key.as_str() != sort {
            warn!(sort = %sort, "Unknown sort key, sorting by name");
        }
        self.sort = key;
        self.current_listing()
    }

    pub fn product(&self, product_id: &str) -> CoreResult<&Product> {
        self.catalog.resolve(product_id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a product under `kind`.
    ///
    /// Returns the affected line, or `None` when the product id is unknown
    /// (the intent is dropped and the cart is unchanged). A line already at
    /// `MAX_ITEM_QUANTITY` stays there and no event is emitted.
    pub fn add_to_cart(&mut self, product_id: &str, kind: TransactionType) -> Option<CartLine> {
        let Some(product) = self.catalog.get(product_id) else {
            warn!(product_id = %product_id, %kind, "Ignoring add for unknown product");
            return None;
        };

        let at_cap = self
            .cart
            .get(product_id, kind)
            .is_some_and(|line| line.quantity >= MAX_ITEM_QUANTITY);
        let line = self.cart.add_item(product, kind).clone();
        if at_cap {
            warn!(
                product_id = %product_id,
                %kind,
                max = MAX_ITEM_QUANTITY,
                "Cart line already at maximum quantity"
            );
            return Some(line);
        }
        debug!(
            product_id = %product_id,
            %kind,
            quantity = line.quantity,
            "Cart line added"
        );

        self.emit(StoreEvent::ItemAdded {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            kind,
            unit_price: line.unit_price(),
            quantity: line.quantity,
        });
        Some(line)
    }

    /// "Buy Now": adds a buy line.
    pub fn buy(&mut self, product_id: &str) -> Option<CartLine> {
        self.add_to_cart(product_id, TransactionType::Buy)
    }

    /// "Rent": adds a rent line.
    pub fn rent(&mut self, product_id: &str) -> Option<CartLine> {
        self.add_to_cart(product_id, TransactionType::Rent)
    }

    /// Removes a line. Absent keys are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &str, kind: TransactionType) -> Option<CartLine> {
        let removed = self.cart.remove_item(product_id, kind)?;
        self.emit(StoreEvent::item_removed(&removed));
        Some(removed)
    }

    /// Sets a line's quantity.
    ///
    /// ## Errors
    /// `CoreError::InvalidQuantity` for negative quantities and quantities
    /// above `MAX_ITEM_QUANTITY`; the cart is left unchanged.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        kind: TransactionType,
        quantity: i64,
    ) -> CoreResult<QuantityChange> {
        let change = self.cart.update_quantity(product_id, kind, quantity)?;

        match &change {
            QuantityChange::Updated { line, previous } => {
                self.emit(StoreEvent::QuantityChanged {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    kind,
                    unit_price: line.unit_price(),
                    previous: *previous,
                    quantity: line.quantity,
                    line_total: line.line_total(),
                });
            }
            QuantityChange::Removed(line) => {
                self.emit(StoreEvent::item_removed(line));
            }
            QuantityChange::NotInCart => {
                debug!(product_id = %product_id, %kind, "Quantity update for line not in cart");
            }
        }

        Ok(change)
    }

    /// Empties the cart. Returns the number of lines removed.
    pub fn clear_cart(&mut self) -> usize {
        let removed = self.cart.clear();
        self.emit(StoreEvent::CartCleared {
            lines_removed: removed,
        });
        removed
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    // =========================================================================
    // Cart Panel & Checkout
    // =========================================================================

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Records a checkout request and closes the cart panel.
    ///
    /// The cart keeps its lines; order placement happens elsewhere.
    pub fn checkout(&mut self) -> CheckoutSummary {
        let summary = self.cart.checkout_summary();
        info!(
            checkout_id = %summary.id,
            lines = summary.totals.line_count,
            total = %summary.totals.total_price,
            "Checkout requested"
        );

        self.cart_open = false;
        self.emit(StoreEvent::CheckoutRequested {
            checkout_id: summary.id.to_string(),
            line_count: summary.totals.line_count,
            total_item_count: summary.totals.total_item_count,
            total_price: summary.totals.total_price,
        });
        summary
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    pub fn is_favorite(&self, product_id: &str) -> bool {
        self.favorites.contains(product_id)
    }

    /// Favorite product ids, sorted.
    pub fn favorites(&self) -> impl Iterator<Item = &str> + '_ {
        self.favorites.iter().map(String::as_str)
    }

    /// Flips the favorite flag. Returns the new state, or `None` for an
    /// unknown product.
    pub fn toggle_favorite(&mut self, product_id: &str) -> Option<bool> {
        let Some(product) = self.catalog.get(product_id) else {
            warn!(product_id = %product_id, "Ignoring favorite for unknown product");
            return None;
        };
        let name = product.name.clone();

        let is_favorite = if self.favorites.remove(product_id) {
            false
        } else {
            self.favorites.insert(product_id.to_string());
            true
        };

        self.emit(StoreEvent::FavoriteToggled {
            product_id: product_id.to_string(),
            name,
            is_favorite,
        });
        Some(is_favorite)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Drains events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn emit(&mut self, event: StoreEvent) {
        for sink in &mut self.sinks {
            sink.publish(&event);
        }
        self.outbox.push(event);
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Storefront::new(ConfigState::default(), Catalog::builtin())
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("store_name", &self.config.store_name)
            .field("products", &self.catalog.len())
            .field("cart_lines", &self.cart.line_count())
            .field("category", &self.category)
            .field("sort", &self.sort)
            .field("cart_open", &self.cart_open)
            .field("pending_events", &self.outbox.len())
            .finish()
    }
}
