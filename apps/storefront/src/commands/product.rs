//! # Product Commands
//!
//! Commands for the product grid and filter bar.
//!
//! ## Grid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Grid Flow                                    │
//! │                                                                         │
//! │  Shopper picks "Machinery" + "Price: Low to High"                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {"cmd":"set_category","category":"machinery"}                          │
//! │  {"cmd":"set_sort","sort":"price-low"}                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storefront::current_listing ── filter (exact) ── sort (stable)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductListResponse { products: [5, 3, 2, 1], isEmpty: false }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kashify_core::{
    filter_options as catalog_filter_options, Category, CategoryCount, FilterOptions, Listing,
    Money, Product, SortKey,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::Storefront;

/// Product card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub buy_price: Money,
    pub rent_price: Money,
    /// Buy price formatted for the card, e.g. "₹850,000"
    pub buy_price_display: String,
    /// Rent price formatted for the card, e.g. "₹2,500"
    pub rent_price_display: String,
    pub is_favorite: bool,
}

impl ProductDto {
    pub fn new(product: &Product, store: &Storefront) -> Self {
        let config = store.config();
        ProductDto {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category,
            buy_price: product.buy_price,
            rent_price: product.rent_price,
            buy_price_display: config.format_currency(product.buy_price),
            rent_price_display: config.format_currency(product.rent_price),
            is_favorite: store.is_favorite(&product.id),
        }
    }
}

/// The product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// Category value the listing was computed for
    pub category: String,
    pub sort: SortKey,
    pub products: Vec<ProductDto>,
    /// True when the grid should show "No products found"
    pub is_empty: bool,
}

impl ProductListResponse {
    fn new(store: &Storefront, category: &str, listing: &Listing<'_>) -> Self {
        ProductListResponse {
            category: category.to_string(),
            sort: listing.sort,
            products: listing.iter().map(|p| ProductDto::new(p, store)).collect(),
            is_empty: listing.is_empty(),
        }
    }
}

/// Filter bar contents plus the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    #[serde(flatten)]
    pub options: FilterOptions,
    pub counts: Vec<CategoryCount>,
    pub selected_category: String,
    pub selected_sort: SortKey,
}

/// Favorite toggle result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub product_id: String,
    pub is_favorite: bool,
    pub favorites: Vec<String>,
}

/// Lists products without changing the selection.
///
/// ## Arguments
/// * `category` - Category value (default: current selection)
/// * `sort` - Sort key (default: current selection; unknown keys sort by name)
pub fn list_products(
    store: &Storefront,
    category: Option<String>,
    sort: Option<String>,
) -> ProductListResponse {
    debug!(?category, ?sort, "list_products command");

    let category = category.unwrap_or_else(|| store.category().to_string());
    let sort = match sort {
        Some(sort) => SortKey::parse_or_default(Some(&sort)),
        None => store.sort(),
    };

    let listing = store.listing(&category, sort);
    ProductListResponse::new(store, &category, &listing)
}

/// Selects a category and returns the new grid.
pub fn set_category(store: &mut Storefront, category: String) -> ProductListResponse {
    debug!(category = %category, "set_category command");
    store.set_category(&category);
    current(store)
}

/// Selects a sort key and returns the new grid.
pub fn set_sort(store: &mut Storefront, sort: String) -> ProductListResponse {
    debug!(sort = %sort, "set_sort command");
    store.set_sort(&sort);
    current(store)
}

/// Gets one product by id.
///
/// ## Errors
/// `NOT_FOUND` when the id is not in the catalog.
pub fn get_product(store: &Storefront, product_id: String) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    let product = store.product(&product_id)?;
    Ok(ProductDto::new(product, store))
}

/// Gets the filter bar options.
pub fn filter_options(store: &Storefront) -> FilterOptionsResponse {
    debug!("filter_options command");
    FilterOptionsResponse {
        options: catalog_filter_options(),
        counts: store.catalog().category_counts(),
        selected_category: store.category().to_string(),
        selected_sort: store.sort(),
    }
}

/// Flips a product's favorite flag. Unknown ids leave favorites unchanged.
pub fn toggle_favorite(store: &mut Storefront, product_id: String) -> FavoriteResponse {
    debug!(product_id = %product_id, "toggle_favorite command");
    let is_favorite = store.toggle_favorite(&product_id).unwrap_or(false);
    FavoriteResponse {
        product_id,
        is_favorite,
        favorites: store.favorites().map(str::to_string).collect(),
    }
}

fn current(store: &Storefront) -> ProductListResponse {
    let listing = store.current_listing();
    ProductListResponse::new(store, store.category(), &listing)
}
