//! # Product View
//!
//! Derives the filtered, sorted product grid from the catalog.
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog (6 products)                                                   │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  CategoryFilter ── All ──────────────► keep everything                  │
//! │      │                                                                  │
//! │      └──────────── Only(machinery) ──► keep exact category matches      │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  SortKey (stable sort)                                                  │
//! │      ├── name        A-Z, case-insensitive                              │
//! │      ├── price-low   buy price ascending                                │
//! │      ├── price-high  buy price descending                               │
//! │      └── popularity  buy price descending (price stands in for          │
//! │                      popularity; there is no popularity signal)         │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Listing (possibly empty → UI shows "No products found")                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every call recomputes from scratch; the catalog is never reordered.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, ValidationError};
use crate::types::{Category, Product};

// =============================================================================
// Category Filter
// =============================================================================

/// Which categories the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Wire value: `"all"` or the category's value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Exact match against the product's category.
    #[inline]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Ordering applied to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    /// Uses buy price descending as a stand-in for popularity.
    Popularity,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Popularity,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Popularity => "popularity",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name A-Z",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Popularity => "Popularity",
        }
    }

    /// Lenient parse: unknown or missing keys sort by name.
    pub fn parse_or_default(s: Option<&str>) -> SortKey {
        s.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    /// Comparator for this key.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::PriceLow => a.buy_price.cmp(&b.buy_price),
            SortKey::PriceHigh | SortKey::Popularity => b.buy_price.cmp(&a.buy_price),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                ValidationError::NotAllowed {
                    field: "sort".to_string(),
                    allowed: SortKey::ALL.iter().map(|k| k.as_str().to_string()).collect(),
                }
                .into()
            })
    }
}

/// Case-insensitive name order; on a tie lowercase sorts first.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

// =============================================================================
// Filter Options
// =============================================================================

/// One entry in a filter-bar dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Contents of both filter-bar dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<FilterOption>,
    pub sort_options: Vec<FilterOption>,
}

/// "All Categories" followed by every category, then every sort key.
pub fn filter_options() -> FilterOptions {
    let categories = std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        .map(|f| FilterOption {
            value: f.as_str(),
            label: f.label(),
        })
        .collect();
    let sort_options = SortKey::ALL
        .into_iter()
        .map(|k| FilterOption {
            value: k.as_str(),
            label: k.label(),
        })
        .collect();
    FilterOptions {
        categories,
        sort_options,
    }
}

// =============================================================================
// Product View
// =============================================================================

/// Filters then sorts the catalog. Pure; the catalog is untouched.
pub fn filter_and_sort(catalog: &Catalog, filter: CategoryFilter, sort: SortKey) -> Vec<&Product> {
    let mut products: Vec<&Product> = catalog.iter().filter(|p| filter.matches(p)).collect();
    // sort_by is stable: equal keys keep catalog order
    products.sort_by(|a, b| sort.compare(a, b));
    products
}

/// Read-only projection over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct ProductView<'a> {
    catalog: &'a Catalog,
}

impl<'a> ProductView<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        ProductView { catalog }
    }

    /// Computes the listing for a filter/sort pair.
    pub fn list(&self, filter: CategoryFilter, sort: SortKey) -> Listing<'a> {
        Listing {
            filter: Some(filter),
            sort,
            products: filter_and_sort(self.catalog, filter, sort),
        }
    }
}

/// Result of a filter/sort pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<'a> {
    /// `None` when the requested category is not a known category.
    pub filter: Option<CategoryFilter>,
    pub sort: SortKey,
    pub products: Vec<&'a Product>,
}

impl<'a> Listing<'a> {
    /// Listing for a category value that names no category: exact
    /// matching finds nothing.
    pub fn unmatched(sort: SortKey) -> Self {
        Listing {
            filter: None,
            sort,
            products: Vec::new(),
        }
    }

    /// True when the UI should render its empty state.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.products.iter().copied()
    }

    pub fn ids(&self) -> Vec<&'a str> {
        self.products.iter().map(|p| p.id.as_str()).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, name: &str, buy: i64, category: Category) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            buy_price: Money::from_rupees(buy),
            rent_price: Money::from_rupees(buy / 100),
            description: String::new(),
            image: String::new(),
            category,
        }
    }

    #[test]
    fn test_machinery_price_low() {
        let catalog = Catalog::builtin();
        let listing = ProductView::new(&catalog).list(
            CategoryFilter::Only(Category::Machinery),
            SortKey::PriceLow,
        );
        assert_eq!(listing.ids(), vec!["5", "3", "2", "1"]);
        assert!(listing.iter().all(|p| p.category == Category::Machinery));
    }

    #[test]
    fn test_all_by_name() {
        let catalog = Catalog::builtin();
        let listing = ProductView::new(&catalog).list(CategoryFilter::All, SortKey::Name);
        let names: Vec<&str> = listing.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Automatic Seed Drill Machine",
                "Fertilizer Spreader Pro",
                "High-Pressure Irrigation Pump",
                "Mahindra 575 DI Tractor",
                "Organic Manure (50kg Bags)",
                "Professional Hand Tools Set",
            ]
        );
    }

    #[test]
    fn test_price_high_and_popularity_agree() {
        let catalog = Catalog::builtin();
        let view = ProductView::new(&catalog);
        let high = view.list(CategoryFilter::All, SortKey::PriceHigh);
        let popular = view.list(CategoryFilter::All, SortKey::Popularity);
        assert_eq!(high.ids(), vec!["1", "2", "3", "5", "6", "4"]);
        assert_eq!(high.products, popular.products);
    }

    #[test]
    fn test_empty_category_is_not_an_error() {
        let catalog = Catalog::builtin();
        let listing = ProductView::new(&catalog).list(
            CategoryFilter::Only(Category::Seeds),
            SortKey::Name,
        );
        assert!(listing.is_empty());
        assert_eq!(listing.len(), 0);

        let unmatched = Listing::unmatched(SortKey::Name);
        assert!(unmatched.is_empty());
        assert_eq!(unmatched.filter, None);
    }

    #[test]
    fn test_filter_and_sort_is_idempotent() {
        let catalog = Catalog::builtin();
        for filter in std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
        {
            for sort in SortKey::ALL {
                let first = filter_and_sort(&catalog, filter, sort);
                let second = filter_and_sort(&catalog, filter, sort);
                assert_eq!(first, second);
                assert!(first.iter().all(|p| filter.matches(p)));
                assert!(first
                    .windows(2)
                    .all(|w| sort.compare(w[0], w[1]) != Ordering::Greater));
            }
        }
        // Catalog order untouched
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let catalog = Catalog::new(vec![
            product("a", "Zeta Hoe", 100, Category::Tools),
            product("b", "Alpha Rake", 100, Category::Tools),
            product("c", "Mid Spade", 50, Category::Tools),
        ])
        .unwrap();
        let low = filter_and_sort(&catalog, CategoryFilter::All, SortKey::PriceLow);
        let ids: Vec<&str> = low.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let high = filter_and_sort(&catalog, CategoryFilter::All, SortKey::PriceHigh);
        let ids: Vec<&str> = high.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let catalog = Catalog::new(vec![
            product("1", "banana Seeds", 1, Category::Seeds),
            product("2", "Apple Seeds", 1, Category::Seeds),
            product("3", "apple seeds", 1, Category::Seeds),
        ])
        .unwrap();
        let sorted = filter_and_sort(&catalog, CategoryFilter::All, SortKey::Name);
        let ids: Vec<&str> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert!("cheapest".parse::<SortKey>().is_err());
        assert_eq!(SortKey::parse_or_default(Some("cheapest")), SortKey::Name);
        assert_eq!(SortKey::parse_or_default(None), SortKey::Name);
        assert_eq!(
            SortKey::parse_or_default(Some("popularity")),
            SortKey::Popularity
        );
    }

    #[test]
    fn test_category_filter_wire_format() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "tools".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Tools)
        );
        assert!("All".parse::<CategoryFilter>().is_err());

        let json = serde_json::to_string(&CategoryFilter::Only(Category::Seeds)).unwrap();
        assert_eq!(json, "\"seeds\"");
        let back: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, CategoryFilter::All);
    }

    #[test]
    fn test_filter_options() {
        let options = filter_options();
        assert_eq!(options.categories.len(), 6);
        assert_eq!(options.categories[0].value, "all");
        assert_eq!(options.categories[0].label, "All Categories");
        assert_eq!(options.sort_options[1].label, "Price: Low to High");
    }
}
