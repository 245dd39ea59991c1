//! # Catalog
//!
//! The static, read-only list of products the storefront offers.
//!
//! A `Catalog` is built once at startup (from the builtin seed or a JSON
//! document) and never mutated afterwards. Construction validates every
//! entry and rejects duplicate ids, so lookups by id are unambiguous.
//!
//! ## Catalog File Format
//! ```text
//! [
//!   { "id": "1", "name": "Mahindra 575 DI Tractor",
//!     "buyPrice": 850000,          ◄── whole rupees
//!     "rentPrice": 2500,           ◄── whole rupees
//!     "description": "...", "image": "assets/tractor.jpg",
//!     "category": "machinery" }
//! ]
//! ```
//! Prices in the file are whole rupees, the same figures the storefront
//! shows. They become paise `Money` on load; fractional values are rejected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product};
use crate::validation::{validate_product, validate_rupee_price};

/// Number of products in a category, for the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// One product as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Whole rupees
    pub buy_price: i64,
    /// Whole rupees
    pub rent_price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: Category,
}

impl TryFrom<CatalogEntry> for Product {
    type Error = CoreError;

    fn try_from(entry: CatalogEntry) -> CoreResult<Self> {
        Ok(Product {
            buy_price: validate_rupee_price("buyPrice", entry.buy_price)?,
            rent_price: validate_rupee_price("rentPrice", entry.rent_price)?,
            id: entry.id,
            name: entry.name,
            description: entry.description,
            image: entry.image,
            category: entry.category,
        })
    }
}

/// Validated, immutable product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating each entry.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if an entry has a bad id, name or price
    /// - `CoreError::DuplicateProduct` if two entries share an id
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        for (i, product) in products.iter().enumerate() {
            validate_product(product)?;
            if products[..i].iter().any(|p| p.id == product.id) {
                return Err(CoreError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Catalog { products })
    }

    /// Parses a catalog file: a JSON array of `CatalogEntry` with prices in
    /// whole rupees.
    ///
    /// ## Errors
    /// - `CoreError::MalformedCatalog` for invalid JSON, unknown fields or
    ///   categories, and fractional prices
    /// - Everything `Catalog::new` rejects
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(json).map_err(|e| CoreError::MalformedCatalog(e.to_string()))?;
        let products = entries
            .into_iter()
            .map(Product::try_from)
            .collect::<CoreResult<Vec<_>>>()?;
        Catalog::new(products)
    }

    /// The six-product farm equipment catalog the storefront ships with.
    pub fn builtin() -> Self {
        Catalog {
            products: builtin_products(),
        }
    }

    /// All products, in definition order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, failing with `UnknownProduct`.
    pub fn resolve(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::UnknownProduct(id.to_string()))
    }

    /// Product count per category, every category listed (zero included).
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: self.iter().filter(|p| p.category == category).count(),
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

/// (id, name, buy, rent, description, image, category)
const SEED: &[(&str, &str, i64, i64, &str, &str, Category)] = &[
    (
        "1",
        "Mahindra 575 DI Tractor",
        850_000,
        2_500,
        "Fuel-efficient tractor, best for medium farms with advanced hydraulics",
        "assets/tractor.jpg",
        Category::Machinery,
    ),
    (
        "2",
        "Automatic Seed Drill Machine",
        125_000,
        800,
        "Precision seeding with adjustable depth control for optimal crop yield",
        "assets/seed-drill.jpg",
        Category::Machinery,
    ),
    (
        "3",
        "Fertilizer Spreader Pro",
        75_000,
        500,
        "Even distribution fertilizer spreader with GPS navigation system",
        "assets/fertilizer-spreader.jpg",
        Category::Machinery,
    ),
    (
        "4",
        "Organic Manure (50kg Bags)",
        2_500,
        50,
        "Premium organic manure for soil enrichment and crop nutrition",
        "assets/manure-bag.jpg",
        Category::Fertilizers,
    ),
    (
        "5",
        "High-Pressure Irrigation Pump",
        35_000,
        300,
        "Reliable water pump with self-priming technology for all farm sizes",
        "assets/irrigation-pump.jpg",
        Category::Machinery,
    ),
    (
        "6",
        "Professional Hand Tools Set",
        8_500,
        150,
        "Complete farming tool kit including hoe, spade, rake, and pruning shears",
        "assets/hand-tools.jpg",
        Category::Tools,
    ),
];

fn builtin_products() -> Vec<Product> {
    SEED.iter()
        .map(
            |&(id, name, buy, rent, description, image, category)| Product {
                id: id.to_string(),
                name: name.to_string(),
                buy_price: Money::from_rupees(buy),
                rent_price: Money::from_rupees(rent),
                description: description.to_string(),
                image: image.to_string(),
                category,
            },
        )
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
