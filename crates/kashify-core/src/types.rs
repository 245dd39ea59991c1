//! # Domain Types
//!
//! Core domain types used throughout Kashify.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │ TransactionType │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Machinery      │   │  Buy            │       │
//! │  │  name           │   │  Fertilizers    │   │  Rent           │       │
//! │  │  buy_price      │   │  Seeds          │   └─────────────────┘       │
//! │  │  rent_price     │   │  Tools          │                             │
//! │  │  category       │   │  Others         │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire spellings match what the web UI sends: `"machinery"`, `"buy"`, ...

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product classification used by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Machinery,
    Fertilizers,
    Seeds,
    Tools,
    Others,
}

impl Category {
    /// Every category, in filter-bar order.
    pub const ALL: [Category; 5] = [
        Category::Machinery,
        Category::Fertilizers,
        Category::Seeds,
        Category::Tools,
        Category::Others,
    ];

    /// Wire value (`"machinery"`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Machinery => "machinery",
            Category::Fertilizers => "fertilizers",
            Category::Seeds => "seeds",
            Category::Tools => "tools",
            Category::Others => "others",
        }
    }

    /// Human label shown in the filter dropdown.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Machinery => "Machinery",
            Category::Fertilizers => "Fertilizers",
            Category::Seeds => "Seeds",
            Category::Tools => "Tools",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: `"Machinery"` is not a category, `"machinery"` is.
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// Transaction Type
// =============================================================================

/// Whether a cart line is a purchase or a rental.
///
/// Decides which of the product's two prices applies to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Buy,
    Rent,
}

impl TransactionType {
    /// Picks the applicable price.
    #[inline]
    pub const fn unit_price(&self, buy_price: Money, rent_price: Money) -> Money {
        match self {
            TransactionType::Buy => buy_price,
            TransactionType::Rent => rent_price,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Rent => "rent",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(TransactionType::Buy),
            "rent" => Ok(TransactionType::Rent),
            _ => Err(ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: vec!["buy".to_string(), "rent".to_string()],
            }
            .into()),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that can be bought or rented.
///
/// Products are defined once when the catalog is built and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier (e.g. `"1"`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Purchase price.
    pub buy_price: Money,

    /// Rental price.
    pub rent_price: Money,

    /// Marketing copy shown on the product card.
    pub description: String,

    /// Image asset reference, resolved by the UI.
    pub image: String,

    pub category: Category,
}

impl Product {
    /// Price that applies to a line of the given transaction type.
    #[inline]
    pub fn unit_price(&self, kind: TransactionType) -> Money {
        kind.unit_price(self.buy_price, self.rent_price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
