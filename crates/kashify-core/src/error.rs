//! # Error Types
//!
//! Domain-specific error types for kashify-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kashify-core errors (this file)                                        │
//! │  ├── CoreError        - Catalog / cart rule violations                  │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront errors (app crate)                                          │
//! │  ├── ConfigError      - Config file / env problems                      │
//! │  └── ApiError         - What the UI sees (serialized)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable: the failed mutation is rejected and the
//! prior cart state is left untouched.

use thiserror::Error;

use crate::types::TransactionType;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not present in the catalog.
    ///
    /// ## When This Occurs
    /// - The UI sends a buy/rent/add intent for an id it made up
    ///
    /// The session skips the intent instead of surfacing this to the shopper.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// A quantity update asked for a negative quantity or one above
    /// `MAX_ITEM_QUANTITY`.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart panel: "-" button
    ///      │
    ///      ▼
    /// UI clamps at 1 ──► update_quantity(id, type, 1)   ✅
    ///
    /// Buggy UI skips clamp ──► update_quantity(id, type, -1)
    ///      │
    ///      ▼
    /// InvalidQuantity { product_id: "1", kind: Buy, requested: -1 }
    /// ```
    #[error("Invalid quantity {requested} for {kind} line of product {product_id}")]
    InvalidQuantity {
        product_id: String,
        kind: TransactionType,
        requested: i64,
    },

    /// Category string does not name a known category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Two catalog entries share the same id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Catalog document could not be parsed.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., whitespace inside an id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
