//! # Validation Module
//!
//! Input validation utilities for Kashify.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web UI                                                        │
//! │  ├── Clamps decrement at 1                                              │
//! │  └── Only offers known categories / sort keys                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront bridge                                             │
//! │  └── Type validation (deserialization)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  ├── Catalog entries (id, name, prices)                                 │
//! │  └── Cart quantities                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kashify_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Mahindra 575 DI Tractor").is_ok());
//! assert!(validate_quantity(0).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! assert!(validate_quantity(1_000).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_RUPEES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ID_LEN: usize = 64;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - No whitespace (ids travel through the UI as attribute values)
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Zero is allowed, negative is not
/// - At most `MAX_PRICE_RUPEES`
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > Money::from_rupees(MAX_PRICE_RUPEES) {
        return Err(price_out_of_range(field));
    }

    Ok(())
}

/// Converts a whole-rupee amount from a catalog file into `Money`.
///
/// Range-checked before scaling, so no input can overflow.
pub fn validate_rupee_price(field: &str, rupees: i64) -> ValidationResult<Money> {
    if !(0..=MAX_PRICE_RUPEES).contains(&rupees) {
        return Err(price_out_of_range(field));
    }

    Ok(Money::from_rupees(rupees))
}

fn price_out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_PRICE_RUPEES,
    }
}

/// Validates an absolute cart quantity.
///
/// ## Rules
/// - Must be non-negative; zero means "remove the line"
/// - At most `MAX_ITEM_QUANTITY` (999)
///
/// ```text
/// update_quantity(id, type, n)
///      │
///      ├── n < 0    → rejected, cart unchanged
///      ├── n > 999  → rejected, cart unchanged
///      ├── n == 0   → line removed
///      └── n > 0    → line quantity set to n
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates every field of a catalog entry.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price("buyPrice", product.buy_price)?;
    validate_price("rentPrice", product.rent_price)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
