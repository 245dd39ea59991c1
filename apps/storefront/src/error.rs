//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kashify                                │
//! │                                                                         │
//! │  Bridge line                  Session / Commands                        │
//! │  ───────────                  ──────────────────                        │
//! │                                                                         │
//! │  {"cmd":"update_cart_item", ...}                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Core error? ──── CoreError::InvalidQuantity ─────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         │                                          ▼             │  │
//! │  │         │                                      ApiError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── {"ok":false,"error":{"code":"INVALID_QUANTITY","message":...}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kashify_core::CoreError;
use serde::Serialize;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 99"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for bridge responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id on a read
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart quantity below 0 or above the per-line maximum
    InvalidQuantity,

    /// Request line could not be parsed
    BadRequest,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownProduct(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidQuantity {
                product_id,
                kind,
                requested,
            } => ApiError::new(
                ErrorCode::InvalidQuantity,
                format!(
                    "Quantity {} is not allowed for the {} line of product {}",
                    requested, kind, product_id
                ),
            ),
            CoreError::UnknownCategory(category) => {
                ApiError::validation(format!("Unknown category: {}", category))
            }
            CoreError::DuplicateProduct(_) | CoreError::MalformedCatalog(_) => {
                tracing::error!("Catalog error reached a command: {}", err);
                ApiError::internal(err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to encode response: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use kashify_core::{TransactionType, ValidationError};

    #[test]
    fn test_unknown_product_maps_to_not_found() {
        let err: ApiError = CoreError::UnknownProduct("99".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 99");
    }

    #[test]
    fn test_invalid_quantity_code() {
        let err: ApiError = CoreError::InvalidQuantity {
            product_id: "1".to_string(),
            kind: TransactionType::Rent,
            requested: -2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert!(err.message.contains("-2"));
        assert!(err.message.contains("rent"));
    }

    #[test]
    fn test_validation_maps_to_validation_error() {
        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "id".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "id is required");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::bad_request("expected value at line 1 column 1");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "expected value at line 1 column 1");
    }

    #[test]
    fn test_error_codes_on_the_wire() {
        let codes = [
            ErrorCode::NotFound,
            ErrorCode::ValidationError,
            ErrorCode::InvalidQuantity,
            ErrorCode::BadRequest,
            ErrorCode::Internal,
        ];
        let wire: Vec<String> = codes
            .iter()
            .map(|c| serde_json::to_value(c).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            wire,
            vec!["NOT_FOUND", "VALIDATION_ERROR", "INVALID_QUANTITY", "BAD_REQUEST", "INTERNAL"]
        );
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("Product", "7");
        assert_eq!(err.to_string(), "[NotFound] Product not found: 7");
    }
}
