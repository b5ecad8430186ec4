//! # API Error Type
//!
//! Unified error type for kasir commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kelontong POS                          │
//! │                                                                         │
//! │  Front-end                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  {"command": "process_payment", ...}                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── CatalogError::StockConflict ───┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Business Error? ─── CoreError::InsufficientPayment ApiError ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"error": {"code": "PAYMENT_ERROR", "message": "Insufficient ..."}}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kelontong_catalog::CatalogError;
use kelontong_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// This is what the front-end receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: p999"
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

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Unknown command or malformed JSON
    InvalidCommand,

    /// Cart operation failed (e.g. checkout of an empty cart)
    CartError,

    /// Not enough units on the shelf
    InsufficientStock,

    /// Stock changed since the adjustment was planned
    StockConflict,

    /// Payment processing error
    PaymentError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidCommand, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            CatalogError::Duplicate { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            e @ CatalogError::StockConflict { .. } => {
                ApiError::new(ErrorCode::StockConflict, e.to_string())
            }
            e @ CatalogError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, e.to_string())
            }
            CatalogError::Validation(e) => e.into(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", &id),
            e @ CoreError::InsufficientPayment { .. } => {
                ApiError::new(ErrorCode::PaymentError, e.to_string())
            }
            e @ CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, e.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
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
    use kelontong_core::Money;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::InsufficientPayment {
            total: Money::from_rupiah(10_395),
            tendered: Money::from_rupiah(10_000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(err.message.contains("Rp10.395"));

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_catalog_error_codes() {
        let err: ApiError = CatalogError::not_found("Product", "p999").into();
        assert_eq!(err, ApiError::not_found("Product", "p999"));

        let err: ApiError = CatalogError::StockConflict {
            product_id: "p004".into(),
            expected: 40,
            actual: 37,
        }
        .into();
        assert_eq!(err.code, ErrorCode::StockConflict);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("Invalid quantity input: 'abc'");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "Invalid quantity input: 'abc'");
    }
}
