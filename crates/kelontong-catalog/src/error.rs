//! # Catalog Error Types
//!
//! Error types for catalog store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Lookup miss / duplicate / stale stock                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in kasir) ← Serialized for the front-end                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kelontong_core::ValidationError;
use thiserror::Error;

/// Catalog store errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique key already taken.
    ///
    /// ## When This Occurs
    /// - Inserting a product id or barcode that already exists
    /// - Inserting a duplicate category or customer id
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A stock movement was planned against a count that has since changed.
    ///
    /// ## When This Occurs
    /// ```text
    /// Staff A opens prompt (stock 40) ──► plans Set(25) from 40
    /// Checkout sells 3                ──► stock 37
    /// Staff A submits                 ──► StockConflict { expected: 40, actual: 37 }
    /// ```
    #[error("Stock changed for {product_id}: expected {expected}, found {actual}")]
    StockConflict {
        product_id: String,
        expected: u32,
        actual: u32,
    },

    /// A sale asks for more units than are on the shelf.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    /// Record failed validation before insert.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        CatalogError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::not_found("Product", "p999").to_string(),
            "Product not found: p999"
        );
        assert_eq!(
            CatalogError::duplicate("barcode", "8992388888881").to_string(),
            "Duplicate barcode: '8992388888881' already exists"
        );
        let err = CatalogError::StockConflict {
            product_id: "p004".into(),
            expected: 40,
            actual: 37,
        };
        assert_eq!(err.to_string(), "Stock changed for p004: expected 40, found 37");
    }
}
