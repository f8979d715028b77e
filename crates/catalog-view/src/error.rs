//! Catalog error types.

use thiserror::Error;

/// Errors raised at the catalog boundaries.
///
/// The view pipeline itself is total and never returns these; they come
/// from parsing API payloads and user-supplied filter tags.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A list entry was not a JSON object.
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The payload was neither an array nor a wrapper object with a list.
    #[error("Unexpected payload shape: {0}")]
    UnexpectedShape(String),

    /// Unknown discount bucket tag.
    #[error("Unknown discount bucket: {0}")]
    UnknownDiscountBucket(String),

    /// Unknown stock filter tag.
    #[error("Unknown stock filter: {0}")]
    UnknownStockFilter(String),

    /// Unknown sort tag.
    #[error("Unknown sort option: {0}")]
    UnknownSort(String),

    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Product not found in a snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CatalogError {
    /// Whether the error came from a malformed API payload.
    pub fn is_payload_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidRecord { .. }
                | CatalogError::UnexpectedShape(_)
                | CatalogError::SerializationError(_)
        )
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
