//! Catalog error model.

use thiserror::Error;

/// Result type used across the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Every failure leaves the in-memory collection unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A field failed validation or coercion (user-correctable).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A positional reference no longer points inside the collection.
    #[error("index {index} out of bounds for catalog of {len} records")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No record carries the requested identifier.
    #[error("product not found: {0}")]
    NotFound(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The persisted blob exists but cannot be decoded.
    #[error("persisted catalog is corrupt: {0}")]
    CorruptState(String),

    /// The key-value store failed to read or write.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    pub fn not_found(what: impl core::fmt::Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn corrupt_state(msg: impl Into<String>) -> Self {
        Self::CorruptState(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the caller can fix the input and retry.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
