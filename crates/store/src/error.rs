use katalog_core::CatalogError;
use thiserror::Error;

/// Storage operation error.
///
/// These are **infrastructure errors** (IO, decoding) as opposed to catalog
/// errors (validation, bounds). They convert into [`CatalogError`] at the
/// service boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("value under key {key:?} is not a product collection: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode product collection: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("lock poisoned")]
    Poisoned,
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt { .. } => CatalogError::corrupt_state(err.to_string()),
            other => CatalogError::storage(other.to_string()),
        }
    }
}
