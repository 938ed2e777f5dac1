//! `katalog-service`
//!
//! **Responsibility:** the single owner of catalog state.
//!
//! [`CatalogService`] holds the in-memory collection and its [`ProductStore`],
//! validates input, and writes the full collection through to storage after
//! every mutation. Search and ordering are delegated to `katalog-search` and
//! `katalog-products`.
//!
//! [`ProductStore`]: katalog_store::ProductStore

pub mod confirm;
pub mod service;

pub use confirm::{Applied, Confirmation, PendingAction};
pub use service::CatalogService;
