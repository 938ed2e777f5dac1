//! `katalog-store` — durable persistence for the catalog.
//!
//! The catalog is stored as one JSON blob under one key of a key-value byte
//! store. The [`KvStore`] port has an in-memory adapter (tests, ephemeral
//! sessions) and a directory-backed adapter (one file per key).

pub mod config;
pub mod error;
pub mod kv;
pub mod product_store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use kv::{FileKvStore, InMemoryKvStore, KvStore};
pub use product_store::{Hydrated, ProductStore};
