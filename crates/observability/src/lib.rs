//! Tracing/logging setup shared by everything that embeds the catalog.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{LogFormat, init, init_with};
