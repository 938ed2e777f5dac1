//! Case-insensitive substring search for catalog queries.
//!
//! Pure, allocation-light logic; no IO and no knowledge of products.

pub mod matcher;

pub use matcher::{PrefixTable, contains};
