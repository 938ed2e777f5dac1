//! Products domain module.
//!
//! This crate contains the catalog record and the pure operations over a
//! collection of records (validation, ordering, export), implemented as
//! deterministic domain logic (no IO, no storage).

pub mod collate;
pub mod draft;
pub mod export;
pub mod product;
pub mod sort;

pub use collate::NameCollation;
pub use draft::{FormInput, ProductDraft};
pub use export::{CSV_HEADER, to_csv};
pub use product::Product;
pub use sort::{SortKey, SortOrder, merge_sort_by, sort};
