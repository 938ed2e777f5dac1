//! Locale-aware ordering of record names.

use core::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

/// Case-folded name comparison under the root-locale Unicode collation.
///
/// Accented letters sort with their base letter (`"Éclair"` before
/// `"Zebra"`). Falls back to code-point order of the lowercased names if
/// collation data cannot be loaded.
pub struct NameCollation {
    collator: Option<Collator>,
}

impl NameCollation {
    pub fn new() -> Self {
        let collator = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(error = ?err, "collation data unavailable; ordering names by code point");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let (a, b) = (a.to_lowercase(), b.to_lowercase());
        match &self.collator {
            Some(collator) => collator.compare(&a, &b),
            None => a.cmp(&b),
        }
    }
}

impl Default for NameCollation {
    fn default() -> Self {
        Self::new()
    }
}
