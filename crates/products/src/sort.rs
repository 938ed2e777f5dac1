//! Stable top-down merge sort over catalog records.
//!
//! The merge step is written out explicitly (instead of delegating to
//! `slice::sort_by`) so tie handling is fixed: on equal keys the element from
//! the left half is always taken first, for both directions.

use core::cmp::Ordering;
use core::str::FromStr;

use katalog_core::CatalogError;

use crate::collate::NameCollation;
use crate::product::Product;

/// Field a collection is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
        }
    }

    /// Names compare case-folded under `collation`, prices numerically.
    pub fn compare(self, collation: &NameCollation, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => collation.compare(a.name(), b.name()),
            SortKey::Price => a.price().total_cmp(&b.price()),
        }
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Whether the left head wins for a non-tie comparison result.
    fn prefers_left(self, cmp: Ordering) -> bool {
        match (self, cmp) {
            (_, Ordering::Equal) => true,
            (SortOrder::Asc, Ordering::Less) => true,
            (SortOrder::Desc, Ordering::Greater) => true,
            _ => false,
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            other => Err(CatalogError::validation(format!(
                "unknown sort key {other:?} (expected name or price)"
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CatalogError::validation(format!(
                "unknown sort order {other:?} (expected asc or desc)"
            ))),
        }
    }
}

/// Sorted copy of `products`; the input is left untouched.
pub fn sort(products: &[Product], key: SortKey, order: SortOrder) -> Vec<Product> {
    let collation = NameCollation::new();
    merge_sort_by(products, order, &|a: &Product, b: &Product| {
        key.compare(&collation, a, b)
    })
}

/// Stable merge sort with an explicit direction.
///
/// `cmp` always describes ascending order; `order` decides which head wins.
/// O(n log n) comparisons, O(n) extra space per merge level.
pub fn merge_sort_by<T, F>(items: &[T], order: SortOrder, cmp: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let mid = items.len() / 2;
    let left = merge_sort_by(&items[..mid], order, cmp);
    let right = merge_sort_by(&items[mid..], order, cmp);
    merge(left, right, order, cmp)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, order: SortOrder, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => order.prefers_left(cmp(a, b)),
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}
