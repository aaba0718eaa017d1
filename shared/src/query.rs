//! Generic list query pipeline
//!
//! One filter + sort + paginate implementation reused by every list
//! endpoint (hotels, rooms, bookings). Call sites supply only their
//! predicates and comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Pagination window. `index` is zero-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub index: usize,
    #[serde(default = "Page::default_size")]
    pub size: usize,
}

impl Page {
    pub const DEFAULT_SIZE: usize = 20;

    fn default_size() -> usize {
        Self::DEFAULT_SIZE
    }

    pub fn new(index: usize, size: usize) -> Self {
        Self { index, size }
    }

    /// A page large enough to never slice
    pub fn all() -> Self {
        Self {
            index: 0,
            size: usize::MAX,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            index: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Boxed predicate over `T`
pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Filter, sort and paginate `items`.
///
/// Predicates are ANDed; an empty predicate list keeps every item. The sort
/// is stable, so comparator ties are broken by insertion order. Pagination
/// slices `[index*size, index*size+size)`; an out-of-range index yields an
/// empty vec, never an error.
pub fn filter_sort_paginate<T, C>(
    items: Vec<T>,
    predicates: &[Predicate<T>],
    mut comparator: C,
    page: Page,
) -> Vec<T>
where
    C: FnMut(&T, &T) -> Ordering,
{
    let mut filtered: Vec<T> = items
        .into_iter()
        .filter(|item| predicates.iter().all(|p| p(item)))
        .collect();

    filtered.sort_by(|a, b| comparator(a, b));

    if page.size == 0 {
        return Vec::new();
    }
    let start = page.index.saturating_mul(page.size);
    if start >= filtered.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page.size).min(filtered.len());
    filtered.drain(..start);
    filtered.truncate(end - start);
    filtered
}
