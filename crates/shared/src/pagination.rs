//! Page-number pagination utilities.
//!
//! Pages are 1-based. Out-of-range page numbers are clamped to the nearest
//! valid page, so stepping past either end is a no-op rather than an error.

use serde::Serialize;
use thiserror::Error;

/// Number of records shown per page on list screens.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Error type for paginator construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
}

/// Slices collections into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

/// One page of a collection together with its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

impl Paginator {
    /// Creates a paginator with the given page size.
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of pages for `total` items.
    ///
    /// An empty collection still has one (empty) page.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Clamps a requested page into `[1, page_count]`.
    pub fn clamp_page(&self, page: usize, total: usize) -> usize {
        page.clamp(1, self.page_count(total))
    }

    /// Page after `page`, or `page` itself on the last page.
    pub fn next_page(&self, page: usize, total: usize) -> usize {
        self.clamp_page(page.saturating_add(1), total)
    }

    /// Page before `page`, or 1 on the first page.
    pub fn previous_page(&self, page: usize, total: usize) -> usize {
        self.clamp_page(page.saturating_sub(1), total)
    }

    /// Returns the items of `page`, clamping the page number first.
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> Page<'a, T> {
        let total = items.len();
        let page = self.clamp_page(page, total);
        let start = ((page - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);

        Page {
            items: &items[start..end],
            page,
            page_count: self.page_count(total),
            total,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
