//! Page value object
//!
//! A `Page` binds the rows of one window to their position in the full
//! result set. It is built once per paged query and never changes afterwards.

use crate::arithmetic::{self, PageSize};
use serde::Serialize;

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    rows: Vec<T>,
    start: i64,
    available_count: i64,
    page_size: PageSize,
    total_count: i64,
    current_page: i64,
    page_count: i64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Page<T> {
    /// Default number of rows per page
    pub const DEFAULT_PAGE_SIZE: i64 = 20;

    /// The canonical empty page: no rows, start 0, page 1 of 1
    pub fn empty() -> Self {
        Self::empty_with_size(PageSize::DEFAULT)
    }

    /// An empty page that remembers the requested capacity
    pub fn empty_with_size(page_size: PageSize) -> Self {
        Self {
            rows: Vec::new(),
            start: 0,
            available_count: 0,
            page_size,
            total_count: 0,
            current_page: 1,
            page_count: 1,
        }
    }

    /// Build a page from the rows of one window.
    ///
    /// `start` is the 1-based position of the first row and `total_count`
    /// the number of rows of the unpaged query. A result with no rows at all
    /// is still page 1 of 1.
    pub fn new(rows: Vec<T>, start: i64, total_count: i64, page_size: PageSize) -> Self {
        let available_count = rows.len() as i64;
        let remaining = total_count.saturating_sub(start.saturating_sub(1)).max(0);
        if available_count > remaining {
            tracing::warn!(
                "[PAGE] {} rows returned but only {} of {} remain from position {}",
                available_count,
                remaining,
                total_count,
                start
            );
        }

        let (current_page, page_count) = if total_count <= 0 {
            (1, 1)
        } else {
            (
                arithmetic::current_page_from_start(start, page_size),
                arithmetic::page_count(total_count, page_size),
            )
        };

        Self {
            rows,
            start,
            available_count,
            page_size,
            total_count,
            current_page,
            page_count,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first row of this page in the full result set
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Number of rows actually on this page
    pub fn available_count(&self) -> i64 {
        self.available_count
    }

    pub fn page_size(&self) -> i64 {
        self.page_size.get()
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn page_count(&self) -> i64 {
        self.page_count
    }

    /// Position of the last row of this page
    pub fn end(&self) -> i64 {
        arithmetic::end_of_page(self.start, self.available_count)
    }

    pub fn start_of_previous_page(&self) -> i64 {
        arithmetic::start_of_previous_page(self.start, self.page_size)
    }

    pub fn start_of_next_page(&self) -> i64 {
        arithmetic::start_of_next_page(self.start, self.available_count)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.page_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Convert the rows while keeping the paging metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            start: self.start,
            available_count: self.available_count,
            page_size: self.page_size,
            total_count: self.total_count,
            current_page: self.current_page,
            page_count: self.page_count,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
