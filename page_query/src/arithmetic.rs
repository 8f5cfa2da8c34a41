//! Page arithmetic
//!
//! Positions are 1-based row numbers within the full result set. None of
//! these functions clamp a page number against the page count: a page past
//! the end simply starts past the last row.

use crate::errors::PagingError;
use serde::{Deserialize, Serialize};

/// A page capacity, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PageSize(i64);

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(20);

    pub fn new(size: i64) -> Result<Self, PagingError> {
        if size < 1 {
            return Err(PagingError::InvalidPageSize(size));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for PageSize {
    type Error = PagingError;

    fn try_from(size: i64) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<PageSize> for i64 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// Position of the first row of `page_no`; page numbers below 1 give 1
pub fn start_of_page(page_no: i64, page_size: PageSize) -> i64 {
    page_no
        .saturating_sub(1)
        .saturating_mul(page_size.get())
        .saturating_add(1)
        .max(1)
}

/// Page number containing the row at `start`
pub fn current_page_from_start(start: i64, page_size: PageSize) -> i64 {
    start.saturating_sub(1).max(0) / page_size.get() + 1
}

/// Number of pages needed for `total_count` rows, 0 when there are none
pub fn page_count(total_count: i64, page_size: PageSize) -> i64 {
    if total_count <= 0 {
        return 0;
    }
    (total_count - 1) / page_size.get() + 1
}

/// Position of the last row on a page, 0 for an empty page at the start
pub fn end_of_page(start: i64, available_count: i64) -> i64 {
    start
        .saturating_add(available_count)
        .saturating_sub(1)
        .max(0)
}

pub fn start_of_previous_page(start: i64, page_size: PageSize) -> i64 {
    start.saturating_sub(page_size.get()).max(1)
}

pub fn start_of_next_page(start: i64, available_count: i64) -> i64 {
    start.saturating_add(available_count)
}
