//! Page Query - paginated query engine for DbHelper
//!
//! This crate turns a base SQL query plus a page number and page size into a
//! counting query and a dialect-specific windowed query, runs both through a
//! [`QueryExecutor`] and assembles the result into a [`Page`].
//!
//! ```rust,no_run
//! use page_query::prelude::*;
//! use type_mapping::StringArrayMapper;
//!
//! # async fn run(executor: &impl QueryExecutor) -> Result<(), PagingError> {
//! let page = PagedQuery::new("SELECT id, name FROM users WHERE active = ?")
//!     .dialect(Dialect::select(Some("mysql")))
//!     .page(3)
//!     .page_size(20)
//!     .param(true)
//!     .build()?
//!     .execute(executor, &StringArrayMapper)
//!     .await?;
//!
//! println!("page {} of {}", page.current_page(), page.page_count());
//! # Ok(())
//! # }
//! ```

/// Conditional debug logging macros
/// These only emit when the `debug-logging` feature is enabled, because the
/// logged parameter values may carry user data
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod arithmetic;
pub mod dialect;
pub mod errors;
pub mod executor;
pub mod page;
pub mod prelude;
pub mod statement;

#[cfg(test)]
mod tests;

pub use arithmetic::PageSize;
pub use dialect::Dialect;
pub use errors::PagingError;
pub use executor::{format_params, QueryExecutor};
pub use page::Page;
pub use statement::{PagedQuery, PagedStatement};
