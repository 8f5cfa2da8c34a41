//! Common imports for paged queries

pub use crate::arithmetic::PageSize;
pub use crate::dialect::Dialect;
pub use crate::errors::PagingError;
pub use crate::executor::QueryExecutor;
pub use crate::page::Page;
pub use crate::statement::{PagedQuery, PagedStatement};
pub use type_mapping::{RawRow, RowMapper};
