//! Convenience re-exports for common DbHelper usage
//!
//! ```rust
//! use dbhelper::prelude::*;
//! ```

// Core DbHelper components
pub use crate::core::DbHelper;
pub use crate::errors::DbHelperError;
pub use crate::executor::MySqlExecutor;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, PagingConfig};

// Paging
pub use page_query::prelude::*;

// Row mapping
pub use type_mapping::{
    CaseInsensitiveMap, MappingError, NativeArrayMapper, NativeMapMapper, StringArrayMapper,
    StringMapMapper, TypedMapper,
};

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{MySql, MySqlPool, Row};
