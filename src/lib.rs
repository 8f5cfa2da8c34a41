//! # DbHelper
//!
//! A database access convenience layer over sqlx for MySQL, with
//! count-then-fetch pagination for `LIMIT` and `ROWNUM` style SQL and
//! flexible row mapping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dbhelper::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct User {
//!     pub user_id: i64,
//!     pub user_name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 3306, "shop".to_string(),
//!         "root".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let db = DbHelper::new(config).await?;
//!
//!     let page = db
//!         .get_page::<User>("SELECT USER_ID, USER_NAME FROM users", 2, 20, &[])
//!         .await?;
//!
//!     println!("page {} of {}", page.current_page(), page.page_count());
//!     for user in page.rows() {
//!         println!("{}: {}", user.user_id, user.user_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod executor;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::DbHelper;
pub use errors::DbHelperError;
pub use executor::MySqlExecutor;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, PagingConfig};

// Re-export workspace crates used in the public API
pub use page_query;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use sqlx;
pub use async_trait;
