//! Error types for the DbHelper crate
//!
//! This module contains all error types that can be returned by DbHelper operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbHelperError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Paging error: {0}")]
    Paging(#[from] page_query::PagingError),

    #[error("Row mapping error: {0}")]
    Mapping(#[from] type_mapping::MappingError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
