use thiserror::Error;
use type_mapping::MappingError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PagingError {
    #[error("Query failed: {sql}: {source}")]
    QueryFailed {
        sql: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid page size {0}: page size must be at least 1")]
    InvalidPageSize(i64),

    #[error("Counting query returned a non-numeric value: {0}")]
    InvalidCount(String),

    #[error("Row mapping error: {0}")]
    Mapping(#[from] MappingError),
}

impl PagingError {
    /// Wrap a driver error raised while running `sql`
    pub fn query_failed(sql: &str, source: impl Into<BoxError>) -> Self {
        Self::QueryFailed {
            sql: sql.to_string(),
            source: source.into(),
        }
    }
}
