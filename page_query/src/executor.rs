//! Query executor seam
//!
//! The paging engine never talks to a driver directly. Anything that can run
//! a SQL string with positional parameters implements [`QueryExecutor`].

use crate::errors::PagingError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use type_mapping::RawRow;

/// Runs SQL with positional `?` parameters bound in order
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a query and return every row it produces
    async fn fetch_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, PagingError>;

    /// Run a query and return the first column of its first row, `None`
    /// when there is no row
    async fn fetch_scalar(&self, sql: &str, params: &[Value])
        -> Result<Option<Value>, PagingError>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Arc<E> {
    async fn fetch_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, PagingError> {
        (**self).fetch_rows(sql, params).await
    }

    async fn fetch_scalar(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Value>, PagingError> {
        (**self).fetch_scalar(sql, params).await
    }
}

/// Render parameters for SQL logs as `[params: a, b, <null>]`, empty when
/// there are none
pub fn format_params(params: &[Value]) -> String {
    if params.is_empty() {
        return String::new();
    }

    let rendered = params
        .iter()
        .map(|p| match p {
            Value::Null => "<null>".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("[params: {}]", rendered)
}
