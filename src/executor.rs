//! sqlx-backed query executor
//!
//! Runs statements against a MySQL pool, binding `serde_json::Value`
//! parameters positionally and decoding each column into a `Value` by the
//! type the server reports for it.

use async_trait::async_trait;
use page_query::{PagingError, QueryExecutor};
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlRow};
use sqlx::{Column, MySql, Row, TypeInfo, ValueRef};
use type_mapping::RawRow;

type MySqlQuery<'q> = sqlx::query::Query<'q, MySql, MySqlArguments>;

/// How a JSON parameter is sent to MySQL. Strings always stay text.
#[derive(Debug, Clone, PartialEq)]
enum SqlParam {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<&Value> for SqlParam {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => SqlParam::Text(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqlParam::Int(i)
                } else if let Some(u) = n.as_u64() {
                    SqlParam::UInt(u)
                } else if let Some(f) = n.as_f64() {
                    SqlParam::Float(f)
                } else {
                    SqlParam::Text(n.to_string())
                }
            }
            Value::Bool(b) => SqlParam::Bool(*b),
            Value::Null => SqlParam::Null,
            // arrays and objects go over as JSON text
            other => SqlParam::Text(other.to_string()),
        }
    }
}

fn bind_param<'q>(query: MySqlQuery<'q>, param: &Value) -> MySqlQuery<'q> {
    match SqlParam::from(param) {
        SqlParam::Text(s) => query.bind(s),
        SqlParam::Int(i) => query.bind(i),
        SqlParam::UInt(u) => query.bind(u),
        SqlParam::Float(f) => query.bind(f),
        SqlParam::Bool(b) => query.bind(b),
        SqlParam::Null => query.bind(Option::<String>::None),
    }
}

fn bind_params<'q>(sql: &'q str, params: &[Value]) -> MySqlQuery<'q> {
    params.iter().fold(sqlx::query(sql), bind_param)
}

/// Decode one column of a row into a JSON value
fn decode_column(row: &MySqlRow, index: usize) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let type_name = row.column(index).type_info().name();
    let value = match type_name {
        "BOOLEAN" => Value::from(row.try_get::<bool, _>(index)?),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            Value::from(row.try_get::<i64, _>(index)?)
        }
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => Value::from(row.try_get::<u64, _>(index)?),
        "YEAR" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        "FLOAT" => Value::from(f64::from(row.try_get::<f32, _>(index)?)),
        "DOUBLE" => Value::from(row.try_get::<f64, _>(index)?),
        // kept as text so no precision is lost
        "DECIMAL" => Value::String(row.try_get::<rust_decimal::Decimal, _>(index)?.to_string()),
        "DATE" => Value::String(row.try_get::<chrono::NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::String(row.try_get::<chrono::NaiveTime, _>(index)?.to_string()),
        "DATETIME" => Value::String(
            row.try_get::<chrono::NaiveDateTime, _>(index)?
                .format("%Y-%m-%d %H:%M:%S%.f")
                .to_string(),
        ),
        "TIMESTAMP" => Value::String(
            row.try_get::<chrono::DateTime<chrono::Utc>, _>(index)?
                .to_rfc3339(),
        ),
        "JSON" => row.try_get::<sqlx::types::Json<Value>, _>(index)?.0,
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            match String::from_utf8(bytes) {
                Ok(text) => Value::String(text),
                Err(e) => Value::from(e.into_bytes()),
            }
        }
        _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}

fn decode_row(row: &MySqlRow) -> Result<RawRow, sqlx::Error> {
    let mut raw = RawRow::with_capacity(row.len());
    for (index, column) in row.columns().iter().enumerate() {
        raw.push(column.name(), decode_column(row, index)?);
    }
    Ok(raw)
}

/// [`QueryExecutor`] over a sqlx MySQL pool
#[derive(Debug, Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Run a query and decode every row
    pub async fn rows(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, sqlx::Error> {
        debug_log!("[SQL] {} {}", sql, page_query::format_params(params));

        let rows = bind_params(sql, params).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    /// Run a query and decode its first row, if any
    pub async fn first_row(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<RawRow>, sqlx::Error> {
        debug_log!("[SQL] {} {}", sql, page_query::format_params(params));

        let row = bind_params(sql, params).fetch_optional(&self.pool).await?;
        row.as_ref().map(decode_row).transpose()
    }

    /// Run an insert, update or delete and return the affected row count
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, sqlx::Error> {
        debug_log!("[SQL] {} {}", sql, page_query::format_params(params));

        let result = bind_params(sql, params).execute(&self.pool).await?;
        tracing::debug!("[SQL] {} rows affected", result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Run one statement per parameter set inside a single transaction.
    /// Nothing is committed unless every statement succeeds.
    pub async fn batch(&self, sql: &str, param_sets: &[Vec<Value>]) -> Result<Vec<u64>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut affected = Vec::with_capacity(param_sets.len());

        for params in param_sets {
            trace_log!("[BATCH] {} {}", sql, page_query::format_params(params));
            let result = bind_params(sql, params).execute(&mut *tx).await?;
            affected.push(result.rows_affected());
        }

        tx.commit().await?;
        tracing::debug!("[BATCH] {} statements committed", affected.len());
        Ok(affected)
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    async fn fetch_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, PagingError> {
        self.rows(sql, params)
            .await
            .map_err(|e| PagingError::query_failed(sql, e))
    }

    async fn fetch_scalar(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Value>, PagingError> {
        let row = self
            .first_row(sql, params)
            .await
            .map_err(|e| PagingError::query_failed(sql, e))?;

        Ok(row.and_then(|row| row.into_values().into_iter().next()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_like_strings_stay_text() {
        let raw = "2024-01-01T10:00:00+02:00";
        assert_eq!(SqlParam::from(&json!(raw)), SqlParam::Text(raw.to_string()));
        assert_eq!(
            SqlParam::from(&json!("550e8400-e29b-41d4-a716-446655440000")),
            SqlParam::Text("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
    }

    #[test]
    fn test_scalar_params() {
        assert_eq!(SqlParam::from(&json!(-7)), SqlParam::Int(-7));
        assert_eq!(SqlParam::from(&json!(u64::MAX)), SqlParam::UInt(u64::MAX));
        assert_eq!(SqlParam::from(&json!(1.5)), SqlParam::Float(1.5));
        assert_eq!(SqlParam::from(&json!(true)), SqlParam::Bool(true));
        assert_eq!(SqlParam::from(&Value::Null), SqlParam::Null);
    }

    #[test]
    fn test_structured_params_are_json_text() {
        assert_eq!(
            SqlParam::from(&json!({"a": [1, 2]})),
            SqlParam::Text(r#"{"a":[1,2]}"#.to_string())
        );
    }
}
