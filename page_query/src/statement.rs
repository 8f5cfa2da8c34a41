//! Paged statements
//!
//! A [`PagedQuery`] describes what the caller wants: base SQL, dialect, page
//! number, page size and bound parameters. Building it yields a
//! [`PagedStatement`] with both SQL strings already derived. Executing the
//! statement runs the counting query, stops early with an empty page when
//! there is nothing to show, and otherwise runs the windowed query and maps
//! its rows.

use crate::arithmetic::{start_of_page, PageSize};
use crate::dialect::Dialect;
use crate::errors::PagingError;
use crate::executor::QueryExecutor;
use crate::page::Page;
use serde_json::Value;
use type_mapping::RowMapper;

/// Description of one paged request
#[derive(Debug, Clone)]
pub struct PagedQuery {
    sql: String,
    dialect: Dialect,
    page_no: i64,
    page_size: i64,
    params: Vec<Value>,
}

impl PagedQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            dialect: Dialect::default(),
            page_no: 1,
            page_size: PageSize::DEFAULT.get(),
            params: Vec::new(),
        }
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// 1-based page number; values below 1 are read as the first page
    pub fn page(mut self, page_no: i64) -> Self {
        self.page_no = page_no;
        self
    }

    /// Rows per page, validated when the statement is built
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Add a single bound parameter
    pub fn param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Add multiple bound parameters
    pub fn params(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(values);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn page_no(&self) -> i64 {
        self.page_no
    }

    pub fn bound_params(&self) -> &[Value] {
        &self.params
    }

    /// Derive the counting and windowed SQL
    pub fn build(self) -> Result<PagedStatement, PagingError> {
        PagedStatement::new(self)
    }
}

/// A single-shot paged statement with its SQL derived up front
#[derive(Debug, Clone)]
pub struct PagedStatement {
    dialect: Dialect,
    count_sql: String,
    page_sql: String,
    page_no: i64,
    page_size: PageSize,
    start_index: i64,
    has_offset: bool,
    params: Vec<Value>,
}

impl PagedStatement {
    /// Validate the page size and derive both queries.
    ///
    /// Fails with [`PagingError::InvalidPageSize`] before any SQL exists when
    /// the page size is below 1.
    pub fn new(query: PagedQuery) -> Result<Self, PagingError> {
        let page_size = PageSize::new(query.page_size)?;
        let start_index = start_of_page(query.page_no, page_size);
        let has_offset = query.page_no > 1;

        let count_sql = query.dialect.counting_sql(&query.sql);
        let page_sql = query.dialect.page_sql(&query.sql, has_offset);

        tracing::debug!("[PAGE] Dialect: {}", query.dialect);
        tracing::debug!("[PAGE] Count SQL: {}", count_sql);
        tracing::debug!("[PAGE] Page SQL: {}", page_sql);

        Ok(Self {
            dialect: query.dialect,
            count_sql,
            page_sql,
            page_no: query.page_no,
            page_size,
            start_index,
            has_offset,
            params: query.params,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn count_sql(&self) -> &str {
        &self.count_sql
    }

    pub fn page_sql(&self) -> &str {
        &self.page_sql
    }

    pub fn page_no(&self) -> i64 {
        self.page_no
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    pub fn has_offset(&self) -> bool {
        self.has_offset
    }

    /// Parameters of the counting query, exactly as the caller bound them
    pub fn count_params(&self) -> &[Value] {
        &self.params
    }

    /// Parameters of the windowed query: the caller's plus the window bounds
    pub fn page_params(&self) -> Vec<Value> {
        self.dialect.attach_page_params(
            &self.params,
            self.has_offset,
            self.start_index,
            self.page_size.get(),
        )
    }

    /// Count, then fetch and map the requested window.
    ///
    /// Any executor or mapping failure aborts the whole request; no partial
    /// page is ever returned.
    pub async fn execute<E, M>(
        self,
        executor: &E,
        mapper: &M,
    ) -> Result<Page<M::Output>, PagingError>
    where
        E: QueryExecutor + ?Sized,
        M: RowMapper + ?Sized,
    {
        debug_log!(
            "[PAGE] {} {}",
            self.count_sql,
            crate::executor::format_params(&self.params)
        );

        let scalar = executor.fetch_scalar(&self.count_sql, &self.params).await?;
        let total_count = count_from_scalar(scalar)?;

        if total_count < 1 {
            tracing::debug!("[PAGE] Count is 0, page query skipped");
            return Ok(Page::empty_with_size(self.page_size));
        }

        let params = self.page_params();
        debug_log!(
            "[PAGE] {} {} [totalCount: {}] [currentPage: {}] [pageSize: {}]",
            self.page_sql,
            crate::executor::format_params(&params),
            total_count,
            self.page_no,
            self.page_size.get()
        );

        let rows = executor.fetch_rows(&self.page_sql, &params).await?;
        let mapped = mapper.map_rows(&rows)?;

        tracing::debug!(
            "[PAGE] Fetched {} of {} rows starting at {}",
            mapped.len(),
            total_count,
            self.start_index
        );

        Ok(Page::new(mapped, self.start_index, total_count, self.page_size))
    }
}

/// Read the counting query's scalar; no row or NULL counts as zero
fn count_from_scalar(value: Option<Value>) -> Result<i64, PagingError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(u) = n.as_u64() {
                Ok(i64::try_from(u).unwrap_or(i64::MAX))
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(f as i64),
                    _ => Err(PagingError::InvalidCount(n.to_string())),
                }
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| PagingError::InvalidCount(s.clone())),
        Some(other) => Err(PagingError::InvalidCount(other.to_string())),
    }
}
