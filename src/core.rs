//! Core DbHelper functionality
//!
//! This module contains the main DbHelper struct: a MySQL pool, the dialect
//! used for paging and the default page size, plus the query, list and page
//! helpers built on top of them.

use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::MySqlPool;
use std::time::Duration;

use crate::errors::DbHelperError;
use crate::executor::MySqlExecutor;
use config::{AppConfig, DatabaseConfig};
use page_query::{Dialect, Page, PageSize, PagedQuery};
use type_mapping::{
    value_to_text, CaseInsensitiveMap, NativeArrayMapper, NativeMapMapper, RowMapper,
    StringArrayMapper, StringMapMapper, TypedMapper,
};

/// Main DbHelper coordinator
#[derive(Debug, Clone)]
pub struct DbHelper {
    executor: MySqlExecutor,
    dialect: Dialect,
    default_page_size: PageSize,
}

impl DbHelper {
    /// Create new DbHelper with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, DbHelperError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::mysql::MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        let dialect = Dialect::select(Some(config.dialect.as_str()));

        tracing::debug!(
            "[DBHELPER] Connected to {}:{}/{} using {} paging",
            config.host,
            config.port,
            config.database,
            dialect
        );

        Ok(Self::from_pool(pool, dialect))
    }

    /// Create a DbHelper from a full application config, validating it first
    pub async fn from_config(config: AppConfig) -> Result<Self, DbHelperError> {
        config.validate()?;
        let page_size = PageSize::new(config.paging.default_page_size)?;
        Ok(Self::new(config.database)
            .await?
            .with_default_page_size(page_size))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: MySqlPool, dialect: Dialect) -> Self {
        Self {
            executor: MySqlExecutor::new(pool),
            dialect,
            default_page_size: PageSize::DEFAULT,
        }
    }

    pub fn with_default_page_size(mut self, page_size: PageSize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Get database pool reference
    pub fn pool(&self) -> &MySqlPool {
        self.executor.pool()
    }

    pub fn executor(&self) -> &MySqlExecutor {
        &self.executor
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn default_page_size(&self) -> PageSize {
        self.default_page_size
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), DbHelperError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }

    /// First column of the first row as trimmed text, `None` without a row
    pub async fn query_scalar(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<String>, DbHelperError> {
        let row = self.executor.first_row(sql, params).await?;
        Ok(row
            .as_ref()
            .and_then(|row| row.values().first())
            .map(value_to_text))
    }

    /// Run an insert, update or delete and return the affected row count
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, DbHelperError> {
        Ok(self.executor.execute(sql, params).await?)
    }

    /// Run one statement per parameter set in a single transaction
    pub async fn batch(
        &self,
        sql: &str,
        param_sets: &[Vec<Value>],
    ) -> Result<Vec<u64>, DbHelperError> {
        Ok(self.executor.batch(sql, param_sets).await?)
    }

    /// Map the first row with a custom mapper
    pub async fn query_one<M>(
        &self,
        sql: &str,
        params: &[Value],
        mapper: &M,
    ) -> Result<Option<M::Output>, DbHelperError>
    where
        M: RowMapper + ?Sized,
    {
        match self.executor.first_row(sql, params).await? {
            Some(row) => Ok(Some(mapper.map_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Map every row with a custom mapper
    pub async fn query_list<M>(
        &self,
        sql: &str,
        params: &[Value],
        mapper: &M,
    ) -> Result<Vec<M::Output>, DbHelperError>
    where
        M: RowMapper + ?Sized,
    {
        let rows = self.executor.rows(sql, params).await?;
        Ok(mapper.map_rows(&rows)?)
    }

    pub async fn get_array(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Vec<String>>, DbHelperError> {
        self.query_one(sql, params, &StringArrayMapper).await
    }

    pub async fn get_native_array(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Vec<Value>>, DbHelperError> {
        self.query_one(sql, params, &NativeArrayMapper).await
    }

    pub async fn get_map(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<CaseInsensitiveMap<String>>, DbHelperError> {
        self.query_one(sql, params, &StringMapMapper).await
    }

    pub async fn get_native_map(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<CaseInsensitiveMap<Value>>, DbHelperError> {
        self.query_one(sql, params, &NativeMapMapper).await
    }

    /// First row mapped onto `T` by column name
    pub async fn get_bean<T>(&self, sql: &str, params: &[Value]) -> Result<Option<T>, DbHelperError>
    where
        T: DeserializeOwned,
    {
        let mapper = TypedMapper::<T>::new()?;
        self.query_one(sql, params, &mapper).await
    }

    pub async fn get_array_list(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<Vec<String>>, DbHelperError> {
        self.query_list(sql, params, &StringArrayMapper).await
    }

    pub async fn get_native_array_list(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<Vec<Value>>, DbHelperError> {
        self.query_list(sql, params, &NativeArrayMapper).await
    }

    pub async fn get_map_list(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<CaseInsensitiveMap<String>>, DbHelperError> {
        self.query_list(sql, params, &StringMapMapper).await
    }

    pub async fn get_native_map_list(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<CaseInsensitiveMap<Value>>, DbHelperError> {
        self.query_list(sql, params, &NativeMapMapper).await
    }

    pub async fn get_bean_list<T>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>, DbHelperError>
    where
        T: DeserializeOwned,
    {
        let mapper = TypedMapper::<T>::new()?;
        self.query_list(sql, params, &mapper).await
    }

    /// Start a paged query with this helper's dialect and default page size
    pub fn paged(&self, sql: impl Into<String>) -> PagedQuery {
        PagedQuery::new(sql)
            .dialect(self.dialect)
            .page_size(self.default_page_size.get())
    }

    /// Count, then fetch one page mapped with a custom mapper
    pub async fn page<M>(&self, query: PagedQuery, mapper: &M) -> Result<Page<M::Output>, DbHelperError>
    where
        M: RowMapper + ?Sized,
    {
        let statement = query.build()?;
        Ok(statement.execute(&self.executor, mapper).await?)
    }

    fn page_query(&self, sql: &str, page_no: i64, page_size: i64, params: &[Value]) -> PagedQuery {
        self.paged(sql)
            .page(page_no)
            .page_size(page_size)
            .params(params.iter().cloned())
    }

    pub async fn get_array_page(
        &self,
        sql: &str,
        page_no: i64,
        page_size: i64,
        params: &[Value],
    ) -> Result<Page<Vec<String>>, DbHelperError> {
        let query = self.page_query(sql, page_no, page_size, params);
        self.page(query, &StringArrayMapper).await
    }

    pub async fn get_map_page(
        &self,
        sql: &str,
        page_no: i64,
        page_size: i64,
        params: &[Value],
    ) -> Result<Page<CaseInsensitiveMap<String>>, DbHelperError> {
        let query = self.page_query(sql, page_no, page_size, params);
        self.page(query, &StringMapMapper).await
    }

    pub async fn get_native_map_page(
        &self,
        sql: &str,
        page_no: i64,
        page_size: i64,
        params: &[Value],
    ) -> Result<Page<CaseInsensitiveMap<Value>>, DbHelperError> {
        let query = self.page_query(sql, page_no, page_size, params);
        self.page(query, &NativeMapMapper).await
    }

    /// One page of rows mapped onto `T` by column name
    pub async fn get_page<T>(
        &self,
        sql: &str,
        page_no: i64,
        page_size: i64,
        params: &[Value],
    ) -> Result<Page<T>, DbHelperError>
    where
        T: DeserializeOwned,
    {
        let mapper = TypedMapper::<T>::new()?;
        let query = self.page_query(sql, page_no, page_size, params);
        self.page(query, &mapper).await
    }
}
