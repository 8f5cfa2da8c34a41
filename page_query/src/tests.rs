use crate::prelude::*;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use type_mapping::{NativeMapMapper, StringArrayMapper, TypedMapper};

/// In-memory table that answers counting and windowed queries by reading
/// the window bounds back out of the bound parameters
struct FakeTable {
    rows: Vec<RawRow>,
    count_override: Option<Option<Value>>,
    fail_on: Option<&'static str>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl FakeTable {
    fn with_rows(total: i64) -> Self {
        let rows = (1..=total)
            .map(|id| {
                RawRow::new()
                    .with_column("ID", json!(id))
                    .with_column("USER_NAME", json!(format!(" user{id} ")))
            })
            .collect();
        Self {
            rows,
            count_override: None,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn count_returns(mut self, value: Option<Value>) -> Self {
        self.count_override = Some(value);
        self
    }

    fn failing_on(mut self, fragment: &'static str) -> Self {
        self.fail_on = Some(fragment);
        self
    }

    fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, sql: &str, params: &[Value]) -> Result<(), PagingError> {
        self.calls
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        match self.fail_on {
            Some(fragment) if sql.contains(fragment) => {
                Err(PagingError::query_failed(sql, "connection reset"))
            }
            _ => Ok(()),
        }
    }

    /// 1-based inclusive-exclusive bounds of the requested window
    fn window(&self, sql: &str, params: &[Value]) -> (i64, i64) {
        let tail = |n: usize| params[params.len() - n].as_i64().unwrap();
        if sql.ends_with("LIMIT ?, ?") {
            let (offset, size) = (tail(2), tail(1));
            (offset + 1, offset + 1 + size)
        } else if sql.ends_with("LIMIT ?") {
            (1, 1 + tail(1))
        } else if sql.ends_with("rownum_ >= ?") {
            (tail(1), tail(2))
        } else if sql.ends_with("ROWNUM < ?") {
            (1, tail(1))
        } else {
            panic!("unexpected page sql: {sql}");
        }
    }
}

#[async_trait]
impl QueryExecutor for FakeTable {
    async fn fetch_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<RawRow>, PagingError> {
        self.record(sql, params)?;
        let (from, to) = self.window(sql, params);
        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let pos = *i as i64 + 1;
                pos >= from && pos < to
            })
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn fetch_scalar(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Value>, PagingError> {
        self.record(sql, params)?;
        assert!(sql.starts_with("SELECT COUNT(1) FROM ( "), "not a count query: {sql}");
        match &self.count_override {
            Some(value) => Ok(value.clone()),
            None => Ok(Some(json!(self.rows.len()))),
        }
    }
}

fn mysql_query(page: i64) -> PagedQuery {
    PagedQuery::new("SELECT ID, USER_NAME FROM users")
        .dialect(Dialect::select(Some("mysql")))
        .page(page)
        .page_size(20)
}

#[tokio::test]
async fn test_empty_result_skips_page_query() {
    let table = FakeTable::with_rows(0);
    let page = mysql_query(1)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.start(), 0);
    assert_eq!(page.total_count(), 0);
    assert_eq!(page.current_page(), 1);
    assert_eq!(page.page_count(), 1);
    assert_eq!(page.page_size(), 20);

    let calls = table.calls();
    assert_eq!(calls.len(), 1, "only the count query should run");
    assert_eq!(
        calls[0].0,
        "SELECT COUNT(1) FROM ( SELECT ID, USER_NAME FROM users ) AS tc_"
    );
}

#[tokio::test]
async fn test_first_page() {
    let table = FakeTable::with_rows(45);
    let page = mysql_query(1)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap();

    assert_eq!(page.available_count(), 20);
    assert_eq!(page.start(), 1);
    assert_eq!(page.total_count(), 45);
    assert_eq!(page.current_page(), 1);
    assert_eq!(page.page_count(), 3);
    assert_eq!(page.rows()[0], vec!["1", "user1"]);

    let calls = table.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].0, "SELECT ID, USER_NAME FROM users LIMIT ?");
    assert_eq!(calls[1].1, vec![json!(20)]);
}

#[tokio::test]
async fn test_last_partial_page() {
    let table = FakeTable::with_rows(45);
    let page = mysql_query(3)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap();

    assert_eq!(page.available_count(), 5);
    assert_eq!(page.start(), 41);
    assert_eq!(page.end(), 45);
    assert_eq!(page.current_page(), 3);
    assert_eq!(page.page_count(), 3);
    assert_eq!(page.rows()[4][0], "45");

    let calls = table.calls();
    assert_eq!(calls[1].0, "SELECT ID, USER_NAME FROM users LIMIT ?, ?");
    assert_eq!(calls[1].1, vec![json!(40), json!(20)]);
}

#[tokio::test]
async fn test_page_past_the_end() {
    let table = FakeTable::with_rows(45);
    let page = mysql_query(99)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_count(), 45);
    assert_eq!(page.start(), 1961);
    assert_eq!(page.current_page(), 99);
    assert_eq!(page.page_count(), 3);
    assert_eq!(table.calls().len(), 2);
}

#[tokio::test]
async fn test_rownum_second_page() {
    let table = FakeTable::with_rows(45);
    let page = PagedQuery::new("SELECT ID, USER_NAME FROM users WHERE ID > ?")
        .dialect(Dialect::select(Some("oracle")))
        .page(2)
        .page_size(20)
        .param(0)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap();

    assert_eq!(page.available_count(), 20);
    assert_eq!(page.start(), 21);
    assert_eq!(page.rows()[0][0], "21");
    assert_eq!(page.rows()[19][0], "40");

    let calls = table.calls();
    assert_eq!(
        calls[0].0,
        "SELECT COUNT(1) FROM ( SELECT ID, USER_NAME FROM users WHERE ID > ? ) tc_"
    );
    assert_eq!(calls[0].1, vec![json!(0)]);
    assert_eq!(calls[1].1, vec![json!(0), json!(41), json!(21)]);
}

#[tokio::test]
async fn test_rownum_first_page() {
    let table = FakeTable::with_rows(5);
    let page = PagedQuery::new("SELECT ID, USER_NAME FROM users")
        .page_size(3)
        .build()
        .unwrap()
        .execute(&table, &NativeMapMapper)
        .await
        .unwrap();

    assert_eq!(page.available_count(), 3);
    assert_eq!(page.page_count(), 2);
    assert_eq!(page.rows()[2].get("id"), Some(&json!(3)));
    assert_eq!(table.calls()[1].1, vec![json!(4)]);
}

#[tokio::test]
async fn test_invalid_page_size_runs_nothing() {
    let err = mysql_query(1).page_size(0).build().unwrap_err();
    assert!(matches!(err, PagingError::InvalidPageSize(0)));
}

#[tokio::test]
async fn test_count_failure_propagates() {
    let table = FakeTable::with_rows(45).failing_on("COUNT(1)");
    let err = mysql_query(1)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap_err();

    assert!(matches!(err, PagingError::QueryFailed { .. }));
    assert_eq!(table.calls().len(), 1);
}

#[tokio::test]
async fn test_page_failure_returns_no_partial_page() {
    let table = FakeTable::with_rows(45).failing_on("LIMIT");
    let result = mysql_query(2)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await;

    match result {
        Err(PagingError::QueryFailed { sql, .. }) => {
            assert_eq!(sql, "SELECT ID, USER_NAME FROM users LIMIT ?, ?");
        }
        other => panic!("expected query failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_or_null_count_is_empty() {
    for scalar in [None, Some(Value::Null)] {
        let table = FakeTable::with_rows(45).count_returns(scalar);
        let page = mysql_query(1)
            .build()
            .unwrap()
            .execute(&table, &StringArrayMapper)
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_count(), 0);
        assert_eq!(table.calls().len(), 1);
    }
}

#[tokio::test]
async fn test_textual_count_is_accepted() {
    let table = FakeTable::with_rows(45).count_returns(Some(json!("45")));
    let page = mysql_query(3)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap();
    assert_eq!(page.total_count(), 45);
    assert_eq!(page.available_count(), 5);
}

#[tokio::test]
async fn test_garbage_count_is_rejected() {
    let table = FakeTable::with_rows(45).count_returns(Some(json!("lots")));
    let err = mysql_query(1)
        .build()
        .unwrap()
        .execute(&table, &StringArrayMapper)
        .await
        .unwrap_err();
    assert!(matches!(err, PagingError::InvalidCount(_)));
}

#[tokio::test]
async fn test_caller_params_are_not_modified() {
    let table = FakeTable::with_rows(45);
    let params = vec![json!("a"), json!(1)];
    let stmt = PagedQuery::new("SELECT ID, USER_NAME FROM users WHERE x = ? AND y = ?")
        .dialect(Dialect::Offset)
        .page(2)
        .params(params.clone())
        .build()
        .unwrap();

    stmt.clone().execute(&table, &StringArrayMapper).await.unwrap();

    assert_eq!(stmt.count_params(), params.as_slice());
    let calls = table.calls();
    assert_eq!(calls[0].1, params);
    assert_eq!(calls[1].1, vec![json!("a"), json!(1), json!(20), json!(20)]);
}

#[tokio::test]
async fn test_typed_rows_and_shared_executor() {
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct User {
        id: i64,
        user_name: String,
    }

    let table = Arc::new(FakeTable::with_rows(45));
    let mapper = TypedMapper::<User>::new().unwrap();
    let page = mysql_query(2)
        .build()
        .unwrap()
        .execute(&table, &mapper)
        .await
        .unwrap();

    let first = &page.rows()[0];
    assert_eq!(first.id, 21);
    assert_eq!(first.user_name, " user21 ");
    assert_eq!(table.calls().len(), 2);
}

#[tokio::test]
async fn test_mapping_failure_aborts() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Strict {
        id: String,
    }

    let table = FakeTable::with_rows(3);
    let mapper = TypedMapper::<Strict>::new().unwrap();
    let err = mysql_query(1)
        .build()
        .unwrap()
        .execute(&table, &mapper)
        .await
        .unwrap_err();
    assert!(matches!(err, PagingError::Mapping(_)));
}
