//! SQL dialects for paging
//!
//! Each dialect knows how to wrap a base query for counting, how to window it
//! to a single page and in which order the window placeholders must be bound.
//! The first page is special-cased by both dialects: it needs no lower bound,
//! which drops a placeholder (and for `ROWNUM` a subquery layer). SQL
//! generation and parameter attachment branch on the same `has_offset` flag
//! so the placeholder count always matches.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Paging dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Dialect {
    /// `LIMIT ?` / `LIMIT ?, ?` appended to the base query (MySQL family)
    Offset,
    /// Nested subqueries filtered on `ROWNUM` (Oracle family)
    #[default]
    Rownum,
}

impl Dialect {
    /// The only identifier that selects [`Dialect::Offset`]
    pub const MYSQL: &'static str = "mysql";

    /// Identifier reported for [`Dialect::Rownum`]
    pub const ORACLE: &'static str = "oracle";

    /// Pick the dialect for a configuration tag.
    ///
    /// Matching is exact and case-sensitive: `"mysql"` selects `Offset`, every
    /// other value, including an empty or missing tag, selects `Rownum`.
    pub fn select(identifier: Option<&str>) -> Self {
        match identifier {
            Some(Self::MYSQL) => Dialect::Offset,
            _ => Dialect::Rownum,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Offset => Self::MYSQL,
            Dialect::Rownum => Self::ORACLE,
        }
    }

    /// Query returning the number of rows `sql` produces
    pub fn counting_sql(&self, sql: &str) -> String {
        match self {
            Dialect::Offset => format!("SELECT COUNT(1) FROM ( {} ) AS tc_", sql),
            // Oracle does not accept AS before a table alias
            Dialect::Rownum => format!("SELECT COUNT(1) FROM ( {} ) tc_", sql),
        }
    }

    /// Query returning only the rows of one page
    pub fn page_sql(&self, sql: &str, has_offset: bool) -> String {
        match (self, has_offset) {
            (Dialect::Offset, false) => format!("{} LIMIT ?", sql),
            (Dialect::Offset, true) => format!("{} LIMIT ?, ?", sql),
            (Dialect::Rownum, false) => {
                format!("SELECT * FROM ( {} ) WHERE ROWNUM < ?", sql)
            }
            (Dialect::Rownum, true) => {
                let mut out = String::with_capacity(sql.len() + 110);
                out.push_str("SELECT * FROM ( SELECT row_.*, ROWNUM rownum_ FROM ( ");
                out.push_str(sql);
                out.push_str(" ) row_ WHERE ROWNUM < ? ) WHERE rownum_ >= ?");
                out
            }
        }
    }

    /// Copy `params` and append the window values in placeholder order.
    ///
    /// `start_index` is the 1-based position of the first row of the page.
    pub fn attach_page_params(
        &self,
        params: &[Value],
        has_offset: bool,
        start_index: i64,
        page_size: i64,
    ) -> Vec<Value> {
        let mut out = Vec::with_capacity(params.len() + 2);
        out.extend_from_slice(params);

        match (self, has_offset) {
            (Dialect::Offset, false) => {
                out.push(Value::from(page_size));
            }
            (Dialect::Offset, true) => {
                out.push(Value::from(start_index - 1));
                out.push(Value::from(page_size));
            }
            (Dialect::Rownum, false) => {
                out.push(Value::from(start_index.saturating_add(page_size)));
            }
            (Dialect::Rownum, true) => {
                // upper bound comes first in the generated SQL
                out.push(Value::from(start_index.saturating_add(page_size)));
                out.push(Value::from(start_index));
            }
        }

        out
    }
}

impl From<&str> for Dialect {
    fn from(identifier: &str) -> Self {
        Self::select(Some(identifier))
    }
}

impl From<String> for Dialect {
    fn from(identifier: String) -> Self {
        Self::select(Some(&identifier))
    }
}

impl From<Option<&str>> for Dialect {
    fn from(identifier: Option<&str>) -> Self {
        Self::select(identifier)
    }
}

impl From<Dialect> for String {
    fn from(dialect: Dialect) -> Self {
        dialect.name().to_string()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "SELECT id FROM t WHERE a = ?";

    #[test]
    fn test_select_mysql_is_exact() {
        assert_eq!(Dialect::select(Some("mysql")), Dialect::Offset);
        assert_eq!(Dialect::select(Some("MySQL")), Dialect::Rownum);
        assert_eq!(Dialect::select(Some(" mysql")), Dialect::Rownum);
    }

    #[test]
    fn test_select_falls_back_to_rownum() {
        assert_eq!(Dialect::select(Some("anything-else")), Dialect::Rownum);
        assert_eq!(Dialect::select(Some("")), Dialect::Rownum);
        assert_eq!(Dialect::select(None), Dialect::Rownum);
        assert_eq!(Dialect::from("oracle"), Dialect::Rownum);
    }

    #[test]
    fn test_select_is_idempotent() {
        let a = Dialect::select(Some("mysql"));
        let b = Dialect::select(Some("mysql"));
        assert_eq!(a, b);
        assert_eq!(a.page_sql(BASE, true), b.page_sql(BASE, true));
    }

    #[test]
    fn test_counting_sql() {
        assert_eq!(
            Dialect::Offset.counting_sql(BASE),
            "SELECT COUNT(1) FROM ( SELECT id FROM t WHERE a = ? ) AS tc_"
        );
        assert_eq!(
            Dialect::Rownum.counting_sql(BASE),
            "SELECT COUNT(1) FROM ( SELECT id FROM t WHERE a = ? ) tc_"
        );
    }

    #[test]
    fn test_offset_page_sql() {
        assert_eq!(
            Dialect::Offset.page_sql(BASE, false),
            "SELECT id FROM t WHERE a = ? LIMIT ?"
        );
        assert_eq!(
            Dialect::Offset.page_sql(BASE, true),
            "SELECT id FROM t WHERE a = ? LIMIT ?, ?"
        );
    }

    #[test]
    fn test_rownum_page_sql() {
        assert_eq!(
            Dialect::Rownum.page_sql(BASE, false),
            "SELECT * FROM ( SELECT id FROM t WHERE a = ? ) WHERE ROWNUM < ?"
        );
        assert_eq!(
            Dialect::Rownum.page_sql(BASE, true),
            "SELECT * FROM ( SELECT row_.*, ROWNUM rownum_ FROM ( SELECT id FROM t WHERE a = ? ) row_ WHERE ROWNUM < ? ) WHERE rownum_ >= ?"
        );
    }

    #[test]
    fn test_offset_params() {
        let base = vec![json!("x")];
        assert_eq!(
            Dialect::Offset.attach_page_params(&base, false, 1, 20),
            vec![json!("x"), json!(20)]
        );
        assert_eq!(
            Dialect::Offset.attach_page_params(&base, true, 21, 20),
            vec![json!("x"), json!(20), json!(20)]
        );
    }

    #[test]
    fn test_rownum_params() {
        assert_eq!(
            Dialect::Rownum.attach_page_params(&[], false, 1, 20),
            vec![json!(21)]
        );
        assert_eq!(
            Dialect::Rownum.attach_page_params(&[], true, 21, 20),
            vec![json!(41), json!(21)]
        );
    }

    #[test]
    fn test_rownum_upper_bound_saturates() {
        assert_eq!(
            Dialect::Rownum.attach_page_params(&[], false, 1, i64::MAX),
            vec![json!(i64::MAX)]
        );
        assert_eq!(
            Dialect::Rownum.attach_page_params(&[], true, i64::MAX, 20),
            vec![json!(i64::MAX), json!(i64::MAX)]
        );
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        for dialect in [Dialect::Offset, Dialect::Rownum] {
            for has_offset in [false, true] {
                let sql = dialect.page_sql(BASE, has_offset);
                let params = dialect.attach_page_params(&[json!(1)], has_offset, 41, 20);
                assert_eq!(sql.matches('?').count(), params.len(), "{dialect} {has_offset}");
            }
        }
    }

    #[test]
    fn test_attach_does_not_touch_input() {
        let base = vec![json!(1), json!(2)];
        let _ = Dialect::Rownum.attach_page_params(&base, true, 21, 20);
        assert_eq!(base, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_serde_goes_through_selector() {
        let d: Dialect = serde_json::from_str(r#""mysql""#).unwrap();
        assert_eq!(d, Dialect::Offset);
        let d: Dialect = serde_json::from_str(r#""postgres""#).unwrap();
        assert_eq!(d, Dialect::Rownum);
        assert_eq!(serde_json::to_string(&Dialect::Rownum).unwrap(), r#""oracle""#);
    }
}
