//! Text rendering of column values
//!
//! The string mappers present every column as trimmed text with SQL NULL
//! rendered as the empty string.

use serde_json::Value;

/// Render a column value as trimmed text, NULL becomes `""`
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
