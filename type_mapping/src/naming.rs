//! Column name normalization
//!
//! Database columns are usually `SNAKE_CASE` while struct fields may be
//! renamed to camelCase through serde. `to_camel_case` turns the former into
//! the latter so the typed mapper can try it before a literal match.

/// Convert a column label such as `USER_NAME` to `userName`.
///
/// The label is lowercased, every character following an underscore is
/// uppercased, and the underscores are dropped. The first character is only
/// uppercased when an underscore precedes it, so `_id` becomes `Id`.
pub fn to_camel_case(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut upper_next = false;

    for (i, ch) in column.chars().enumerate() {
        if ch == '_' {
            upper_next = true;
            continue;
        }
        if upper_next && i > 0 {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        upper_next = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(to_camel_case("USER_NAME"), "userName");
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("created_at_utc"), "createdAtUtc");
    }

    #[test]
    fn test_plain_and_edge_labels() {
        assert_eq!(to_camel_case("ID"), "id");
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("_id"), "Id");
        assert_eq!(to_camel_case("a__b"), "aB");
        assert_eq!(to_camel_case("trailing_"), "trailing");
    }
}
