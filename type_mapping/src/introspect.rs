//! Struct field discovery through serde
//!
//! Serde hands a struct's field names to the deserializer in
//! `deserialize_struct`. `struct_fields` drives a deserializer that only
//! records that list and then bails out, which yields the names as serde
//! sees them (after `rename`/`rename_all`).

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::forward_to_deserialize_any;

#[derive(Debug)]
struct Stop;

impl std::fmt::Display for Stop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("field discovery finished")
    }
}

impl std::error::Error for Stop {}

impl de::Error for Stop {
    fn custom<T: std::fmt::Display>(_msg: T) -> Self {
        Stop
    }
}

struct FieldCollector<'a> {
    fields: &'a mut Option<&'static [&'static str]>,
}

impl<'de> Deserializer<'de> for FieldCollector<'_> {
    type Error = Stop;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Stop> {
        Err(Stop)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Stop> {
        *self.fields = Some(fields);
        Err(Stop)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// Field names of `T` when it deserializes as a struct with named fields
pub fn struct_fields<'de, T: Deserialize<'de>>() -> Option<&'static [&'static str]> {
    let mut fields = None;
    let _ = T::deserialize(FieldCollector {
        fields: &mut fields,
    });
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[allow(dead_code)]
    #[derive(Deserialize)]
    struct Plain {
        user_id: i64,
        name: String,
    }

    #[allow(dead_code)]
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Renamed {
        user_id: i64,
        created_at: String,
    }

    #[test]
    fn test_plain_struct_fields() {
        assert_eq!(struct_fields::<Plain>(), Some(&["user_id", "name"][..]));
    }

    #[test]
    fn test_renamed_struct_fields() {
        assert_eq!(
            struct_fields::<Renamed>(),
            Some(&["userId", "createdAt"][..])
        );
    }

    #[test]
    fn test_non_struct_has_no_fields() {
        assert_eq!(struct_fields::<String>(), None);
        assert_eq!(struct_fields::<Vec<i64>>(), None);
    }
}
