//! Row mappers
//!
//! A mapper turns one `RawRow` into the shape the caller asked for. The
//! mappers here cover positional text, case-insensitive text maps, the raw
//! values themselves and typed structs matched by column name.

use crate::errors::MappingError;
use crate::introspect::struct_fields;
use crate::map::CaseInsensitiveMap;
use crate::naming::to_camel_case;
use crate::row::RawRow;
use crate::text::value_to_text;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Converts a raw row into a caller-chosen shape
pub trait RowMapper: Send + Sync {
    type Output;

    fn map_row(&self, row: &RawRow) -> Result<Self::Output, MappingError>;

    /// Map every row, stopping at the first failure
    fn map_rows(&self, rows: &[RawRow]) -> Result<Vec<Self::Output>, MappingError> {
        rows.iter().map(|row| self.map_row(row)).collect()
    }
}

/// Columns as trimmed text in select-list order, NULL as `""`
#[derive(Debug, Clone, Copy, Default)]
pub struct StringArrayMapper;

impl RowMapper for StringArrayMapper {
    type Output = Vec<String>;

    fn map_row(&self, row: &RawRow) -> Result<Self::Output, MappingError> {
        Ok(row.values().iter().map(value_to_text).collect())
    }
}

/// Column label to trimmed text, looked up case-insensitively
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMapMapper;

impl RowMapper for StringMapMapper {
    type Output = CaseInsensitiveMap<String>;

    fn map_row(&self, row: &RawRow) -> Result<Self::Output, MappingError> {
        let mut map = CaseInsensitiveMap::with_capacity(row.len());
        for (label, value) in row.iter() {
            map.insert(label, value_to_text(value));
        }
        Ok(map)
    }
}

/// Column values as decoded by the executor
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeArrayMapper;

impl RowMapper for NativeArrayMapper {
    type Output = Vec<Value>;

    fn map_row(&self, row: &RawRow) -> Result<Self::Output, MappingError> {
        Ok(row.values().to_vec())
    }
}

/// Column label to decoded value, looked up case-insensitively
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMapMapper;

impl RowMapper for NativeMapMapper {
    type Output = CaseInsensitiveMap<Value>;

    fn map_row(&self, row: &RawRow) -> Result<Self::Output, MappingError> {
        let mut map = CaseInsensitiveMap::with_capacity(row.len());
        for (label, value) in row.iter() {
            map.insert(label, value.clone());
        }
        Ok(map)
    }
}

/// Maps rows onto a struct by matching column labels to serde field names.
///
/// A label matches a field when its camelCase form (`USER_NAME` ->
/// `userName`) equals the field name ignoring case; labels that fail that
/// pass are compared literally, again ignoring case. Columns without a
/// matching field are dropped. Fields without a column are left to serde,
/// so `Option` and `#[serde(default)]` fields may be absent.
pub struct TypedMapper<T> {
    fields: &'static [&'static str],
    _phantom: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for TypedMapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedMapper")
            .field("target", &std::any::type_name::<T>())
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T> Clone for TypedMapper<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields,
            _phantom: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> TypedMapper<T> {
    pub fn new() -> Result<Self, MappingError> {
        let fields = struct_fields::<T>()
            .ok_or(MappingError::UnsupportedTarget(std::any::type_name::<T>()))?;
        Ok(Self {
            fields,
            _phantom: PhantomData,
        })
    }

    /// Field names discovered for the target type
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// The field a column label binds to, if any
    pub fn field_for(&self, label: &str) -> Option<&'static str> {
        let camel = to_camel_case(label);
        self.fields
            .iter()
            .find(|field| camel.eq_ignore_ascii_case(field))
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|field| label.eq_ignore_ascii_case(field))
            })
            .copied()
    }
}

impl<T: DeserializeOwned> RowMapper for TypedMapper<T> {
    type Output = T;

    fn map_row(&self, row: &RawRow) -> Result<T, MappingError> {
        let mut object = Map::with_capacity(row.len());
        for (label, value) in row.iter() {
            if let Some(field) = self.field_for(label) {
                object.insert(field.to_string(), value.clone());
            }
        }

        serde_json::from_value(Value::Object(object)).map_err(|source| {
            MappingError::Deserialize {
                target: std::any::type_name::<T>(),
                source,
            }
        })
    }
}
