//! Error types for row mapping
//!
//! This module defines the errors a row mapper can report while
//! converting a raw row into the caller's target shape.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Column index {index} out of range for row with {len} columns")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("Failed to deserialize row into {target}: {source}")]
    Deserialize {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported mapping target {0}: only structs with named fields can be mapped by column name")]
    UnsupportedTarget(&'static str),
}
