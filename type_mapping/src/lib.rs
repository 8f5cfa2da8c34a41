//! Row mapping between raw result rows and caller-facing shapes
//! This crate provides the row representation and mappers used across the dbhelper ecosystem

pub mod errors;
pub mod introspect;
pub mod map;
pub mod mapper;
pub mod naming;
pub mod row;
pub mod text;

pub use errors::MappingError;
pub use map::CaseInsensitiveMap;
pub use mapper::{
    NativeArrayMapper, NativeMapMapper, RowMapper, StringArrayMapper, StringMapMapper,
    TypedMapper,
};
pub use naming::to_camel_case;
pub use row::RawRow;
pub use text::value_to_text;
