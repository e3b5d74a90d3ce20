//! Text and binary encodings of a parameter map
//!
//! Both encodings share the tag table in [`ValueType`](crate::value::ValueType)
//! and round-trip every supported kind.

pub mod binary;
pub mod parcel;
pub mod text;

pub use parcel::{WireReader, WireWriter};
pub use text::validate;
