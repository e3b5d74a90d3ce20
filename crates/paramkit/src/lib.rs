//! # paramkit
//!
//! Boxed values and a recursive parameter map for passing parameters
//! across process boundaries.
//!
//! A [`ParamMap`] holds string keys mapped to [`Value`] handles: nine boxed
//! scalar kinds, homogeneous [`TypedArray`]s, user-defined objects rebuilt
//! through a [`UserObjectRegistry`], and nested maps. Every map has two
//! encodings that round-trip each other's content:
//!
//! - **Text form**: a brace-delimited, self-describing string
//! - **Binary wire form**: a length-prefixed parcel layout that carries
//!   entries of unknown type through unchanged
//!
//! [`PacMap`] wraps a map in a mutex for shared mutation and adds a JSON
//! document form.
//!
//! ## Architecture
//!
//! - **Values**: [`Value`], [`Boxed`], [`TypedArray`], [`UserCell`]
//! - **Container**: [`ParamMap`], [`UnsupportedData`]
//! - **Codecs**: [`codec::text`], [`codec::binary`], [`codec::parcel`]
//! - **Configuration**: [`CodecContext`], [`CodecLimits`]
//!
//! The library logs through the `log` facade and never installs a logger.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod context;
pub mod error;
pub mod pac_map;
pub mod params;
pub mod value;

// Re-export main types
pub use context::{CodecContext, CodecLimits};
pub use error::{ParamsError, Result, WireError};
pub use pac_map::PacMap;
pub use params::{ParamMap, UnsupportedData};
pub use value::{
    Boxed, ScalarKind, TypedArray, UserCell, UserObject, UserObjectFactory, UserObjectRegistry,
    Value, ValueType,
};

/// paramkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
