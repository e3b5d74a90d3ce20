//! Value representation for parameter map entries

mod array;
mod display;
mod impls;
mod kind;
mod object;
mod scalar;

pub use array::{Iter, TypedArray};
pub use kind::{ScalarKind, ValueType};
pub use object::{UserCell, UserObject, UserObjectFactory, UserObjectRegistry};
pub use scalar::{format_float, parse_scalar, Boxed, DOUBLE_FRACTION_DIGITS, FLOAT_FRACTION_DIGITS};

use std::sync::Arc;

use crate::params::ParamMap;

/// A handle to one parameter value.
///
/// Values are organized into two tiers:
/// - Tier 1: Inline scalars (no allocation)
/// - Tier 2: Heap-allocated values (Arc-wrapped, shared on clone)
///
/// A handle is immutable once built. Cloning shares the payload; use
/// [`Value::deep_copy`] for an independent copy.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Scalars
    // ═══════════════════════════════════════════════════════════════════
    /// Boolean: `true` or `false`
    Bool(bool),

    /// 8-bit unsigned byte
    Byte(u8),

    /// Unicode scalar value
    Char(char),

    /// 16-bit signed integer
    Short(i16),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    Long(i64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Heap-Allocated Values
    // ═══════════════════════════════════════════════════════════════════
    /// Heap-allocated string
    String(Arc<String>),

    /// Homogeneous typed array
    Array(Arc<TypedArray>),

    /// User-defined value
    Object(UserCell),

    /// Nested parameter map
    Params(Arc<ParamMap>),
}
