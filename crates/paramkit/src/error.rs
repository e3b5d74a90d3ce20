//! Error types for paramkit codecs

use thiserror::Error;

use crate::value::Value;

/// Errors raised while reading or writing the binary wire form.
///
/// These never cross the public decode boundary as panics: the map-level
/// entry points turn any of them into "no value produced".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The buffer ended before a field could be read
    #[error("Unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the field required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// A length or count field was negative
    #[error("Negative length field: {0}")]
    NegativeLength(i32),

    /// A duplicated length pair disagreed
    #[error("Length mismatch: declared {declared}, repeated {repeated}")]
    LengthMismatch {
        /// First copy of the length
        declared: i32,
        /// Second copy of the length
        repeated: i32,
    },

    /// A length exceeded the configured limit
    #[error("Length {len} exceeds limit {max}")]
    TooLarge {
        /// Declared length
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// A length does not fit into the `i32` length fields of the format
    #[error("Length {0} does not fit in an i32 length field")]
    LengthOverflow(usize),

    /// A UTF-16 string contained unpaired surrogates
    #[error("Invalid UTF-16 string data")]
    InvalidUtf16,

    /// A UTF-8 string was not valid UTF-8
    #[error("Invalid UTF-8 string data")]
    InvalidUtf8,

    /// A char payload was not a Unicode scalar value
    #[error("Invalid char code point: {0:#x}")]
    InvalidChar(u32),

    /// An array entry carried an element tag this codec does not know
    #[error("Unknown array element tag: {0}")]
    UnknownArrayTag(i32),

    /// Nested maps went deeper than the configured limit
    #[error("Nesting depth exceeded: {0}")]
    DepthExceeded(usize),
}

/// Main error type for paramkit operations
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Binary wire form error
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    /// JSON document error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON document has no `pacmap` root member
    #[error("Missing \"pacmap\" root member")]
    MissingRoot,

    /// The wire form did not start with the expected header
    #[error("Bad header: expected {expected:?}, got {got:?}")]
    BadHeader {
        /// Expected header text
        expected: &'static str,
        /// Header that was read
        got: String,
    },
}

/// Result type alias for paramkit operations
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Human-readable kind name of a value, used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "bool",
        Value::Byte(_) => "byte",
        Value::Char(_) => "char",
        Value::Short(_) => "short",
        Value::Int(_) => "int",
        Value::Long(_) => "long",
        Value::Float(_) => "float",
        Value::Double(_) => "double",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Params(_) => "params",
    }
}
