//! Scalar kinds and the published type-tag enumeration

use std::fmt;

use super::Value;

/// The closed set of scalar kinds a boxed value or array element can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// `u8`
    Byte,
    /// `char`, one Unicode code point
    Char,
    /// `i16`
    Short,
    /// `i32`
    Int,
    /// `i64`
    Long,
    /// `f32`
    Float,
    /// `f64`
    Double,
    /// UTF-8 `String`
    String,
}

impl ScalarKind {
    /// Every scalar kind, in tag order.
    pub const ALL: [ScalarKind; 9] = [
        ScalarKind::Bool,
        ScalarKind::Byte,
        ScalarKind::Char,
        ScalarKind::Short,
        ScalarKind::Int,
        ScalarKind::Long,
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::String,
    ];

    /// Signature character used by the array text form.
    pub fn signature(self) -> char {
        match self {
            ScalarKind::Bool => 'Z',
            ScalarKind::Byte => 'B',
            ScalarKind::Char => 'C',
            ScalarKind::Short => 'S',
            ScalarKind::Int => 'I',
            ScalarKind::Long => 'L',
            ScalarKind::Float => 'F',
            ScalarKind::Double => 'D',
            ScalarKind::String => 'T',
        }
    }

    /// Look a kind up by its array signature character.
    pub fn from_signature(signature: char) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.signature() == signature)
    }

    /// Tag of a single boxed value of this kind.
    pub fn value_type(self) -> ValueType {
        match self {
            ScalarKind::Bool => ValueType::Bool,
            ScalarKind::Byte => ValueType::Byte,
            ScalarKind::Char => ValueType::Char,
            ScalarKind::Short => ValueType::Short,
            ScalarKind::Int => ValueType::Int,
            ScalarKind::Long => ValueType::Long,
            ScalarKind::Float => ValueType::Float,
            ScalarKind::Double => ValueType::Double,
            ScalarKind::String => ValueType::String,
        }
    }

    /// Tag of an array whose elements are of this kind.
    pub fn array_type(self) -> ValueType {
        match self {
            ScalarKind::Bool => ValueType::BoolArray,
            ScalarKind::Byte => ValueType::ByteArray,
            ScalarKind::Char => ValueType::CharArray,
            ScalarKind::Short => ValueType::ShortArray,
            ScalarKind::Int => ValueType::IntArray,
            ScalarKind::Long => ValueType::LongArray,
            ScalarKind::Float => ValueType::FloatArray,
            ScalarKind::Double => ValueType::DoubleArray,
            ScalarKind::String => ValueType::StringArray,
        }
    }

    /// Kind of a value, if it is a scalar.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(_) => Some(ScalarKind::Bool),
            Value::Byte(_) => Some(ScalarKind::Byte),
            Value::Char(_) => Some(ScalarKind::Char),
            Value::Short(_) => Some(ScalarKind::Short),
            Value::Int(_) => Some(ScalarKind::Int),
            Value::Long(_) => Some(ScalarKind::Long),
            Value::Float(_) => Some(ScalarKind::Float),
            Value::Double(_) => Some(ScalarKind::Double),
            Value::String(_) => Some(ScalarKind::String),
            Value::Array(_) | Value::Object(_) | Value::Params(_) => None,
        }
    }

    /// The default-valued handle of this kind.
    pub fn default_value(self) -> Value {
        match self {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::Byte => Value::Byte(0),
            ScalarKind::Char => Value::Char('\0'),
            ScalarKind::Short => Value::Short(0),
            ScalarKind::Int => Value::Int(0),
            ScalarKind::Long => Value::Long(0),
            ScalarKind::Float => Value::Float(0.0),
            ScalarKind::Double => Value::Double(0.0),
            ScalarKind::String => Value::string(""),
        }
    }

    /// Lowercase kind name.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Byte => "byte",
            ScalarKind::Char => "char",
            ScalarKind::Short => "short",
            ScalarKind::Int => "int",
            ScalarKind::Long => "long",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type tags shared by the text and binary codecs.
///
/// The numeric values are a wire contract with peer runtimes and must
/// never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ValueType {
    /// No value; carries no payload
    Null = -1,
    /// Boolean
    Bool = 1,
    /// 8-bit byte
    Byte = 2,
    /// Unicode code point
    Char = 3,
    /// 16-bit integer
    Short = 4,
    /// 32-bit integer
    Int = 5,
    /// 64-bit integer
    Long = 6,
    /// 32-bit float
    Float = 7,
    /// 64-bit float
    Double = 8,
    /// UTF-8 string
    String = 9,
    /// Array of booleans
    BoolArray = 11,
    /// Array of bytes
    ByteArray = 12,
    /// Array of chars
    CharArray = 13,
    /// Array of shorts
    ShortArray = 14,
    /// Array of ints
    IntArray = 15,
    /// Array of longs
    LongArray = 16,
    /// Array of floats
    FloatArray = 17,
    /// Array of doubles
    DoubleArray = 18,
    /// Array of strings
    StringArray = 19,
    /// Nested parameter map
    Params = 101,
    /// Array of any scalar kind; the element kind travels separately
    Array = 102,
    /// User-defined value, rebuilt through the registry
    UserObject = 110,
}

impl ValueType {
    /// Numeric tag as written to the wire.
    pub fn tag(self) -> i32 {
        self as i32
    }

    /// Decode a numeric tag. Unknown tags yield `None`.
    pub fn from_tag(tag: i32) -> Option<Self> {
        let ty = match tag {
            -1 => ValueType::Null,
            1 => ValueType::Bool,
            2 => ValueType::Byte,
            3 => ValueType::Char,
            4 => ValueType::Short,
            5 => ValueType::Int,
            6 => ValueType::Long,
            7 => ValueType::Float,
            8 => ValueType::Double,
            9 => ValueType::String,
            11 => ValueType::BoolArray,
            12 => ValueType::ByteArray,
            13 => ValueType::CharArray,
            14 => ValueType::ShortArray,
            15 => ValueType::IntArray,
            16 => ValueType::LongArray,
            17 => ValueType::FloatArray,
            18 => ValueType::DoubleArray,
            19 => ValueType::StringArray,
            101 => ValueType::Params,
            102 => ValueType::Array,
            110 => ValueType::UserObject,
            _ => return None,
        };
        Some(ty)
    }

    /// Tag describing a value. Arrays report the generic [`ValueType::Array`].
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::UserObject,
            Value::Params(_) => ValueType::Params,
            other => ScalarKind::of(other)
                .map(ScalarKind::value_type)
                .unwrap_or(ValueType::Null),
        }
    }

    /// Scalar kind of a single-value tag.
    pub fn scalar_kind(self) -> Option<ScalarKind> {
        ScalarKind::ALL.into_iter().find(|k| k.value_type() == self)
    }

    /// Element kind of a typed array tag (11..=19).
    pub fn element_kind(self) -> Option<ScalarKind> {
        ScalarKind::ALL.into_iter().find(|k| k.array_type() == self)
    }
}
