//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create an array value
    pub fn array(array: TypedArray) -> Self {
        Value::Array(Arc::new(array))
    }

    /// Create an array value from native elements
    pub fn array_of<T: Boxed>(values: impl IntoIterator<Item = T>) -> Self {
        Value::array(TypedArray::from_values(values))
    }

    /// Create a user-object value
    pub fn object(object: impl UserObject + 'static) -> Self {
        Value::Object(UserCell::new(object))
    }

    /// Create a nested map value
    pub fn params(params: ParamMap) -> Self {
        Value::Params(Arc::new(params))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Check if value is one of the nine scalar kinds
    pub fn is_scalar(&self) -> bool {
        ScalarKind::of(self).is_some()
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is a typed array
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if value is a nested map
    pub fn is_params(&self) -> bool {
        matches!(self, Value::Params(_))
    }

    /// Check if value is a user-defined object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Wire tag of this value
    pub fn value_type(&self) -> ValueType {
        ValueType::of(self)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════
    /// Borrow the payload if this handle holds a `T`
    pub fn query<T: Boxed>(&self) -> Option<&T> {
        T::query(self)
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the typed array
    pub fn as_array(&self) -> Option<&TypedArray> {
        match self {
            Value::Array(a) => Some(a.as_ref()),
            _ => None,
        }
    }

    /// Borrow the user object
    pub fn as_object(&self) -> Option<&UserCell> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Borrow the nested map
    pub fn as_params(&self) -> Option<&ParamMap> {
        match self {
            Value::Params(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Text and Copying
    // ═══════════════════════════════════════════════════════════════════
    /// Textual form: scalar text, array text form, user payload, or the
    /// text encoding of a nested map
    pub fn to_text(&self) -> String {
        match self {
            Value::Bool(b) => b.to_text(),
            Value::Byte(n) => n.to_text(),
            Value::Char(c) => c.to_text(),
            Value::Short(n) => n.to_text(),
            Value::Int(n) => n.to_text(),
            Value::Long(n) => n.to_text(),
            Value::Float(n) => n.to_text(),
            Value::Double(n) => n.to_text(),
            Value::String(s) => s.as_ref().clone(),
            Value::Array(a) => a.to_text(),
            Value::Object(o) => o.to_text(),
            Value::Params(p) => p.to_text(),
        }
    }

    /// Type-aware deep equality
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }

    /// An independent copy: nested maps are rebuilt, user objects are
    /// re-created through their own `new_instance`
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Array(a) => Value::array(a.as_ref().clone()),
            Value::Object(o) => Value::Object(o.duplicate()),
            Value::Params(p) => Value::params(p.as_ref().clone()),
            scalar => scalar.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Scalars
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,

            // Arrays compare as element sets
            (Value::Array(a), Value::Array(b)) => a == b,

            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Params(a), Value::Params(b)) => a == b,

            // Different kinds are never equal
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Byte(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Short(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<TypedArray> for Value {
    fn from(a: TypedArray) -> Self {
        Value::array(a)
    }
}

impl From<UserCell> for Value {
    fn from(o: UserCell) -> Self {
        Value::Object(o)
    }
}

impl From<ParamMap> for Value {
    fn from(p: ParamMap) -> Self {
        Value::params(p)
    }
}
