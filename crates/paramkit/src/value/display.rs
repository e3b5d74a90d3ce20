//! Display and Debug implementations for Value

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Byte(n) => write!(f, "{}u8", n),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::Short(n) => write!(f, "{}i16", n),
            Value::Int(n) => write!(f, "{}", n), // Default integer type
            Value::Long(n) => write!(f, "{}i64", n),
            Value::Float(n) => write!(f, "{}f32", n),
            Value::Double(n) => write!(f, "{}", n), // Default float type
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Array(a) => write!(f, "{:?}", a.as_ref()),
            Value::Object(o) => write!(f, "<{} {:?}>", o.class_name(), o.to_text()),
            Value::Params(p) => write!(f, "{:?}", p.as_ref()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is the textual form, Debug is more detailed
        match self {
            Value::String(s) => write!(f, "{}", s.as_ref()), // No quotes for Display
            _ => f.write_str(&self.to_text()),
        }
    }
}

impl fmt::Debug for TypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; ", self.kind())?;
        for (i, slot) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(value) => write!(f, "{:?}", value)?,
                None => write!(f, "_")?,
            }
        }
        write!(f, "]")
    }
}
