//! Boxed scalars: boxing, unboxing, locale-independent parsing and rendering

use super::{ScalarKind, Value};

/// Maximum fractional digits kept when rendering an `f32`.
pub const FLOAT_FRACTION_DIGITS: usize = 7;

/// Maximum fractional digits kept when rendering an `f64`.
pub const DOUBLE_FRACTION_DIGITS: usize = 17;

/// A Rust scalar type that can live inside a [`Value`] handle.
///
/// Implemented for the closed set `bool`, `u8`, `char`, `i16`, `i32`,
/// `i64`, `f32`, `f64` and `String`. Nothing here panics on bad input:
/// a mismatched handle unboxes to the type default, and malformed text
/// parses to the default-valued handle.
pub trait Boxed: Sized + Clone + Default {
    /// Scalar kind tag for this type
    const KIND: ScalarKind;

    /// Wrap the value in a handle.
    fn boxed(self) -> Value;

    /// Borrow the payload if `value` holds this type.
    fn query(value: &Value) -> Option<&Self>;

    /// Parse the textual form. `None` on malformed input.
    fn parse_text(text: &str) -> Option<Self>;

    /// Render the textual form.
    fn to_text(&self) -> String;

    /// Extract the payload, or the type default when `value` holds another kind.
    fn unbox(value: &Value) -> Self {
        Self::query(value).cloned().unwrap_or_default()
    }

    /// Parse text into a handle; malformed input gives the default-valued handle.
    fn parse(text: &str) -> Value {
        Self::parse_text(text).unwrap_or_default().boxed()
    }
}

// ═══════════════════════════════════════════════════════════════════
// Number Rendering
// ═══════════════════════════════════════════════════════════════════

fn format_int<I: itoa::Integer>(value: I) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(value).to_owned()
}

/// Render a float from its shortest round-trip form, keeping at most
/// `max_fraction` digits after the decimal point. An exponent suffix is
/// kept as is.
pub fn format_float<F: ryu::Float>(value: F, max_fraction: usize) -> String {
    let mut buffer = ryu::Buffer::new();
    truncate_fraction(buffer.format(value), max_fraction)
}

fn truncate_fraction(text: &str, max_fraction: usize) -> String {
    let (mantissa, exponent) = match text.find('e') {
        Some(at) => text.split_at(at),
        None => (text, ""),
    };
    match mantissa.find('.') {
        Some(dot) if mantissa.len() - dot - 1 > max_fraction => {
            format!("{}{}", &mantissa[..=dot + max_fraction], exponent)
        }
        _ => text.to_owned(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Boxed Implementations
// ═══════════════════════════════════════════════════════════════════

impl Boxed for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn boxed(self) -> Value {
        Value::Bool(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn to_text(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_owned()
    }
}

impl Boxed for u8 {
    const KIND: ScalarKind = ScalarKind::Byte;

    fn boxed(self) -> Value {
        Value::Byte(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Byte(n) => Some(n),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        format_int(*self)
    }
}

impl Boxed for char {
    const KIND: ScalarKind = ScalarKind::Char;

    fn boxed(self) -> Value {
        Value::Char(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Char(c) => Some(c),
            _ => None,
        }
    }

    // The first code point wins; trailing text is ignored.
    fn parse_text(text: &str) -> Option<Self> {
        text.chars().next()
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Boxed for i16 {
    const KIND: ScalarKind = ScalarKind::Short;

    fn boxed(self) -> Value {
        Value::Short(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Short(n) => Some(n),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        format_int(*self)
    }
}

impl Boxed for i32 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn boxed(self) -> Value {
        Value::Int(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        format_int(*self)
    }
}

impl Boxed for i64 {
    const KIND: ScalarKind = ScalarKind::Long;

    fn boxed(self) -> Value {
        Value::Long(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Long(n) => Some(n),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        format_int(*self)
    }
}

impl Boxed for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn boxed(self) -> Value {
        Value::Float(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(n) => Some(n),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        format_float(*self, FLOAT_FRACTION_DIGITS)
    }
}

impl Boxed for f64 {
    const KIND: ScalarKind = ScalarKind::Double;

    fn boxed(self) -> Value {
        Value::Double(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::Double(n) => Some(n),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn to_text(&self) -> String {
        format_float(*self, DOUBLE_FRACTION_DIGITS)
    }
}

impl Boxed for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn boxed(self) -> Value {
        Value::string(self)
    }

    fn query(value: &Value) -> Option<&Self> {
        match value {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    fn parse_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

/// Parse `text` as a scalar of `kind`. `None` on malformed input.
pub fn parse_scalar(kind: ScalarKind, text: &str) -> Option<Value> {
    fn boxed<T: Boxed>(text: &str) -> Option<Value> {
        T::parse_text(text).map(Boxed::boxed)
    }

    match kind {
        ScalarKind::Bool => boxed::<bool>(text),
        ScalarKind::Byte => boxed::<u8>(text),
        ScalarKind::Char => boxed::<char>(text),
        ScalarKind::Short => boxed::<i16>(text),
        ScalarKind::Int => boxed::<i32>(text),
        ScalarKind::Long => boxed::<i64>(text),
        ScalarKind::Float => boxed::<f32>(text),
        ScalarKind::Double => boxed::<f64>(text),
        ScalarKind::String => boxed::<String>(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_and_query() {
        let v = 42i32.boxed();
        assert_eq!(i32::query(&v), Some(&42));
        assert_eq!(i64::query(&v), None);
        assert_eq!(String::query(&v), None);
    }

    #[test]
    fn test_unbox_mismatch_gives_default() {
        let v = Value::string("hello");
        assert_eq!(i32::unbox(&v), 0);
        assert!(!bool::unbox(&v));
        assert_eq!(String::unbox(&v), "hello");
    }

    #[test]
    fn test_parse_malformed_gives_default_handle() {
        assert_eq!(i32::parse("forty-two"), Value::Int(0));
        assert_eq!(bool::parse("yes"), Value::Bool(false));
        assert_eq!(u8::parse("300"), Value::Byte(0));
        assert_eq!(char::parse(""), Value::Char('\0'));
        assert_eq!(f64::parse("1,5"), Value::Double(0.0));
    }

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(bool::parse("true"), Value::Bool(true));
        assert_eq!(u8::parse("129"), Value::Byte(129));
        assert_eq!(char::parse("abc"), Value::Char('a'));
        assert_eq!(i16::parse("-7"), Value::Short(-7));
        assert_eq!(i64::parse("9223372036854775807"), Value::Long(i64::MAX));
        assert_eq!(f32::parse(" 2.5 "), Value::Float(2.5));
    }

    #[test]
    fn test_integer_text() {
        assert_eq!(i64::MIN.to_text(), "-9223372036854775808");
        assert_eq!(129u8.to_text(), "129");
        assert_eq!((-12i16).to_text(), "-12");
    }

    #[test]
    fn test_float_fraction_truncation() {
        assert_eq!(1.5f32.to_text(), "1.5");
        assert_eq!(1.0f64.to_text(), "1.0");
        assert_eq!(0.12345679f32.to_text(), "0.1234567");
        assert_eq!(truncate_fraction("1.23456789e-7", 3), "1.234e-7");
        assert_eq!(truncate_fraction("12.5", 7), "12.5");
    }

    #[test]
    fn test_parse_scalar_dispatch() {
        assert_eq!(parse_scalar(ScalarKind::Int, "5"), Some(Value::Int(5)));
        assert_eq!(parse_scalar(ScalarKind::Int, "x"), None);
        assert_eq!(
            parse_scalar(ScalarKind::String, "x"),
            Some(Value::string("x"))
        );
    }
}
