//! JSON document form of a [`PacMap`](super::PacMap)
//!
//! ```text
//! {"pacmap":{"<key>":{"type":<code>,"data":<data>[,"class":"<name>"]}}}
//! ```
//!
//! Longs, floats and doubles travel as strings; chars and bytes as integer
//! code points; bool arrays as `0`/`1`.

use log::warn;
use serde_json::{json, Map, Value as JsonValue};

use crate::context::CodecContext;
use crate::error::{ParamsError, Result};
use crate::params::ParamMap;
use crate::value::{Boxed, ScalarKind, TypedArray, UserCell, Value};

/// Member holding the map in the document root.
pub const ROOT_KEY: &str = "pacmap";

/// Item type codes of the document form.
pub mod codes {
    /// `i16`
    pub const SHORT: i64 = 0x1;
    /// `i32`
    pub const INTEGER: i64 = 0x2;
    /// `i64`, carried as a string
    pub const LONG: i64 = 0x3;
    /// `char`, carried as its code point
    pub const CHAR: i64 = 0x4;
    /// `u8`
    pub const BYTE: i64 = 0x5;
    /// `bool`
    pub const BOOLEAN: i64 = 0x7;
    /// `f32`, carried as a string
    pub const FLOAT: i64 = 0x8;
    /// `f64`, carried as a string
    pub const DOUBLE: i64 = 0x9;
    /// `String`
    pub const STRING: i64 = 0xA;
    /// Array of `i16`
    pub const ARRAY_SHORT: i64 = 0x100;
    /// Array of `i32`
    pub const ARRAY_INTEGER: i64 = 0x200;
    /// Array of `i64`
    pub const ARRAY_LONG: i64 = 0x300;
    /// Array of `char`
    pub const ARRAY_CHAR: i64 = 0x400;
    /// Array of `u8`
    pub const ARRAY_BYTE: i64 = 0x500;
    /// Array of `bool`
    pub const ARRAY_BOOLEAN: i64 = 0x600;
    /// Array of `f32`
    pub const ARRAY_FLOAT: i64 = 0x700;
    /// Array of `f64`
    pub const ARRAY_DOUBLE: i64 = 0x800;
    /// Array of `String`
    pub const ARRAY_STRING: i64 = 0x900;
    /// User-defined object
    pub const USER_OBJECT: i64 = 0x10000;
    /// Nested map
    pub const PACMAP: i64 = 0x20000;
}

fn scalar_code(kind: ScalarKind) -> i64 {
    match kind {
        ScalarKind::Short => codes::SHORT,
        ScalarKind::Int => codes::INTEGER,
        ScalarKind::Long => codes::LONG,
        ScalarKind::Char => codes::CHAR,
        ScalarKind::Byte => codes::BYTE,
        ScalarKind::Bool => codes::BOOLEAN,
        ScalarKind::Float => codes::FLOAT,
        ScalarKind::Double => codes::DOUBLE,
        ScalarKind::String => codes::STRING,
    }
}

fn array_code(kind: ScalarKind) -> i64 {
    match kind {
        ScalarKind::Short => codes::ARRAY_SHORT,
        ScalarKind::Int => codes::ARRAY_INTEGER,
        ScalarKind::Long => codes::ARRAY_LONG,
        ScalarKind::Char => codes::ARRAY_CHAR,
        ScalarKind::Byte => codes::ARRAY_BYTE,
        ScalarKind::Bool => codes::ARRAY_BOOLEAN,
        ScalarKind::Float => codes::ARRAY_FLOAT,
        ScalarKind::Double => codes::ARRAY_DOUBLE,
        ScalarKind::String => codes::ARRAY_STRING,
    }
}

fn kind_of_code(code: i64) -> Option<(ScalarKind, bool)> {
    ScalarKind::ALL.into_iter().find_map(|kind| {
        if scalar_code(kind) == code {
            Some((kind, false))
        } else if array_code(kind) == code {
            Some((kind, true))
        } else {
            None
        }
    })
}

// ═══════════════════════════════════════════════════════════════════
// Encoding
// ═══════════════════════════════════════════════════════════════════

/// Build the full document, root member included.
pub fn to_document(params: &ParamMap) -> JsonValue {
    json!({ ROOT_KEY: map_to_json(params) })
}

/// Serialize the full document without indentation.
pub fn to_string(params: &ParamMap) -> Result<String> {
    Ok(serde_json::to_string(&to_document(params))?)
}

fn map_to_json(params: &ParamMap) -> JsonValue {
    let items: Map<String, JsonValue> = params
        .iter()
        .map(|(key, value)| (key.clone(), item_to_json(value)))
        .collect();
    JsonValue::Object(items)
}

fn item_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Array(array) => json!({
            "type": array_code(array.kind()),
            "data": array.values().map(element_to_json).collect::<Vec<_>>(),
        }),
        Value::Object(object) => json!({
            "type": codes::USER_OBJECT,
            "class": object.class_name(),
            "data": object.to_text(),
        }),
        Value::Params(nested) => json!({
            "type": codes::PACMAP,
            "data": map_to_json(nested),
        }),
        scalar => {
            let code = ScalarKind::of(scalar).map(scalar_code).unwrap_or_default();
            json!({ "type": code, "data": scalar_to_json(scalar) })
        }
    }
}

fn scalar_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::Byte(n) => json!(n),
        Value::Char(c) => json!(u32::from(*c)),
        Value::Short(n) => json!(n),
        Value::Int(n) => json!(n),
        Value::String(s) => json!(s.as_str()),
        // Long, float and double go through their text form.
        other => json!(other.to_text()),
    }
}

fn element_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(u8::from(*b)),
        other => scalar_to_json(other),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Decoding
// ═══════════════════════════════════════════════════════════════════

/// Parse a full document. Items of unknown type or with malformed data
/// are skipped; a missing root member is an error.
pub fn from_str(text: &str, ctx: &CodecContext) -> Result<ParamMap> {
    let document: JsonValue = serde_json::from_str(text)?;
    let root = document
        .get(ROOT_KEY)
        .and_then(JsonValue::as_object)
        .ok_or(ParamsError::MissingRoot)?;
    Ok(map_from_json(root, ctx, 0))
}

fn map_from_json(items: &Map<String, JsonValue>, ctx: &CodecContext, depth: usize) -> ParamMap {
    let mut params = ParamMap::new();
    for (key, item) in items {
        match item_from_json(item, ctx, depth) {
            Some(value) => params.set(key.as_str(), value),
            None => warn!("skipping pacmap item {:?}", key),
        }
    }
    params
}

fn item_from_json(item: &JsonValue, ctx: &CodecContext, depth: usize) -> Option<Value> {
    let code = item.get("type")?.as_i64()?;
    let data = item.get("data")?;
    match code {
        codes::USER_OBJECT => {
            let class_name = item.get("class")?.as_str()?;
            let payload = data.as_str()?;
            if payload.is_empty() {
                ctx.registry.create(class_name).map(|o| Value::Object(UserCell::from_box(o)))
            } else {
                ctx.registry.restore(class_name, payload).map(Value::Object)
            }
        }
        codes::PACMAP => {
            if !ctx.depth_allowed(depth + 1) {
                return None;
            }
            let nested = map_from_json(data.as_object()?, ctx, depth + 1);
            Some(Value::params(nested))
        }
        _ => match kind_of_code(code)? {
            (kind, false) => scalar_from_json(kind, data),
            (kind, true) => {
                let elements = data.as_array()?;
                let mut array = TypedArray::new(elements.len(), kind);
                for (index, element) in elements.iter().enumerate() {
                    array.set(index, element_from_json(kind, element)?);
                }
                Some(Value::array(array))
            }
        },
    }
}

fn scalar_from_json(kind: ScalarKind, data: &JsonValue) -> Option<Value> {
    let value = match kind {
        ScalarKind::Bool => Value::Bool(data.as_bool()?),
        ScalarKind::Byte => Value::Byte(u8::try_from(data.as_i64()?).ok()?),
        ScalarKind::Char => {
            let code = u32::try_from(data.as_i64()?).ok()?;
            Value::Char(char::from_u32(code)?)
        }
        ScalarKind::Short => Value::Short(i16::try_from(data.as_i64()?).ok()?),
        ScalarKind::Int => Value::Int(i32::try_from(data.as_i64()?).ok()?),
        ScalarKind::Long => Value::Long(number_or_text::<i64>(data)?),
        ScalarKind::Float => Value::Float(number_or_text::<f32>(data)?),
        ScalarKind::Double => Value::Double(number_or_text::<f64>(data)?),
        ScalarKind::String => Value::string(data.as_str()?),
    };
    Some(value)
}

fn element_from_json(kind: ScalarKind, data: &JsonValue) -> Option<Value> {
    match (kind, data.as_i64()) {
        (ScalarKind::Bool, Some(flag)) => Some(Value::Bool(flag != 0)),
        _ => scalar_from_json(kind, data),
    }
}

/// Accept either the text form or a plain JSON number.
fn number_or_text<T: Boxed>(data: &JsonValue) -> Option<T> {
    match data {
        JsonValue::String(text) => T::parse_text(text),
        JsonValue::Number(number) => T::parse_text(&number.to_string()),
        _ => None,
    }
}
