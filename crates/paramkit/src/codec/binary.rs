//! Length-prefixed binary wire form of a parameter map
//!
//! A map body is an `i32` entry count followed by the entries. Typed entries
//! come first in key order, then the undecoded records in arrival order.
//! Every map, the outermost one included, is sent as an envelope carrying
//! its body length twice followed by the body:
//!
//! ```text
//! i32 body_len, i32 body_len, body
//! ```

use log::debug;

use super::parcel::{len_to_i32, WireReader, WireWriter};
use crate::context::CodecContext;
use crate::error::{Result, WireError};
use crate::params::{ParamMap, UnsupportedData};
use crate::value::{ScalarKind, TypedArray, Value, ValueType};

type WireResult<T> = std::result::Result<T, WireError>;

// ═══════════════════════════════════════════════════════════════════
// Encoding
// ═══════════════════════════════════════════════════════════════════

/// Encode `params`, including any undecoded records it carries.
pub fn marshal(params: &ParamMap) -> Result<Vec<u8>> {
    let mut writer = WireWriter::new();
    write_map(params, &mut writer)?;
    Ok(writer.into_bytes())
}

/// Body into a scratch buffer, then the envelope.
fn write_map(params: &ParamMap, w: &mut WireWriter) -> WireResult<()> {
    let mut body = WireWriter::new();
    write_body(params, &mut body)?;
    w.write_framed(&body.into_bytes())
}

fn write_body(params: &ParamMap, w: &mut WireWriter) -> WireResult<()> {
    w.write_i32(len_to_i32(params.len() + params.unsupported_len())?);
    for (key, value) in params {
        w.write_string16(key)?;
        write_value(value, w)?;
    }
    for record in params.unsupported() {
        w.write_string16(&record.key)?;
        w.write_i32(record.type_tag);
        w.write_framed(&record.bytes)?;
    }
    Ok(())
}

fn write_value(value: &Value, w: &mut WireWriter) -> WireResult<()> {
    w.write_i32(value.value_type().tag());
    match value {
        Value::Array(array) => {
            w.write_i32(array.array_type().tag());
            w.write_i32(len_to_i32(array.values().count())?);
            for element in array.values() {
                write_scalar(element, w)?;
            }
        }
        Value::Params(nested) => write_map(nested, w)?,
        Value::Object(object) => {
            w.write_string16(object.class_name())?;
            w.write_string16(&object.to_text())?;
        }
        scalar => write_scalar(scalar, w)?,
    }
    Ok(())
}

/// Payload of a scalar, without its tag.
fn write_scalar(value: &Value, w: &mut WireWriter) -> WireResult<()> {
    match value {
        Value::Bool(b) => w.write_bool(*b),
        Value::Byte(n) => w.write_u8(*n),
        Value::Char(c) => w.write_i32(*c as i32),
        Value::Short(n) => w.write_i16(*n),
        Value::Int(n) => w.write_i32(*n),
        Value::Long(n) => w.write_i64(*n),
        Value::Float(n) => w.write_f32(*n),
        Value::Double(n) => w.write_f64(*n),
        Value::String(s) => w.write_string16(s)?,
        // Only scalars reach here: arrays hold scalars and write_value
        // handles the heap kinds itself.
        Value::Array(_) | Value::Object(_) | Value::Params(_) => {}
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════
// Decoding
// ═══════════════════════════════════════════════════════════════════

/// Decode an enveloped map. Any malformed field fails the whole decode.
pub fn unmarshal(bytes: &[u8], ctx: &CodecContext) -> WireResult<ParamMap> {
    let mut reader = WireReader::new(bytes);
    read_map(&mut reader, ctx, 0)
}

fn read_map(r: &mut WireReader<'_>, ctx: &CodecContext, depth: usize) -> WireResult<ParamMap> {
    let body = r.read_framed()?;
    read_body(&mut WireReader::new(body), ctx, depth)
}

fn read_body(r: &mut WireReader<'_>, ctx: &CodecContext, depth: usize) -> WireResult<ParamMap> {
    let count = r.read_len()?;
    let mut params = ParamMap::new();
    for _ in 0..count {
        let key = r.read_string16()?;
        let tag = r.read_i32()?;
        match ValueType::from_tag(tag) {
            Some(ty) => {
                if let Some(value) = read_value(r, ty, ctx, depth)? {
                    params.set(key, value);
                }
            }
            None => {
                let bytes = r.read_framed_limited(ctx.limits.max_unsupported_len)?;
                debug!("keeping {} bytes of unsupported type {} under {:?}", bytes.len(), tag, key);
                params.insert_unsupported(UnsupportedData::new(key, tag, bytes.to_vec()));
            }
        }
    }
    Ok(params)
}

/// Read one payload. `Ok(None)` means the entry is dropped but decoding
/// continues.
fn read_value(
    r: &mut WireReader<'_>,
    ty: ValueType,
    ctx: &CodecContext,
    depth: usize,
) -> WireResult<Option<Value>> {
    if let Some(kind) = ty.scalar_kind() {
        return read_scalar(r, kind).map(Some);
    }
    if let Some(kind) = ty.element_kind() {
        return read_array(r, kind).map(Some);
    }
    let value = match ty {
        ValueType::Array => {
            let array_tag = r.read_i32()?;
            let kind = ValueType::from_tag(array_tag)
                .and_then(ValueType::element_kind)
                .ok_or(WireError::UnknownArrayTag(array_tag))?;
            Some(read_array(r, kind)?)
        }
        ValueType::Params => {
            let nested_depth = depth + 1;
            if !ctx.depth_allowed(nested_depth) {
                return Err(WireError::DepthExceeded(nested_depth));
            }
            Some(Value::params(read_map(r, ctx, nested_depth)?))
        }
        ValueType::UserObject => {
            let class_name = r.read_string16()?;
            let payload = r.read_string16()?;
            ctx.registry
                .restore(&class_name, &payload)
                .map(Value::Object)
        }
        _ => None,
    };
    Ok(value)
}

fn read_array(r: &mut WireReader<'_>, kind: ScalarKind) -> WireResult<Value> {
    let count = r.read_len()?;
    // Every element takes at least one byte.
    if count > r.remaining() {
        return Err(WireError::UnexpectedEof {
            needed: count,
            remaining: r.remaining(),
        });
    }
    let mut array = TypedArray::new(count, kind);
    for index in 0..count {
        array.set(index, read_scalar(r, kind)?);
    }
    Ok(Value::array(array))
}

fn read_scalar(r: &mut WireReader<'_>, kind: ScalarKind) -> WireResult<Value> {
    let value = match kind {
        ScalarKind::Bool => Value::Bool(r.read_bool()?),
        ScalarKind::Byte => Value::Byte(r.read_u8()?),
        ScalarKind::Char => {
            let code = r.read_i32()? as u32;
            Value::Char(char::from_u32(code).ok_or(WireError::InvalidChar(code))?)
        }
        ScalarKind::Short => Value::Short(r.read_i16()?),
        ScalarKind::Int => Value::Int(r.read_i32()?),
        ScalarKind::Long => Value::Long(r.read_i64()?),
        ScalarKind::Float => Value::Float(r.read_f32()?),
        ScalarKind::Double => Value::Double(r.read_f64()?),
        ScalarKind::String => Value::string(r.read_string16()?),
    };
    Ok(value)
}
