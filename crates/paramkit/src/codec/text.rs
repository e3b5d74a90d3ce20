//! Brace-delimited text form of a parameter map
//!
//! ```text
//! {"key":{"<tag>":"<value text>"},"nested":{"101":{...}}}
//! ```
//!
//! Keys, payloads and array elements are written as is. There is no
//! escaping, so a key or payload containing `"` (or an array element
//! containing `,`) does not survive a round trip. A lone `{` or `}` in any
//! key or payload unbalances the braces, so [`validate`] rejects the text
//! and the whole document decodes to an empty map.

use log::{debug, warn};

use crate::context::CodecContext;
use crate::params::ParamMap;
use crate::value::{parse_scalar, TypedArray, Value, ValueType};

/// Separator between class name and payload of a user object.
const CLASS_SEPARATOR: char = ':';

// ═══════════════════════════════════════════════════════════════════
// Encoding
// ═══════════════════════════════════════════════════════════════════

/// Render `params` in the text form. Undecoded records are not included.
pub fn encode(params: &ParamMap) -> String {
    let mut out = String::new();
    encode_into(params, &mut out);
    out
}

fn encode_into(params: &ParamMap, out: &mut String) {
    if params.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (key, value)) in params.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(key);
        out.push_str("\":{\"");
        out.push_str(&value.value_type().tag().to_string());
        out.push_str("\":");
        match value {
            Value::Params(nested) => encode_into(nested, out),
            Value::Object(object) => {
                out.push('"');
                out.push_str(object.class_name());
                out.push(CLASS_SEPARATOR);
                out.push_str(&object.to_text());
                out.push('"');
            }
            _ => {
                out.push('"');
                out.push_str(&value.to_text());
                out.push('"');
            }
        }
        out.push('}');
    }
    out.push('}');
}

// ═══════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════

/// Structural pre-check run before decoding.
///
/// Rejects empty text, the literal `{}` and `{""}`, an odd number of
/// quotes, and braces that are unbalanced or close before they open.
/// The literal `{}` is rejected even though it is what an empty map
/// encodes to; decoding it still yields an empty map.
pub fn validate(text: &str) -> bool {
    if text.is_empty() || text == "{}" || text == "{\"\"}" {
        return false;
    }
    if text.bytes().filter(|&b| b == b'"').count() % 2 != 0 {
        return false;
    }
    let mut depth: usize = 0;
    for b in text.bytes() {
        match b {
            b'{' => depth += 1,
            b'}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

// ═══════════════════════════════════════════════════════════════════
// Decoding
// ═══════════════════════════════════════════════════════════════════

/// Decode the text form. Text that fails [`validate`] decodes to an empty
/// map; entries with unknown tags or unregistered user classes are dropped.
pub fn decode(text: &str, ctx: &CodecContext) -> ParamMap {
    decode_at(text, ctx, 0)
}

fn decode_at(text: &str, ctx: &CodecContext, depth: usize) -> ParamMap {
    let mut params = ParamMap::new();
    if !validate(text) {
        return params;
    }

    let bytes = text.as_bytes();
    let mut key: Option<&str> = None;
    let mut tag: Option<i32> = None;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' if key.is_some() && tag == Some(ValueType::Params.tag()) => {
                let Some(end) = matching_brace(bytes, pos) else {
                    break;
                };
                if let Some(k) = key.take() {
                    if ctx.depth_allowed(depth + 1) {
                        params.set(k, decode_at(&text[pos..=end], ctx, depth + 1));
                    } else {
                        warn!("dropping {:?}: nesting deeper than {}", k, ctx.limits.max_depth);
                    }
                }
                tag = None;
                pos = end + 1;
                continue;
            }
            b'"' => {
                let start = pos + 1;
                let Some(len) = text[start..].find('"') else {
                    break;
                };
                let field = &text[start..start + len];
                pos = start + len;

                match (key, tag) {
                    (None, _) => key = Some(field),
                    (Some(k), None) => match field.parse::<i32>() {
                        Ok(t) => tag = Some(t),
                        Err(_) => {
                            warn!("bad type tag {:?} for key {:?}", field, k);
                            return ParamMap::new();
                        }
                    },
                    (Some(k), Some(t)) => {
                        if let Some(value) = decode_value(t, field, ctx) {
                            params.set(k, value);
                        } else {
                            debug!("dropping {:?} with tag {}", k, t);
                        }
                        key = None;
                        tag = None;
                    }
                }
            }
            _ => {}
        }
        pos += 1;
    }
    params
}

/// Index of the brace closing the one at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn decode_value(tag: i32, text: &str, ctx: &CodecContext) -> Option<Value> {
    let ty = ValueType::from_tag(tag)?;
    if let Some(kind) = ty.scalar_kind() {
        return Some(parse_scalar(kind, text).unwrap_or_else(|| kind.default_value()));
    }
    match ty {
        ValueType::Array => TypedArray::parse(text).map(Value::array),
        _ if ty.element_kind().is_some() => TypedArray::parse(text)
            .filter(|a| Some(a.kind()) == ty.element_kind())
            .map(Value::array),
        ValueType::UserObject => {
            let (class_name, payload) = text.split_once(CLASS_SEPARATOR)?;
            ctx.registry.restore(class_name, payload).map(Value::Object)
        }
        _ => None,
    }
}
