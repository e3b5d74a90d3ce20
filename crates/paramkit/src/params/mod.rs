//! The parameter map: string keys to values, nestable inside itself

mod unsupported;

pub use unsupported::UnsupportedData;

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use log::info;

use crate::codec::{binary, text};
use crate::context::CodecContext;
use crate::error::{ParamsError, Result};
use crate::value::{Boxed, TypedArray, UserCell, Value, ValueType};

/// A string-keyed container of values.
///
/// Keys are unique and iterate in sorted order, so both encodings are
/// deterministic. Entries whose wire type was not understood on decode are
/// kept aside as [`UnsupportedData`] and written back out on encode; a key
/// lives in at most one of the two tables.
///
/// Cloning a map is a deep copy.
///
/// # Example
///
/// ```
/// use paramkit::{ParamMap, Value};
///
/// let mut inner = ParamMap::new();
/// inner.set("key02", "value02");
///
/// let mut params = ParamMap::new();
/// params.set("key01", inner);
/// params.set("key02", "value02");
///
/// let text = params.to_text();
/// assert_eq!(
///     text,
///     r#"{"key01":{"101":{"key02":{"9":"value02"}}},"key02":{"9":"value02"}}"#
/// );
/// assert_eq!(ParamMap::parse(&text), params);
///
/// let bytes = params.marshal().unwrap();
/// assert_eq!(ParamMap::unmarshal(&bytes), Some(params));
/// ```
#[derive(Default)]
pub struct ParamMap {
    /// Typed entries
    entries: BTreeMap<String, Value>,

    /// Undecoded entries, in arrival order
    unsupported: IndexMap<String, UnsupportedData>,
}

impl ParamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Entries
    // ═══════════════════════════════════════════════════════════════════

    /// Insert or overwrite `key`. Any undecoded record under the same key
    /// is dropped.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        self.unsupported.shift_remove(&key);
        self.entries.insert(key, value.into());
    }

    /// Value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Scalar under `key`, if present and of type `T`.
    pub fn get_as<T: Boxed>(&self, key: &str) -> Option<&T> {
        self.get(key).and_then(T::query)
    }

    /// Scalar under `key`, or `default` when absent or of another type.
    pub fn get_or<T: Boxed>(&self, key: &str, default: T) -> T {
        self.get_as(key).cloned().unwrap_or(default)
    }

    /// Nested map under `key`.
    pub fn get_params(&self, key: &str) -> Option<&ParamMap> {
        self.get(key).and_then(Value::as_params)
    }

    /// Typed array under `key`.
    pub fn get_array(&self, key: &str) -> Option<&TypedArray> {
        self.get(key).and_then(Value::as_array)
    }

    /// User object under `key`.
    pub fn get_object(&self, key: &str) -> Option<&UserCell> {
        self.get(key).and_then(Value::as_object)
    }

    /// Whether `key` holds a typed entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key` from the map, including any undecoded record.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.unsupported.shift_remove(key);
        self.entries.remove(key)
    }

    /// Number of typed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no typed entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of the typed entries, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Typed entries, sorted by key.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Remove everything, including undecoded records.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.unsupported.clear();
    }

    /// An independent copy.
    pub fn deep_copy(&self) -> ParamMap {
        self.clone()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Undecoded Entries
    // ═══════════════════════════════════════════════════════════════════

    /// Undecoded records, in arrival order.
    pub fn unsupported(&self) -> impl Iterator<Item = &UnsupportedData> + '_ {
        self.unsupported.values()
    }

    /// Number of undecoded records.
    pub fn unsupported_len(&self) -> usize {
        self.unsupported.len()
    }

    /// Keep an undecoded record, replacing any entry under its key.
    pub fn insert_unsupported(&mut self, record: UnsupportedData) {
        self.entries.remove(&record.key);
        self.unsupported.insert(record.key.clone(), record);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Encodings
    // ═══════════════════════════════════════════════════════════════════

    /// Text form.
    pub fn to_text(&self) -> String {
        text::encode(self)
    }

    /// Decode the text form with the global registry. Invalid text gives
    /// an empty map.
    pub fn parse(text: &str) -> ParamMap {
        Self::parse_with(text, &CodecContext::default())
    }

    /// Decode the text form with an explicit context.
    pub fn parse_with(text: &str, ctx: &CodecContext) -> ParamMap {
        text::decode(text, ctx)
    }

    /// Binary wire form.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        binary::marshal(self)
    }

    /// Decode the binary wire form with the global registry. Any malformed
    /// input yields `None`; a partial map is never returned.
    pub fn unmarshal(bytes: &[u8]) -> Option<ParamMap> {
        Self::unmarshal_with(bytes, &CodecContext::default()).ok()
    }

    /// Decode the binary wire form, reporting why it failed.
    pub fn unmarshal_with(bytes: &[u8], ctx: &CodecContext) -> Result<ParamMap> {
        binary::unmarshal(bytes, ctx).map_err(ParamsError::from)
    }

    /// Log every entry's tag and text form at info level, indenting nested
    /// maps by `level`.
    pub fn dump_info(&self, level: usize) {
        let indent = "  ".repeat(level);
        for (key, value) in &self.entries {
            match value {
                Value::Params(nested) => {
                    info!("{}{} [{}]:", indent, key, ValueType::Params.tag());
                    nested.dump_info(level + 1);
                }
                _ => info!(
                    "{}{} [{}]: {}",
                    indent,
                    key,
                    value.value_type().tag(),
                    value.to_text()
                ),
            }
        }
        for record in self.unsupported.values() {
            info!(
                "{}{} [{}]: <{} unsupported bytes>",
                indent,
                record.key,
                record.type_tag,
                record.byte_len()
            );
        }
    }
}

impl Clone for ParamMap {
    fn clone(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_copy()))
                .collect(),
            unsupported: self.unsupported.clone(),
        }
    }
}

impl PartialEq for ParamMap {
    /// Deep, type-aware equality over the typed entries.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for ParamMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a ParamMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParamMap::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for ParamMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
