//! A lock-guarded parameter map with typed accessors and a JSON form

pub mod json;

use std::collections::BTreeSet;
use std::fmt;
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::codec::{WireReader, WireWriter};
use crate::context::CodecContext;
use crate::error::{ParamsError, Result};
use crate::params::ParamMap;
use crate::value::{Boxed, TypedArray, UserCell, Value};

/// Header string written ahead of the JSON document on the wire.
pub const PACMAP_HEADER: &str = "PACMAP";

/// A [`ParamMap`] behind a mutex, shareable across threads.
///
/// Every operation holds the lock for its own duration only; nothing is
/// atomic across calls. Getters hand out copies, never references into
/// the locked map.
///
/// # Example
///
/// ```
/// use paramkit::PacMap;
///
/// let map = PacMap::new();
/// map.put("count", 3i32);
/// map.put_array("names", vec!["a".to_string(), "b".to_string()]);
///
/// assert_eq!(map.get_value("count", 0i32), 3);
/// assert_eq!(map.get_value("missing", 7i32), 7);
/// assert_eq!(map.get_array::<String>("names"), vec!["a", "b"]);
///
/// let json = map.to_json_string().unwrap();
/// assert!(PacMap::parse_json(&json).equals(&map));
/// ```
#[derive(Default)]
pub struct PacMap {
    inner: Mutex<ParamMap>,
}

impl PacMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing parameter map.
    pub fn from_params(params: ParamMap) -> Self {
        Self {
            inner: Mutex::new(params),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ParamMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Typed Put / Get
    // ═══════════════════════════════════════════════════════════════════

    /// Store a scalar, array, object or nested map under `key`.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.lock().set(key, value);
    }

    /// Scalar under `key`, or `default` when absent or of another type.
    pub fn get_value<T: Boxed>(&self, key: &str, default: T) -> T {
        self.lock().get_or(key, default)
    }

    /// Store a native vector as a typed array.
    pub fn put_array<T: Boxed>(&self, key: impl Into<String>, values: Vec<T>) {
        self.put(key, TypedArray::from_values(values));
    }

    /// Array under `key` as a native vector; empty when absent or of
    /// another element type.
    pub fn get_array<T: Boxed>(&self, key: &str) -> Vec<T> {
        self.lock()
            .get_array(key)
            .map(TypedArray::to_vec)
            .unwrap_or_default()
    }

    /// Store a user object.
    pub fn put_object(&self, key: impl Into<String>, object: UserCell) {
        self.put(key, object);
    }

    /// User object under `key`.
    pub fn get_object(&self, key: &str) -> Option<UserCell> {
        self.lock().get_object(key).cloned()
    }

    /// Store a deep copy of `other` as a nested map.
    pub fn put_pac_map(&self, key: impl Into<String>, other: &PacMap) {
        let snapshot = other.get_all();
        self.put(key, snapshot);
    }

    /// Deep copy of the nested map under `key`; empty when absent.
    pub fn get_pac_map(&self, key: &str) -> PacMap {
        let nested = self.lock().get_params(key).cloned().unwrap_or_default();
        PacMap::from_params(nested)
    }

    /// Deep snapshot of every entry.
    pub fn get_all(&self) -> ParamMap {
        self.lock().clone()
    }

    /// Copy every entry of `params` in, overwriting existing keys.
    pub fn put_all(&self, params: &ParamMap) {
        let copy = params.clone();
        let mut guard = self.lock();
        for (key, value) in &copy {
            guard.set(key.as_str(), value.clone());
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Keys
    // ═══════════════════════════════════════════════════════════════════

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Sorted set of keys.
    pub fn keys(&self) -> BTreeSet<String> {
        self.lock().keys().map(str::to_owned).collect()
    }

    /// Whether `key` is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    /// Remove `key` if present.
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // ═══════════════════════════════════════════════════════════════════
    // Copying and Equality
    // ═══════════════════════════════════════════════════════════════════

    /// Deep, type-aware equality.
    pub fn equals(&self, other: &PacMap) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let theirs = other.get_all();
        *self.lock() == theirs
    }

    /// An independent copy.
    pub fn deep_copy(&self) -> PacMap {
        PacMap::from_params(self.get_all())
    }

    /// Replace this map's contents with a deep copy of `other`'s.
    pub fn deep_copy_from(&self, other: &PacMap) {
        if ptr::eq(self, other) {
            return;
        }
        let snapshot = other.get_all();
        *self.lock() = snapshot;
    }

    // ═══════════════════════════════════════════════════════════════════
    // Encodings
    // ═══════════════════════════════════════════════════════════════════

    /// JSON document form.
    pub fn to_json_string(&self) -> Result<String> {
        let snapshot = self.get_all();
        json::to_string(&snapshot)
    }

    /// Parse the JSON document form with the global registry.
    pub fn from_json_string(text: &str) -> Result<PacMap> {
        Self::from_json_with(text, &CodecContext::default())
    }

    /// Parse the JSON document form with an explicit context.
    pub fn from_json_with(text: &str, ctx: &CodecContext) -> Result<PacMap> {
        json::from_str(text, ctx).map(PacMap::from_params)
    }

    /// Lenient parse: malformed documents give an empty map.
    pub fn parse_json(text: &str) -> PacMap {
        Self::from_json_string(text).unwrap_or_default()
    }

    /// Wire form: the header string, then the JSON document, both as
    /// UTF-8 strings.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        let document = self.to_json_string()?;
        let mut writer = WireWriter::new();
        writer.write_string8(PACMAP_HEADER)?;
        writer.write_string8(&document)?;
        Ok(writer.into_bytes())
    }

    /// Decode the wire form with the global registry.
    pub fn unmarshal(bytes: &[u8]) -> Option<PacMap> {
        Self::unmarshal_with(bytes, &CodecContext::default()).ok()
    }

    /// Decode the wire form, reporting why it failed.
    pub fn unmarshal_with(bytes: &[u8], ctx: &CodecContext) -> Result<PacMap> {
        let mut reader = WireReader::new(bytes);
        let header = reader.read_string8()?;
        if header != PACMAP_HEADER {
            return Err(ParamsError::BadHeader {
                expected: PACMAP_HEADER,
                got: header,
            });
        }
        let document = reader.read_string8()?;
        if document.is_empty() {
            return Ok(PacMap::new());
        }
        Self::from_json_with(&document, ctx)
    }
}

impl Clone for PacMap {
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

impl fmt::Debug for PacMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PacMap").field(&*self.lock()).finish()
    }
}

impl From<ParamMap> for PacMap {
    fn from(params: ParamMap) -> Self {
        PacMap::from_params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_defaults() {
        let map = PacMap::new();
        map.put("i", 5i32);
        assert_eq!(map.get_value("i", 0i32), 5);
        assert_eq!(map.get_value("i", 1.5f64), 1.5);
        assert_eq!(map.get_value("missing", 'z'), 'z');
        assert!(map.get_array::<i32>("i").is_empty());
    }

    #[test]
    fn test_self_copy_and_equality() {
        let map = PacMap::new();
        map.put("k", "v");
        map.deep_copy_from(&map);
        assert!(map.equals(&map));
        assert_eq!(map.size(), 1);
    }

    #[test]
    fn test_bad_header() {
        let mut writer = WireWriter::new();
        writer.write_string8("NOTMAP").unwrap();
        writer.write_string8("{}").unwrap();
        let bytes = writer.into_bytes();
        assert!(matches!(
            PacMap::unmarshal_with(&bytes, &CodecContext::default()),
            Err(ParamsError::BadHeader { .. })
        ));
        assert!(PacMap::unmarshal(&bytes).is_none());
    }
}
