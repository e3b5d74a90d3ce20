//! Typed arrays: fixed-length, homogeneous, with optional empty slots

use std::iter::FusedIterator;
use std::slice;

use log::warn;

use super::scalar::{parse_scalar, Boxed};
use super::{ScalarKind, Value, ValueType};

/// A fixed-length array whose elements all share one scalar kind.
///
/// Slots start empty. Storing a value of another kind, or past the end,
/// is ignored with a warning.
#[derive(Clone)]
pub struct TypedArray {
    kind: ScalarKind,
    items: Vec<Option<Value>>,
}

impl TypedArray {
    /// Create an array of `len` empty slots.
    pub fn new(len: usize, kind: ScalarKind) -> Self {
        Self {
            kind,
            items: vec![None; len],
        }
    }

    /// Create a fully populated array from native values.
    pub fn from_values<T: Boxed>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            kind: T::KIND,
            items: values.into_iter().map(|v| Some(v.boxed())).collect(),
        }
    }

    /// Element kind.
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// The typed-array tag (11..=19) for this element kind.
    pub fn array_type(&self) -> ValueType {
        self.kind.array_type()
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the array has no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Store `value` at `index`. Returns whether the value was stored.
    pub fn set(&mut self, index: usize, value: Value) -> bool {
        if ScalarKind::of(&value) != Some(self.kind) {
            warn!(
                "ignoring {} element for {} array",
                crate::error::type_name(&value),
                self.kind
            );
            return false;
        }
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => {
                warn!(
                    "ignoring set at index {} of {}-slot array",
                    index,
                    self.items.len()
                );
                false
            }
        }
    }

    /// Element at `index`, or `None` when out of range or empty.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Forward traversal over the slots. Each call starts again from the
    /// first slot.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.items.iter(),
        }
    }

    /// Occupied slots only.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.items.iter().flatten()
    }

    /// Unbox every slot into a native vector. Empty slots become the type
    /// default; an array of another kind yields an empty vector.
    pub fn to_vec<T: Boxed>(&self) -> Vec<T> {
        if T::KIND != self.kind {
            return Vec::new();
        }
        self.items
            .iter()
            .map(|slot| slot.as_ref().map(T::unbox).unwrap_or_default())
            .collect()
    }

    /// Render as `<signature><len>{e0,e1,...}`. Empty slots render empty.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push(self.kind.signature());
        out.push_str(&self.items.len().to_string());
        out.push('{');
        for (i, slot) in self.items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if let Some(value) = slot {
                out.push_str(&value.to_text());
            }
        }
        out.push('}');
        out
    }

    /// Parse the `<signature><len>{...}` form.
    ///
    /// Returns `None` for an unknown signature, missing braces, or a length
    /// that disagrees with the number of elements. Elements that fail to
    /// parse become default-valued; empty elements of non-string kinds
    /// stay empty.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let kind = ScalarKind::from_signature(chars.next()?)?;
        let rest = chars.as_str();
        let open = rest.find('{')?;
        let len: usize = rest[..open].parse().ok()?;
        let body = rest[open + 1..].strip_suffix('}')?;

        let elements: Vec<&str> = if len == 0 && body.is_empty() {
            Vec::new()
        } else {
            body.split(',').collect()
        };
        if elements.len() != len {
            return None;
        }

        let mut array = Self::new(len, kind);
        for (slot, element) in array.items.iter_mut().zip(elements) {
            if element.is_empty() && kind != ScalarKind::String {
                continue;
            }
            *slot = Some(parse_scalar(kind, element).unwrap_or_else(|| kind.default_value()));
        }
        Some(array)
    }
}

impl PartialEq for TypedArray {
    /// Set equality over occupied slots: order does not matter, but two
    /// non-empty arrays of different lengths are never equal.
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if !self.is_empty() && !other.is_empty() && self.len() != other.len() {
            return false;
        }
        let covered = |a: &TypedArray, b: &TypedArray| a.values().all(|v| b.values().any(|w| v == w));
        covered(self, other) && covered(other, self)
    }
}

impl<'a> IntoIterator for &'a TypedArray {
    type Item = Option<&'a Value>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator over the slots of a [`TypedArray`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Option<Value>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Option<&'a Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
