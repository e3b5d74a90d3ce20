//! User-defined values and the registry that rebuilds them by class name

use std::fmt;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use log::warn;

/// A value type defined outside this crate.
///
/// Implementors travel through both codecs as `class_name` plus their
/// textual payload, and are rebuilt on the receiving side through a
/// [`UserObjectRegistry`].
pub trait UserObject: Send + Sync + fmt::Debug {
    /// Registered class name.
    fn class_name(&self) -> &str;

    /// Textual payload.
    fn to_text(&self) -> String;

    /// Restore state from a payload produced by [`UserObject::to_text`].
    /// Returns `false` if the payload was rejected.
    fn parse(&mut self, text: &str) -> bool;

    /// A fresh, default-state instance of the same class.
    fn new_instance(&self) -> Box<dyn UserObject>;

    /// Value equality with another user object.
    fn equals(&self, other: &dyn UserObject) -> bool {
        self.class_name() == other.class_name() && self.to_text() == other.to_text()
    }

    /// Overwrite this object's state with a copy of `other`'s.
    fn deep_copy(&mut self, other: &dyn UserObject) -> bool {
        self.class_name() == other.class_name() && self.parse(&other.to_text())
    }
}

/// Shared handle to a user-defined value.
#[derive(Clone)]
pub struct UserCell(Arc<dyn UserObject>);

impl UserCell {
    /// Wrap a user object.
    pub fn new(object: impl UserObject + 'static) -> Self {
        Self(Arc::new(object))
    }

    /// Wrap an already boxed user object.
    pub fn from_box(object: Box<dyn UserObject>) -> Self {
        Self(Arc::from(object))
    }

    /// Borrow the wrapped object.
    pub fn get(&self) -> &dyn UserObject {
        self.0.as_ref()
    }

    /// Class name of the wrapped object.
    pub fn class_name(&self) -> &str {
        self.0.class_name()
    }

    /// Payload of the wrapped object.
    pub fn to_text(&self) -> String {
        self.0.to_text()
    }

    /// Build an independent copy through `new_instance` + `deep_copy`.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.0.new_instance();
        if !copy.deep_copy(self.get()) {
            warn!("deep copy of {} was rejected", self.class_name());
        }
        Self::from_box(copy)
    }

    /// True when both cells share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for UserCell {
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(other.get())
    }
}

impl fmt::Debug for UserCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Factory producing a default-state instance of one user class.
pub type UserObjectFactory = Arc<dyn Fn() -> Box<dyn UserObject> + Send + Sync>;

/// Maps class names to zero-argument factories.
///
/// Registration is last-writer-wins and there is no de-registration.
#[derive(Default)]
pub struct UserObjectRegistry {
    factories: DashMap<String, UserObjectFactory>,
}

static GLOBAL_REGISTRY: OnceLock<Arc<UserObjectRegistry>> = OnceLock::new();

impl UserObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, for start-up registration.
    pub fn global() -> Arc<Self> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(Self::new()))
            .clone()
    }

    /// Register (or replace) the factory for `class_name`.
    pub fn register<F>(&self, class_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn UserObject> + Send + Sync + 'static,
    {
        self.factories.insert(class_name.into(), Arc::new(factory));
    }

    /// Construct a default-state instance of `class_name`.
    pub fn create(&self, class_name: &str) -> Option<Box<dyn UserObject>> {
        // Release the shard lock before running user code.
        let factory = self.factories.get(class_name)?.value().clone();
        Some(factory())
    }

    /// Construct an instance of `class_name` and load `text` into it.
    pub fn restore(&self, class_name: &str, text: &str) -> Option<UserCell> {
        let Some(mut object) = self.create(class_name) else {
            warn!("no user object registered as {:?}", class_name);
            return None;
        };
        if !object.parse(text) {
            warn!("{} rejected payload {:?}", class_name, text);
            return None;
        }
        Some(UserCell::from_box(object))
    }

    /// Whether `class_name` has a factory.
    pub fn contains(&self, class_name: &str) -> bool {
        self.factories.contains_key(class_name)
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for UserObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        names.sort();
        f.debug_struct("UserObjectRegistry")
            .field("classes", &names)
            .finish()
    }
}
