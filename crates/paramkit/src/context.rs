//! Codec context configuration

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::UserObjectRegistry;

/// Default limit on nested map depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default limit on a single unsupported record, matching the peer runtime.
pub const DEFAULT_MAX_UNSUPPORTED_LEN: usize = 100 * 1024 * 1024;

/// Size and depth limits applied while decoding.
///
/// Deserializable so embedders can carry the limits in their own
/// configuration files; missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Maximum nesting depth of maps inside maps
    pub max_depth: usize,

    /// Maximum byte length of one unsupported-data record
    pub max_unsupported_len: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_unsupported_len: DEFAULT_MAX_UNSUPPORTED_LEN,
        }
    }
}

/// Configuration and collaborators for decoding.
///
/// This is passed through all decode calls and controls the limits
/// and the registry used to rebuild user-defined values.
#[derive(Debug, Clone)]
pub struct CodecContext {
    /// Decode limits
    pub limits: CodecLimits,

    /// Registry consulted for user-defined value kinds
    pub registry: Arc<UserObjectRegistry>,
}

impl Default for CodecContext {
    fn default() -> Self {
        Self {
            limits: CodecLimits::default(),
            registry: UserObjectRegistry::global(),
        }
    }
}

impl CodecContext {
    /// Create a new context with default limits and the global registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that resolves user objects through `registry`.
    pub fn with_registry(registry: Arc<UserObjectRegistry>) -> Self {
        Self {
            registry,
            ..Default::default()
        }
    }

    /// Replace the limits (builder pattern).
    pub fn with_limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Create a context with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            limits: CodecLimits {
                max_depth,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Check whether `depth` is still within the nesting limit.
    pub fn depth_allowed(&self, depth: usize) -> bool {
        depth <= self.limits.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let ctx = CodecContext::new();
        assert_eq!(ctx.limits.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ctx.limits.max_unsupported_len, 100 * 1024 * 1024);
        assert!(ctx.depth_allowed(DEFAULT_MAX_DEPTH));
        assert!(!ctx.depth_allowed(DEFAULT_MAX_DEPTH + 1));
    }

    #[test]
    fn test_limits_from_partial_json() {
        let limits: CodecLimits = serde_json::from_str(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(limits.max_depth, 4);
        assert_eq!(limits.max_unsupported_len, DEFAULT_MAX_UNSUPPORTED_LEN);
    }

    #[test]
    fn test_with_registry_is_isolated() {
        let registry = Arc::new(UserObjectRegistry::new());
        let ctx = CodecContext::with_registry(registry.clone());
        assert!(Arc::ptr_eq(&ctx.registry, &registry));
        assert!(!Arc::ptr_eq(&ctx.registry, &UserObjectRegistry::global()));
    }
}
