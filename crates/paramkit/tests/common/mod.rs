//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use paramkit::{CodecContext, UserObject, UserObjectRegistry};

/// A two-field user object with payload `"<x>,<y>"`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const CLASS: &'static str = "test.Point";

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl UserObject for Point {
    fn class_name(&self) -> &str {
        Self::CLASS
    }

    fn to_text(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    fn parse(&mut self, text: &str) -> bool {
        let Some((x, y)) = text.split_once(',') else {
            return false;
        };
        match (x.parse(), y.parse()) {
            (Ok(x), Ok(y)) => {
                self.x = x;
                self.y = y;
                true
            }
            _ => false,
        }
    }

    fn new_instance(&self) -> Box<dyn UserObject> {
        Box::<Point>::default()
    }
}

/// A private registry that knows [`Point`].
pub fn point_registry() -> Arc<UserObjectRegistry> {
    let registry = UserObjectRegistry::new();
    registry.register(Point::CLASS, || Box::<Point>::default());
    Arc::new(registry)
}

/// A context resolving user objects through [`point_registry`].
pub fn point_context() -> CodecContext {
    CodecContext::with_registry(point_registry())
}

/// A context whose registry is empty.
pub fn empty_context() -> CodecContext {
    CodecContext::with_registry(Arc::new(UserObjectRegistry::new()))
}
