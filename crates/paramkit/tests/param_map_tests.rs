//! Tests for ParamMap operations

mod common;

use common::Point;
use paramkit::*;
use pretty_assertions::assert_eq;

#[test]
fn test_set_get_overwrite() {
    let mut params = ParamMap::new();
    assert!(params.is_empty());

    params.set("k", 1i32);
    assert_eq!(params.get("k"), Some(&Value::Int(1)));

    params.set("k", "now a string");
    assert_eq!(params.len(), 1);
    assert_eq!(params.get_as::<i32>("k"), None);
    assert_eq!(
        params.get_as::<String>("k").map(String::as_str),
        Some("now a string")
    );
}

#[test]
fn test_typed_getters() {
    let mut inner = ParamMap::new();
    inner.set("x", 1i32);

    let mut params = ParamMap::new();
    params.set("inner", inner.clone());
    params.set("array", Value::array_of([1i64, 2]));
    params.set("object", Value::object(Point::new(1, 2)));

    assert_eq!(params.get_params("inner"), Some(&inner));
    assert_eq!(params.get_array("array").map(TypedArray::len), Some(2));
    assert_eq!(params.get_object("object").map(UserCell::class_name), Some(Point::CLASS));

    assert!(params.get_params("array").is_none());
    assert!(params.get_array("object").is_none());
    assert!(params.get_object("inner").is_none());
}

#[test]
fn test_get_or_defaults() {
    let mut params = ParamMap::new();
    params.set("b", true);
    assert!(params.get_or("b", false));
    assert!(params.get_or("missing", true));
    assert_eq!(params.get_or("b", 5u8), 5);
}

#[test]
fn test_remove_and_contains() {
    let mut params = ParamMap::new();
    params.set("a", 1i32);
    params.set("b", 2i32);
    assert!(params.contains_key("a"));
    assert_eq!(params.remove("a"), Some(Value::Int(1)));
    assert!(!params.contains_key("a"));
    assert_eq!(params.remove("a"), None);
    assert_eq!(params.len(), 1);
}

#[test]
fn test_iteration_is_key_ordered() {
    let params: ParamMap = [("zeta", 1i32), ("alpha", 2), ("mid", 3)].into_iter().collect();
    let keys: Vec<&String> = params.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["alpha", "mid", "zeta"]);

    let mut seen = Vec::new();
    for (key, value) in &params {
        seen.push((key.clone(), value.to_text()));
    }
    assert_eq!(seen[0], ("alpha".to_string(), "2".to_string()));
}

#[test]
fn test_extend_overwrites() {
    let mut params: ParamMap = [("a", 1i32)].into_iter().collect();
    params.extend([("a", 10i32), ("b", 20)]);
    assert_eq!(params.get_or("a", 0i32), 10);
    assert_eq!(params.get_or("b", 0i32), 20);
}

#[test]
fn test_deep_copy_isolation() {
    let mut inner = ParamMap::new();
    inner.set("x", 1i32);
    let mut original = ParamMap::new();
    original.set("inner", inner);
    original.set("p", Value::object(Point::new(1, 1)));

    let mut copy = original.deep_copy();
    assert_eq!(copy, original);

    copy.set("inner", ParamMap::new());
    copy.remove("p");
    assert_eq!(original.get_params("inner").unwrap().get_or("x", 0i32), 1);
    assert!(original.contains_key("p"));
}

#[test]
fn test_equality_is_deep_and_type_aware() {
    let build = |v: Value| {
        let mut inner = ParamMap::new();
        inner.set("v", v);
        let mut outer = ParamMap::new();
        outer.set("inner", inner);
        outer
    };
    assert_eq!(build(Value::Int(1)), build(Value::Int(1)));
    assert_ne!(build(Value::Int(1)), build(Value::Long(1)));
    assert_ne!(build(Value::Int(1)), build(Value::Int(2)));
}

#[test]
fn test_array_equality_ignores_order() {
    let mut a = ParamMap::new();
    a.set("xs", Value::array_of(["a".to_string(), "b".to_string()]));
    let mut b = ParamMap::new();
    b.set("xs", Value::array_of(["b".to_string(), "a".to_string()]));
    assert_eq!(a, b);
}

#[test]
fn test_keys_unique_across_unsupported() {
    let mut params = ParamMap::new();
    params.set("k", 1i32);
    params.insert_unsupported(UnsupportedData::new("k", 7777, vec![1]));
    assert!(!params.contains_key("k"));
    assert_eq!(params.unsupported_len(), 1);

    params.set("k", 2i32);
    assert_eq!(params.unsupported_len(), 0);
    assert_eq!(params.get("k"), Some(&Value::Int(2)));
}

#[test]
fn test_dump_info_does_not_panic() {
    let mut inner = ParamMap::new();
    inner.set("x", 1i32);
    let mut params = ParamMap::new();
    params.set("inner", inner);
    params.set("s", "v");
    params.insert_unsupported(UnsupportedData::new("u", 9999, vec![0; 3]));
    params.dump_info(0);
}

#[test]
fn test_debug_lists_entries() {
    let mut params = ParamMap::new();
    params.set("a", 1i32);
    params.set("b", "two");
    assert_eq!(format!("{:?}", params), r#"{"a": 1, "b": "two"}"#);
}
