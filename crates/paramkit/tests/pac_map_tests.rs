//! Tests for the locked PacMap container

mod common;

use std::sync::Arc;
use std::thread;

use common::{point_context, Point};
use paramkit::pac_map::json;
use paramkit::*;
use pretty_assertions::assert_eq;

fn populated() -> PacMap {
    let map = PacMap::new();
    map.put("short", 7i16);
    map.put("int", 42i32);
    map.put("long", -5_000_000_000i64);
    map.put("char", 'z');
    map.put("byte", 200u8);
    map.put("bool", true);
    map.put("float", 2.5f32);
    map.put("double", 0.125f64);
    map.put("string", "text");
    map.put_array("ints", vec![3i32, 1, 2]);
    map.put_array("flags", vec![true, false, true]);
    map.put_array("longs", vec![i64::MIN, i64::MAX]);
    map
}

#[test]
fn test_typed_put_get() {
    let map = populated();
    assert_eq!(map.get_value("short", 0i16), 7);
    assert_eq!(map.get_value("int", 0i32), 42);
    assert_eq!(map.get_value("long", 0i64), -5_000_000_000);
    assert_eq!(map.get_value("char", ' '), 'z');
    assert_eq!(map.get_value("byte", 0u8), 200);
    assert!(map.get_value("bool", false));
    assert_eq!(map.get_value("float", 0f32), 2.5);
    assert_eq!(map.get_value("double", 0f64), 0.125);
    assert_eq!(map.get_value("string", String::new()), "text");
    assert_eq!(map.get_array::<i32>("ints"), vec![3, 1, 2]);
    assert_eq!(map.get_array::<bool>("flags"), vec![true, false, true]);
}

#[test]
fn test_defaults_for_missing_or_mismatched() {
    let map = populated();
    assert_eq!(map.get_value("missing", 9i32), 9);
    assert_eq!(map.get_value("int", 9i64), 9);
    assert!(map.get_array::<String>("ints").is_empty());
    assert!(map.get_array::<i32>("missing").is_empty());
    assert!(map.get_object("int").is_none());
}

#[test]
fn test_keys_size_remove_clear() {
    let map = populated();
    assert_eq!(map.size(), 12);
    assert!(map.has_key("int"));
    assert_eq!(map.keys().iter().next().map(String::as_str), Some("bool"));

    map.remove("int");
    assert!(!map.has_key("int"));
    assert_eq!(map.size(), 11);

    map.clear();
    assert!(map.is_empty());
}

#[test]
fn test_nested_pac_map_is_copied() {
    let child = PacMap::new();
    child.put("x", 1i32);

    let parent = PacMap::new();
    parent.put_pac_map("child", &child);
    child.put("x", 2i32);

    let fetched = parent.get_pac_map("child");
    assert_eq!(fetched.get_value("x", 0i32), 1);
    fetched.put("x", 3i32);
    assert_eq!(parent.get_pac_map("child").get_value("x", 0i32), 1);
    assert!(parent.get_pac_map("missing").is_empty());
}

#[test]
fn test_put_all_and_get_all() {
    let mut params = ParamMap::new();
    params.set("a", 1i32);
    params.set("b", 2i32);

    let map = PacMap::new();
    map.put("a", 0i32);
    map.put_all(&params);
    assert_eq!(map.get_value("a", -1i32), 1);
    assert_eq!(map.get_all(), params);
}

#[test]
fn test_deep_copy_and_equals() {
    let map = populated();
    let copy = map.deep_copy();
    assert!(copy.equals(&map));

    copy.put("int", 0i32);
    assert!(!copy.equals(&map));

    let target = PacMap::new();
    target.deep_copy_from(&map);
    assert!(target.equals(&map));
    assert!(map.clone().equals(&map));
}

#[test]
fn test_json_round_trip() {
    let map = populated();
    let text = map.to_json_string().unwrap();
    assert!(text.starts_with("{\"pacmap\":{"));

    let back = PacMap::from_json_string(&text).unwrap();
    assert!(back.equals(&map), "{:?} != {:?}", back, map);
}

#[test]
fn test_json_document_layout() {
    let map = PacMap::new();
    map.put("n", 5i32);
    map.put_array("xs", vec![1.5f64]);
    let nested = PacMap::new();
    nested.put("s", "v");
    map.put_pac_map("m", &nested);

    assert_eq!(
        map.to_json_string().unwrap(),
        concat!(
            r#"{"pacmap":{"#,
            r#""m":{"data":{"s":{"data":"v","type":10}},"type":131072},"#,
            r#""n":{"data":5,"type":2},"#,
            r#""xs":{"data":["1.5"],"type":2048}"#,
            r#"}}"#
        )
    );
}

#[test]
fn test_json_user_object() {
    let map = PacMap::new();
    map.put_object("p", UserCell::new(Point::new(5, 6)));
    let text = map.to_json_string().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["pacmap"]["p"]["class"], Point::CLASS);
    assert_eq!(doc["pacmap"]["p"]["type"], json::codes::USER_OBJECT);

    let back = PacMap::from_json_with(&text, &point_context()).unwrap();
    assert_eq!(back.get_object("p").unwrap().to_text(), "5,6");

    // unknown class on the receiving side: item skipped, map still parses
    let lossy = PacMap::from_json_string(&text).unwrap();
    assert!(!lossy.has_key("p"));
}

#[test]
fn test_parse_json_is_lenient() {
    assert!(PacMap::parse_json("garbage").is_empty());
    assert!(PacMap::parse_json("{\"nope\":1}").is_empty());
    assert!(matches!(
        PacMap::from_json_string("{\"nope\":1}"),
        Err(ParamsError::MissingRoot)
    ));
}

#[test]
fn test_wire_round_trip() {
    let map = populated();
    let bytes = map.marshal().unwrap();

    assert_eq!(&bytes[..10], &[6, 0, 0, 0, b'P', b'A', b'C', b'M', b'A', b'P']);
    let mut reader = codec::WireReader::new(&bytes);
    assert_eq!(reader.read_string8().unwrap(), "PACMAP");
    assert!(reader.read_string8().unwrap().starts_with("{\"pacmap\":{"));

    let back = PacMap::unmarshal(&bytes).unwrap();
    assert!(back.equals(&map));
}

#[test]
fn test_wire_empty_document_is_empty_map() {
    let mut writer = codec::WireWriter::new();
    writer.write_string8("PACMAP").unwrap();
    writer.write_string8("").unwrap();
    let map = PacMap::unmarshal(&writer.into_bytes()).unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_concurrent_puts() {
    let map = Arc::new(PacMap::new());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for i in 0..50 {
                    map.put(format!("t{}-{}", t, i), i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(map.size(), 400);
    assert_eq!(map.get_value("t3-49", 0i32), 49);
}
