//! Integration tests for eager materialization.

use jpath::document::materialize::materialize;
use jpath::document::node::Node;
use jpath::document::parser::decode_object;
use jpath::{ErrorKind, JPath, Lookup, SharedJPath};
use serde_json::json;

#[test]
fn test_mixed_array_keeps_only_objects() {
    let encoded = json!({"b": 2}).to_string();
    let source = json!({"mixed": ["x", {"a": 1}, 3, encoded]}).to_string();
    let jpath = SharedJPath::new(&source).unwrap();

    let mixed = jpath.find("mixed").unwrap().as_array().unwrap();
    assert_eq!(mixed.len(), 2);
    assert_eq!(jpath.find_i64("mixed[0].a"), 1);
    assert_eq!(jpath.find_i64("mixed[1].b"), 2);
    assert_eq!(jpath.find("mixed[2]").unwrap_err().kind(), ErrorKind::IndexOutOfRange);
}

#[test]
fn test_lazy_mode_keeps_mixed_arrays_intact() {
    let source = json!({"mixed": ["x", {"a": 1}, 3]}).to_string();
    let jpath = JPath::new(&source).unwrap();

    assert_eq!(jpath.find_string("mixed[0]"), "x");
    assert_eq!(jpath.find_i64("mixed[1].a"), 1);
    assert_eq!(jpath.find_i64("mixed[2]"), 3);
}

#[test]
fn test_array_without_objects_is_preserved() {
    let source = json!({"values": [1, "x", "[1, 2]", null]}).to_string();
    let jpath = SharedJPath::new(&source).unwrap();

    assert_eq!(jpath.find("values").unwrap().as_array().map(<[Node]>::len), Some(4));
    assert_eq!(jpath.find_string("values[1]"), "x");
    assert_eq!(jpath.find_string("values[2]"), "[1, 2]");
}

#[test]
fn test_nested_arrays_are_not_descended_into() {
    let encoded = json!({"a": 1}).to_string();
    let source = json!({"grid": [[encoded]]}).to_string();
    let jpath = SharedJPath::new(&source).unwrap();

    let grid = jpath.find("grid[0]").unwrap();
    assert!(matches!(grid, Node::Array(items) if matches!(items[0], Node::String(_))));
}

#[test]
fn test_materialize_is_idempotent() {
    let deep = json!({"x": 1}).to_string();
    let inner = json!({"deep": deep, "list": ["a", {"b": 1}]}).to_string();
    let source = json!({"payload": inner, "events": [inner, 5], "plain": [1, 2]}).to_string();

    let mut map = decode_object(&source).unwrap();
    materialize(&mut map);
    let once = map.clone();

    let stats = materialize(&mut map);
    assert!(stats.is_noop());
    assert_eq!(map, once);
}

#[test]
fn test_shared_tree_has_no_remaining_encoded_objects() {
    let deep = json!({"x": 1}).to_string();
    let inner = json!({"deep": deep}).to_string();
    let source = json!({"payload": inner, "events": [inner]}).to_string();
    let jpath = SharedJPath::new(&source).unwrap();

    fn assert_no_encoded_objects(node: &Node) {
        match node {
            Node::Object(map) => map.values().for_each(assert_no_encoded_objects),
            Node::Array(items) => items.iter().for_each(assert_no_encoded_objects),
            Node::String(text) => assert!(decode_object(text).is_err(), "{} was left encoded", text),
            _ => {}
        }
    }

    assert_no_encoded_objects(&jpath.to_node());
    assert_eq!(jpath.find_i64("payload.deep.x"), 1);
    assert_eq!(jpath.find_i64("events[0].deep.x"), 1);
}
