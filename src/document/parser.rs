//! JSON decoding into jpath trees.
//!
//! `serde_json` does the actual parsing; this module turns its output into
//! either a plain [`Map`] or a lazy [`LazyMap`]. Only JSON *objects* are
//! accepted at the top level, both for whole documents and for strings that
//! are candidates for expansion.
//!
//! # Example
//!
//! ```
//! use jpath::document::parser::decode_object;
//! use jpath::document::node::Node;
//!
//! let map = decode_object(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! assert_eq!(map["age"], Node::Number(30.0));
//!
//! assert!(decode_object("[1, 2, 3]").is_err());
//! ```

use super::lazy::{LazyMap, LazyNode};
use super::node::{Map, Node};
use serde_json::Map as SerdeMap;
use serde_json::Value as SerdeValue;

/// Decodes `text` as a JSON object into a plain map.
///
/// # Errors
///
/// Returns the `serde_json` error if the text is malformed or its top-level
/// value is not an object.
pub fn decode_object(text: &str) -> Result<Map, serde_json::Error> {
    let map: SerdeMap<String, SerdeValue> = serde_json::from_str(text)?;
    Ok(map_from_serde(map))
}

/// Decodes `text` as a JSON object into a lazy map.
///
/// # Errors
///
/// Same as [`decode_object`].
pub fn decode_lazy_object(text: &str) -> Result<LazyMap, serde_json::Error> {
    let map: SerdeMap<String, SerdeValue> = serde_json::from_str(text)?;
    Ok(lazy_map_from_serde(map))
}

/// Converts an already-decoded `serde_json` object into a plain map.
pub fn map_from_serde(map: SerdeMap<String, SerdeValue>) -> Map {
    map.into_iter().map(|(k, v)| (k, Node::from(v))).collect()
}

/// Converts an already-decoded `serde_json` object into a lazy map.
pub fn lazy_map_from_serde(map: SerdeMap<String, SerdeValue>) -> LazyMap {
    map.into_iter().map(|(k, v)| (k, LazyNode::from(v))).collect()
}
