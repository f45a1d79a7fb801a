//! Path accessors over decoded JSON documents.
//!
//! Two accessors share one lookup API, the [`Lookup`] trait:
//!
//! - [`JPath`] keeps JSON-encoded strings as they are and expands them the
//!   first time a lookup descends through them. Expansion writes to the tree,
//!   so a `JPath` is `!Sync` and must not be shared between threads.
//! - [`SharedJPath`] expands every encoded string once, at construction, and
//!   never writes to its tree again. It is `Send + Sync`.
//!
//! # Example
//!
//! ```
//! use jpath::document::tree::{JPath, Lookup, SharedJPath};
//!
//! let source = r#"{"labels": "{\"level_1\": {\"tag_name\": \"school\"}}", "ids": [1, 2, 3]}"#;
//!
//! let lazy = JPath::new(source).unwrap();
//! assert_eq!(lazy.find_string("labels.level_1.tag_name"), "school");
//!
//! let shared = SharedJPath::new(source).unwrap();
//! assert_eq!(shared.find_f64("ids[1]"), 2.0);
//! assert_eq!(shared.find_i64("ids[2]"), 3);
//! ```

use super::lazy::{lazy_map_to_map, LazyMap, LazyNode};
use super::materialize::materialize;
use super::node::{Map, Node};
use super::parser::{decode_lazy_object, decode_object, lazy_map_from_serde, map_from_serde};
use crate::path::navigator::integral_i64;
use crate::path::{JPathError, Navigable, Navigator, Parser, DEFAULT_SEPARATOR};
use indexmap::IndexMap;
use serde_json::{Map as SerdeMap, Value as SerdeValue};
use tracing::{debug, trace, warn};

/// Path lookups over a decoded document.
///
/// Only [`find`](Lookup::find) reports errors. The typed helpers return the
/// zero value of their type when the path does not resolve or the value has a
/// different kind.
pub trait Lookup {
    type Node: Navigable;

    /// The root object of the document.
    fn root(&self) -> &IndexMap<String, Self::Node>;

    /// The separator paths are split on.
    fn separator(&self) -> &str;

    /// Resolves `path` and returns the value it points at.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError`] for malformed index tokens, missing or `null`
    /// values, kind mismatches and out-of-range indices.
    fn find(&self, path: &str) -> Result<&Self::Node, JPathError> {
        let parsed = Parser::new(self.separator())?.parse(path)?;
        let found = Navigator::new(self.root()).resolve(&parsed)?;
        trace!(path, kind = %found.kind(), "resolved path");
        Ok(found)
    }

    /// Resolves `path`, logging the error instead of returning it.
    fn find_or_log(&self, path: &str) -> Option<&Self::Node> {
        match self.find(path) {
            Ok(found) => Some(found),
            Err(err) => {
                warn!(path, %err, "lookup failed");
                None
            }
        }
    }

    /// Returns the string at `path`, or `""`.
    fn find_string(&self, path: &str) -> String {
        self.find(path)
            .ok()
            .and_then(|node| node.string_value())
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Returns the integral number at `path`, or `0`.
    ///
    /// Decoded numbers are always `f64`, so requiring an integer-typed value
    /// would never succeed. An integral `f64` inside the `i64` range is
    /// converted instead; values with a fractional part or out of range count
    /// as a mismatch.
    fn find_i64(&self, path: &str) -> i64 {
        self.find(path)
            .ok()
            .and_then(|node| node.number_value())
            .and_then(integral_i64)
            .unwrap_or(0)
    }

    /// Returns the number at `path`, or `0.0`.
    fn find_f64(&self, path: &str) -> f64 {
        self.find(path)
            .ok()
            .and_then(|node| node.number_value())
            .unwrap_or(0.0)
    }
}

fn checked_separator(separator: impl Into<String>) -> Result<String, JPathError> {
    let separator = separator.into();
    if separator.is_empty() {
        return Err(JPathError::EmptySeparator);
    }
    Ok(separator)
}

/// Accessor that expands JSON-encoded strings on first descent.
///
/// Single-threaded only: lookups may write to the tree, so `JPath` is not
/// `Sync` and cannot be borrowed from several threads.
///
/// ```compile_fail
/// use jpath::{JPath, Lookup};
///
/// let jpath = JPath::new(r#"{"a": "{\"b\": 1}"}"#).unwrap();
/// std::thread::scope(|scope| {
///     scope.spawn(|| jpath.find_i64("a.b"));
///     scope.spawn(|| jpath.find_i64("a.b"));
/// });
/// ```
#[derive(Debug, Clone)]
pub struct JPath {
    root: LazyMap,
    separator: String,
}

impl JPath {
    /// Decodes `source` and splits paths on `.`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::Decode`] if `source` is not a JSON object.
    pub fn new(source: &str) -> Result<Self, JPathError> {
        Self::with_separator(source, DEFAULT_SEPARATOR)
    }

    /// Decodes `source` and splits paths on `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::EmptySeparator`] or [`JPathError::Decode`].
    pub fn with_separator(source: &str, separator: impl Into<String>) -> Result<Self, JPathError> {
        let separator = checked_separator(separator)?;
        let root = decode_lazy_object(source)?;
        debug!(fields = root.len(), "decoded document for lazy lookups");
        Ok(Self { root, separator })
    }

    /// Wraps an already-decoded object.
    pub fn from_map(map: SerdeMap<String, SerdeValue>) -> Self {
        Self {
            root: lazy_map_from_serde(map),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Wraps an already-decoded object and splits paths on `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::EmptySeparator`].
    pub fn from_map_with_separator(
        map: SerdeMap<String, SerdeValue>,
        separator: impl Into<String>,
    ) -> Result<Self, JPathError> {
        Ok(Self {
            root: lazy_map_from_serde(map),
            separator: checked_separator(separator)?,
        })
    }

    /// Snapshots the document, including the expansions made so far.
    pub fn to_node(&self) -> Node {
        Node::Object(lazy_map_to_map(&self.root))
    }
}

impl Lookup for JPath {
    type Node = LazyNode;

    fn root(&self) -> &LazyMap {
        &self.root
    }

    fn separator(&self) -> &str {
        &self.separator
    }
}

/// Accessor whose document is fully expanded up front and read-only after.
///
/// Safe to share between threads, e.g. behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedJPath {
    root: Map,
    separator: String,
}

impl SharedJPath {
    /// Decodes and materializes `source`, splitting paths on `.`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::Decode`] if `source` is not a JSON object.
    pub fn new(source: &str) -> Result<Self, JPathError> {
        Self::with_separator(source, DEFAULT_SEPARATOR)
    }

    /// Decodes and materializes `source`, splitting paths on `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::EmptySeparator`] or [`JPathError::Decode`].
    pub fn with_separator(source: &str, separator: impl Into<String>) -> Result<Self, JPathError> {
        let separator = checked_separator(separator)?;
        let root = decode_object(source)?;
        Ok(Self::materialized(root, separator))
    }

    /// Materializes an already-decoded object.
    pub fn from_map(map: SerdeMap<String, SerdeValue>) -> Self {
        Self::materialized(map_from_serde(map), DEFAULT_SEPARATOR.to_string())
    }

    /// Materializes an already-decoded object and splits paths on `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::EmptySeparator`].
    pub fn from_map_with_separator(
        map: SerdeMap<String, SerdeValue>,
        separator: impl Into<String>,
    ) -> Result<Self, JPathError> {
        let separator = checked_separator(separator)?;
        Ok(Self::materialized(map_from_serde(map), separator))
    }

    fn materialized(mut root: Map, separator: String) -> Self {
        let stats = materialize(&mut root);
        if stats.dropped_elements > 0 {
            debug!(
                dropped = stats.dropped_elements,
                "non-object array elements discarded during materialization"
            );
        }
        Self { root, separator }
    }

    /// Returns the materialized document.
    pub fn to_node(&self) -> Node {
        Node::Object(self.root.clone())
    }
}

impl Lookup for SharedJPath {
    type Node = Node;

    fn root(&self) -> &Map {
        &self.root
    }

    fn separator(&self) -> &str {
        &self.separator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::NodeKind;
    use crate::path::ErrorKind;
    use serde_json::json;

    const SIMPLE: &str = r#"{"simpleArray":[1,2,3],"labels":"{\"level_1\":{\"tag_id\":\"example-1\",\"tag_name\":\"school\",\"prob\":1,\"level\":1},\"level_2\":{\"tag_id\":\"example-2\",\"tag_name\":\"class\",\"prob\":1,\"level\":2}}"}"#;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_jpath_is_send_sync() {
        assert_send_sync::<SharedJPath>();
    }

    #[test]
    fn test_lazy_lookup_expands_in_place() {
        let jpath = JPath::new(SIMPLE).unwrap();
        assert_eq!(jpath.find("labels").unwrap().kind(), NodeKind::String);

        assert_eq!(jpath.find_string("labels.level_1.tag_name"), "school");
        assert_eq!(jpath.find("labels").unwrap().kind(), NodeKind::Object);
        assert_eq!(jpath.find_string("labels"), "");
    }

    #[test]
    fn test_shared_lookup_is_expanded_up_front() {
        let jpath = SharedJPath::new(SIMPLE).unwrap();
        assert_eq!(jpath.find("labels").unwrap().kind(), NodeKind::Object);
        assert_eq!(jpath.find_string("labels.level_2.tag_name"), "class");
    }

    #[test]
    fn test_construction_rejects_bad_input() {
        assert_eq!(JPath::new("{").unwrap_err().kind(), ErrorKind::Decode);
        assert_eq!(SharedJPath::new("[1]").unwrap_err().kind(), ErrorKind::Decode);
        assert_eq!(
            JPath::with_separator(SIMPLE, "").unwrap_err().kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_typed_accessors_fall_back_to_zero_values() {
        let jpath = JPath::new(SIMPLE).unwrap();
        assert_eq!(jpath.find_string("simpleArray[0]"), "");
        assert_eq!(jpath.find_i64("labels.level_1.tag_name"), 0);
        assert_eq!(jpath.find_f64("missing"), 0.0);
        assert_eq!(jpath.find_i64("simpleArray[9]"), 0);
    }

    #[test]
    fn test_typed_accessors_read_numbers() {
        let jpath = JPath::new(SIMPLE).unwrap();
        assert_eq!(jpath.find_f64("labels.level_2.level"), 2.0);
        assert_eq!(jpath.find_i64("labels.level_2.level"), 2);
    }

    #[test]
    fn test_find_i64_rejects_fractions() {
        let jpath = JPath::new(r#"{"ratio": 0.5}"#).unwrap();
        assert_eq!(jpath.find_i64("ratio"), 0);
        assert_eq!(jpath.find_f64("ratio"), 0.5);
    }

    #[test]
    fn test_find_or_log() {
        let jpath = SharedJPath::new(SIMPLE).unwrap();
        assert!(jpath.find_or_log("simpleArray[5]").is_none());
        assert_eq!(
            jpath.find_or_log("simpleArray[1]"),
            Some(&Node::Number(2.0))
        );
    }

    #[test]
    fn test_from_map_with_separator() {
        let map = match json!({"a": {"b": "{\"c\": 1}"}}) {
            SerdeValue::Object(map) => map,
            _ => unreachable!(),
        };
        let lazy = JPath::from_map_with_separator(map.clone(), "/").unwrap();
        assert_eq!(lazy.find_i64("a/b/c"), 1);
        assert_eq!(lazy.separator(), "/");

        let shared = SharedJPath::from_map_with_separator(map, "/").unwrap();
        assert_eq!(shared.find_i64("a/b/c"), 1);
    }

    #[test]
    fn test_to_node_snapshots() {
        let jpath = JPath::new(SIMPLE).unwrap();
        jpath.find("labels.level_1").unwrap();
        let snapshot = jpath.to_node();
        assert_eq!(snapshot, SharedJPath::new(SIMPLE).unwrap().to_node());
    }
}
