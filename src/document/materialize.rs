//! Eager expansion of JSON-encoded strings.
//!
//! [`materialize`] walks a whole tree once and replaces every string that
//! decodes as a JSON object with the decoded object. Afterwards no lookup
//! needs to write to the tree, which is what makes
//! [`SharedJPath`](crate::document::tree::SharedJPath) safe to share.
//!
//! # Arrays
//!
//! Arrays follow an asymmetric rule kept for compatibility with existing
//! documents:
//!
//! - if at least one element is an object, or a string that decodes as one,
//!   the array is replaced by *only* those elements (expanded and materialized)
//!   and every other element is dropped;
//! - otherwise the array is left untouched and its elements are not visited.
//!
//! So `["x", {"a": 1}, 3]` becomes `[{"a": 1}]`, while `[1, "x"]` stays as is.
//! Nested arrays are never descended into.

use super::node::{Map, Node};
use super::parser::decode_object;
use tracing::debug;

/// Counters describing what a materialization pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeStats {
    /// Strings replaced by their decoded object
    pub expanded_strings: usize,
    /// Arrays reduced to their object elements
    pub filtered_arrays: usize,
    /// Array elements discarded by the reduction
    pub dropped_elements: usize,
}

impl MaterializeStats {
    /// Returns true if the pass left the tree unchanged.
    pub fn is_noop(&self) -> bool {
        self.expanded_strings == 0 && self.dropped_elements == 0
    }
}

/// Expands every JSON-encoded object string reachable from `map`.
///
/// Running it again on the same map changes nothing.
///
/// # Example
///
/// ```
/// use jpath::document::materialize::materialize;
/// use jpath::document::parser::decode_object;
/// use jpath::document::node::Node;
///
/// let mut map = decode_object(r#"{"labels": "{\"a\": 1}"}"#).unwrap();
/// let stats = materialize(&mut map);
///
/// assert_eq!(stats.expanded_strings, 1);
/// assert!(matches!(map["labels"], Node::Object(_)));
/// ```
pub fn materialize(map: &mut Map) -> MaterializeStats {
    let mut stats = MaterializeStats::default();
    materialize_map(map, &mut stats);
    debug!(
        expanded_strings = stats.expanded_strings,
        filtered_arrays = stats.filtered_arrays,
        dropped_elements = stats.dropped_elements,
        "materialized document"
    );
    stats
}

fn materialize_map(map: &mut Map, stats: &mut MaterializeStats) {
    for value in map.values_mut() {
        match value {
            Node::Object(inner) => materialize_map(inner, stats),
            Node::String(text) => {
                if let Ok(mut decoded) = decode_object(text) {
                    stats.expanded_strings += 1;
                    materialize_map(&mut decoded, stats);
                    *value = Node::Object(decoded);
                }
            }
            Node::Array(items) => materialize_array(items, stats),
            _ => {}
        }
    }
}

fn materialize_array(items: &mut Vec<Node>, stats: &mut MaterializeStats) {
    // Taking an object out is fine: its presence means `items` gets replaced.
    let mut objects = Vec::new();
    for item in items.iter_mut() {
        match item {
            Node::Object(inner) => objects.push(std::mem::take(inner)),
            Node::String(text) => {
                if let Ok(decoded) = decode_object(text) {
                    stats.expanded_strings += 1;
                    objects.push(decoded);
                }
            }
            _ => {}
        }
    }

    if objects.is_empty() {
        return;
    }

    if objects.len() < items.len() {
        stats.filtered_arrays += 1;
        stats.dropped_elements += items.len() - objects.len();
    }

    *items = objects
        .into_iter()
        .map(|mut inner| {
            materialize_map(&mut inner, stats);
            Node::Object(inner)
        })
        .collect();
}
