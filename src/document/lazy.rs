//! Lazily expanded JSON trees.
//!
//! A `LazyNode` mirrors [`Node`], except that every string carries a write-once
//! cell. The first time a lookup needs to descend through a string, its text is
//! decoded as a JSON object and the result (or the failure) is cached in the
//! cell. From then on the string is observably an object: `kind()` reports
//! `Object`, `as_str()` returns `None` and `to_node()` yields the object.
//!
//! The cell is a `std::cell::OnceCell`, so lazy trees are `!Sync`. Sharing one
//! across threads does not compile; use [`crate::document::tree::SharedJPath`]
//! for concurrent lookups.

use super::node::{Map, Node, NodeKind};
use super::parser::decode_lazy_object;
use indexmap::IndexMap;
use serde_json::Value as SerdeValue;
use std::cell::OnceCell;
use tracing::{debug, trace};

/// Object entries of a lazy tree.
pub type LazyMap = IndexMap<String, LazyNode>;

/// A JSON value whose strings may expand into objects on first descent.
#[derive(Debug, Clone)]
pub enum LazyNode {
    Object(LazyMap),
    Array(Vec<LazyNode>),
    String(LazyString),
    Number(f64),
    Boolean(bool),
    Null,
}

/// A string slot that remembers whether it decoded as a JSON object.
#[derive(Debug, Clone)]
pub struct LazyString {
    raw: String,
    expanded: OnceCell<Option<LazyMap>>,
}

impl LazyString {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            expanded: OnceCell::new(),
        }
    }

    /// Returns the original string text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the expanded object if a previous descent decoded one.
    ///
    /// Never triggers decoding.
    pub fn expanded(&self) -> Option<&LazyMap> {
        self.expanded.get().and_then(Option::as_ref)
    }

    /// Returns true once decoding has been attempted, successful or not.
    pub fn is_resolved(&self) -> bool {
        self.expanded.get().is_some()
    }

    /// Decodes the string as a JSON object on first call and caches the
    /// outcome. Decode failures are cached too and never reported as errors.
    pub fn expand(&self) -> Option<&LazyMap> {
        self.expanded
            .get_or_init(|| match decode_lazy_object(&self.raw) {
                Ok(map) => {
                    debug!(fields = map.len(), "expanded JSON-encoded string");
                    Some(map)
                }
                Err(err) => {
                    trace!(%err, "string is not a JSON object, keeping it as a scalar");
                    None
                }
            })
            .as_ref()
    }
}

impl LazyNode {
    /// Returns the observable kind, taking completed expansions into account.
    pub fn kind(&self) -> NodeKind {
        match self {
            LazyNode::Object(_) => NodeKind::Object,
            LazyNode::Array(_) => NodeKind::Array,
            LazyNode::String(s) if s.expanded().is_some() => NodeKind::Object,
            LazyNode::String(_) => NodeKind::String,
            LazyNode::Number(_) => NodeKind::Number,
            LazyNode::Boolean(_) => NodeKind::Boolean,
            LazyNode::Null => NodeKind::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, LazyNode::Null)
    }

    /// Returns the object behind this node without triggering expansion.
    pub fn as_object(&self) -> Option<&LazyMap> {
        match self {
            LazyNode::Object(map) => Some(map),
            LazyNode::String(s) => s.expanded(),
            _ => None,
        }
    }

    /// Returns the object to descend into, expanding a string in place if
    /// this is the first descent through it.
    pub fn descend(&self) -> Option<&LazyMap> {
        match self {
            LazyNode::Object(map) => Some(map),
            LazyNode::String(s) => s.expand(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[LazyNode]> {
        match self {
            LazyNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string text, unless it has already been expanded.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LazyNode::String(s) if s.expanded().is_none() => Some(s.raw()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LazyNode::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LazyNode::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Snapshots this node as a plain [`Node`].
    ///
    /// Expanded strings become objects; strings never descended through stay
    /// strings, even if they hold valid object text.
    pub fn to_node(&self) -> Node {
        match self {
            LazyNode::Object(map) => Node::Object(lazy_map_to_map(map)),
            LazyNode::Array(items) => Node::Array(items.iter().map(LazyNode::to_node).collect()),
            LazyNode::String(s) => match s.expanded() {
                Some(map) => Node::Object(lazy_map_to_map(map)),
                None => Node::String(s.raw().to_string()),
            },
            LazyNode::Number(n) => Node::Number(*n),
            LazyNode::Boolean(b) => Node::Boolean(*b),
            LazyNode::Null => Node::Null,
        }
    }
}

/// Snapshots a lazy map as a plain map.
pub fn lazy_map_to_map(map: &LazyMap) -> Map {
    map.iter().map(|(k, v)| (k.clone(), v.to_node())).collect()
}

impl From<SerdeValue> for LazyNode {
    fn from(value: SerdeValue) -> Self {
        match value {
            SerdeValue::Object(map) => {
                LazyNode::Object(map.into_iter().map(|(k, v)| (k, LazyNode::from(v))).collect())
            }
            SerdeValue::Array(items) => {
                LazyNode::Array(items.into_iter().map(LazyNode::from).collect())
            }
            SerdeValue::String(s) => LazyNode::String(LazyString::new(s)),
            SerdeValue::Number(n) => LazyNode::Number(n.as_f64().unwrap_or(0.0)),
            SerdeValue::Bool(b) => LazyNode::Boolean(b),
            SerdeValue::Null => LazyNode::Null,
        }
    }
}

impl From<Node> for LazyNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Object(map) => {
                LazyNode::Object(map.into_iter().map(|(k, v)| (k, LazyNode::from(v))).collect())
            }
            Node::Array(items) => LazyNode::Array(items.into_iter().map(LazyNode::from).collect()),
            Node::String(s) => LazyNode::String(LazyString::new(s)),
            Node::Number(n) => LazyNode::Number(n),
            Node::Boolean(b) => LazyNode::Boolean(b),
            Node::Null => LazyNode::Null,
        }
    }
}
