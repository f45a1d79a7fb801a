//! Plain JSON node representation.
//!
//! `Node` is the immutable tree every lookup ultimately yields. Eagerly
//! materialized documents are stored as `Node` trees directly; lazily expanded
//! documents (see [`crate::document::lazy`]) convert into `Node` on demand.
//!
//! # Example
//!
//! ```
//! use jpath::document::node::{Node, NodeKind};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Node::String("jpath".to_string()));
//! map.insert("version".to_string(), Node::Number(1.0));
//! let object = Node::Object(map);
//!
//! assert_eq!(object.kind(), NodeKind::Object);
//! assert!(object.is_container());
//! ```

use indexmap::IndexMap;
use serde_json::Value as SerdeValue;
use std::fmt;

/// Object entries keyed by field name.
pub type Map = IndexMap<String, Node>;

/// A decoded JSON value.
///
/// Numbers are always `f64`, whether or not the literal looked integral.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A JSON object
    Object(Map),
    /// A JSON array, elements may be of any kind
    Array(Vec<Node>),
    /// A JSON string, possibly holding JSON-encoded object text
    String(String),
    /// A JSON number
    Number(f64),
    /// A JSON boolean
    Boolean(bool),
    /// A JSON null
    Null,
}

/// The kind of a node, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Object => "an object",
            NodeKind::Array => "an array",
            NodeKind::String => "a string",
            NodeKind::Number => "a number",
            NodeKind::Boolean => "a boolean",
            NodeKind::Null => "null",
        };
        f.write_str(name)
    }
}

impl Node {
    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::String(_) => NodeKind::String,
            Node::Number(_) => NodeKind::Number,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Null => NodeKind::Null,
        }
    }

    /// Returns true if this node is an object or an array.
    ///
    /// # Example
    ///
    /// ```
    /// use jpath::document::node::Node;
    ///
    /// assert!(Node::Array(vec![]).is_container());
    /// assert!(!Node::Number(42.0).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts this node back into a `serde_json::Value`.
    ///
    /// Numbers that are not finite have no JSON representation and become
    /// `null`; decoding never produces them.
    pub fn to_json_value(&self) -> SerdeValue {
        match self {
            Node::Object(map) => SerdeValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
            Node::Array(items) => SerdeValue::Array(items.iter().map(Node::to_json_value).collect()),
            Node::String(s) => SerdeValue::String(s.clone()),
            Node::Number(n) => serde_json::Number::from_f64(*n)
                .map(SerdeValue::Number)
                .unwrap_or(SerdeValue::Null),
            Node::Boolean(b) => SerdeValue::Bool(*b),
            Node::Null => SerdeValue::Null,
        }
    }
}

impl From<&SerdeValue> for Node {
    fn from(value: &SerdeValue) -> Self {
        match value {
            SerdeValue::Object(map) => Node::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from(v)))
                    .collect(),
            ),
            SerdeValue::Array(items) => Node::Array(items.iter().map(Node::from).collect()),
            SerdeValue::String(s) => Node::String(s.clone()),
            SerdeValue::Number(n) => Node::Number(n.as_f64().unwrap_or(0.0)),
            SerdeValue::Bool(b) => Node::Boolean(*b),
            SerdeValue::Null => Node::Null,
        }
    }
}

impl From<SerdeValue> for Node {
    fn from(value: SerdeValue) -> Self {
        match value {
            SerdeValue::Object(map) => {
                Node::Object(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
            SerdeValue::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            SerdeValue::String(s) => Node::String(s),
            SerdeValue::Number(n) => Node::Number(n.as_f64().unwrap_or(0.0)),
            SerdeValue::Bool(b) => Node::Boolean(b),
            SerdeValue::Null => Node::Null,
        }
    }
}

impl fmt::Display for Node {
    /// Formats the node as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_decode_as_floats() {
        let node = Node::from(json!({"count": 2}));
        let map = node.as_object().unwrap();
        assert_eq!(map["count"], Node::Number(2.0));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Array.to_string(), "an array");
        assert_eq!(NodeKind::Null.to_string(), "null");
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Node::String("a".to_string()).as_str(), Some("a"));
        assert_eq!(Node::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(Node::Boolean(true).as_bool(), Some(true));
        assert_eq!(Node::Null.as_str(), None);
        assert!(Node::Null.is_null());
    }

    #[test]
    fn test_to_json_value_roundtrip() {
        let original = json!({"a": [1.0, "x", null, true], "b": {"c": 2.5}});
        let node = Node::from(&original);
        assert_eq!(node.to_json_value(), original);
    }

    #[test]
    fn test_display_is_compact_json() {
        let node = Node::Array(vec![Node::Number(2.0), Node::String("s".to_string())]);
        assert_eq!(node.to_string(), r#"[2.0,"s"]"#);
    }
}
