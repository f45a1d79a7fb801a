//! jpath - path lookups over JSON documents.
//!
//! Resolve dotted/bracketed paths such as `labels.level_1.tag_name` or
//! `items[2].id` against a JSON object without a static schema. String values
//! that themselves hold JSON object text are expanded into navigable objects,
//! either lazily on first descent ([`JPath`]) or eagerly at construction
//! ([`SharedJPath`], safe for concurrent lookups).
//!
//! # Example
//!
//! ```
//! use jpath::{JPath, Lookup};
//!
//! let doc = JPath::new(r#"{"event": "{\"user\": {\"id\": 7}}"}"#).unwrap();
//! assert_eq!(doc.find_i64("event.user.id"), 7);
//! assert!(doc.find("event.user.name").is_err());
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod path;

pub use document::node::{Node, NodeKind};
pub use document::tree::{JPath, Lookup, SharedJPath};
pub use path::{ErrorKind, JPathError};
