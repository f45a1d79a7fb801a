//! Parsed representation of jpath expressions.

use std::fmt;

/// One separator-delimited component of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain object key (`name`)
    Key(String),
    /// Object key followed by an array index (`name[2]`)
    Indexed { key: String, index: i64 },
}

impl Segment {
    /// Returns the object key this segment looks up.
    pub fn key(&self) -> &str {
        match self {
            Segment::Key(key) | Segment::Indexed { key, .. } => key,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Indexed { key, index } => write!(f, "{}[{}]", key, index),
        }
    }
}

/// A complete, tokenized jpath expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    /// The expression as written, used in diagnostics.
    pub source: String,
    /// Segments in lookup order; never empty.
    pub segments: Vec<Segment>,
}

impl KeyPath {
    pub fn new(source: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            source: source.into(),
            segments,
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
