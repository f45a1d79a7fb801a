//! Error types for jpath construction and lookups.

use crate::document::node::NodeKind;
use thiserror::Error;

/// Errors that can occur while building an accessor or resolving a path.
#[derive(Debug, Error)]
pub enum JPathError {
    /// The source document is not valid JSON, or not a JSON object.
    #[error("failed to decode JSON document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The path separator is empty.
    #[error("path separator must not be empty")]
    EmptySeparator,

    /// A key or index has no value, or the value is `null`.
    #[error("path {path} not found")]
    PathNotFound { path: String },

    /// A plain key segment reached an array that needs an index.
    #[error("key {segment} error, array should be accessed like {segment}[index]")]
    ArrayWithoutIndex { segment: String },

    /// A non-terminal segment reached a value that cannot be descended into.
    #[error("key {segment} error, found {found} where an object or JSON object string was expected")]
    NotNavigable { segment: String, found: NodeKind },

    /// An indexed segment reached something other than an array.
    #[error("key {segment} error, found {found} where an array was expected")]
    NotAnArray { segment: String, found: NodeKind },

    /// The array index is negative or past the last element.
    #[error("key {segment} error, index {index} is out of range for an array of length {len}")]
    IndexOutOfRange {
        segment: String,
        index: i64,
        len: usize,
    },

    /// The bracketed index of a segment is not a valid integer.
    #[error("illegal index args in segment {segment}")]
    MalformedIndex { segment: String },
}

/// Coarse classification of [`JPathError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    Config,
    PathNotFound,
    TypeMismatch,
    NotAnArray,
    IndexOutOfRange,
    MalformedIndex,
}

impl JPathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JPathError::Decode(_) => ErrorKind::Decode,
            JPathError::EmptySeparator => ErrorKind::Config,
            JPathError::PathNotFound { .. } => ErrorKind::PathNotFound,
            JPathError::ArrayWithoutIndex { .. } | JPathError::NotNavigable { .. } => {
                ErrorKind::TypeMismatch
            }
            JPathError::NotAnArray { .. } => ErrorKind::NotAnArray,
            JPathError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            JPathError::MalformedIndex { .. } => ErrorKind::MalformedIndex,
        }
    }
}
