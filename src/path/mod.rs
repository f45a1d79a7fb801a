//! jpath expressions: tokenizing and resolving paths.
//!
//! # Syntax
//!
//! - `key` - object field
//! - `a.b.c` - nested fields, split on the configured separator (default `.`)
//! - `key[2]` - element 2 of the array stored under `key`
//!
//! There are no wildcards, slices, filters or recursive descent. Only the first
//! `[index]` of a segment is read, so `a[0][1]` is the same as `a[0]`.
//! Negative indices parse but never resolve.
//!
//! # Examples
//!
//! ```
//! // labels.level_1.tag_name - descend through nested objects
//! // simpleArray[1]          - second element of an array
//! // users[0].profile.name   - object inside an array
//! ```

pub mod ast;
pub mod error;
pub mod navigator;
pub mod parser;

pub use ast::{KeyPath, Segment};
pub use error::{ErrorKind, JPathError};
pub use navigator::{Navigable, Navigator};
pub use parser::{Parser, DEFAULT_SEPARATOR};
