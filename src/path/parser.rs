//! jpath expression tokenizer.
//!
//! A path is split on the separator. A segment ending in `]` carries an array
//! index: the first `[<integer>]` group is the index and everything before it
//! is the key. Only one bracket group is recognized per segment, so
//! `matrix[0][1]` reads as key `matrix`, index `0`.

use super::ast::{KeyPath, Segment};
use super::error::JPathError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

static INDEX_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[-?[0-9]+\]").expect("index token pattern is valid"));

/// Tokenizer for jpath expressions.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    separator: &'a str,
}

impl<'a> Parser<'a> {
    /// Creates a tokenizer splitting on `separator`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::EmptySeparator`] if `separator` is empty.
    pub fn new(separator: &'a str) -> Result<Self, JPathError> {
        if separator.is_empty() {
            return Err(JPathError::EmptySeparator);
        }
        Ok(Self { separator })
    }

    /// Tokenizes `path` with the default `.` separator.
    ///
    /// # Example
    ///
    /// ```
    /// use jpath::path::{Parser, Segment};
    ///
    /// let path = Parser::parse_default("a.b[2].c").unwrap();
    /// assert_eq!(path.segments[1], Segment::Indexed { key: "b".to_string(), index: 2 });
    /// ```
    pub fn parse_default(path: &str) -> Result<KeyPath, JPathError> {
        Parser { separator: DEFAULT_SEPARATOR }.parse(path)
    }

    /// Tokenizes `path`.
    ///
    /// # Errors
    ///
    /// Returns [`JPathError::MalformedIndex`] if a segment ends in `]` but has
    /// no `[<integer>]` group, or the integer does not fit in an `i64`.
    pub fn parse(&self, path: &str) -> Result<KeyPath, JPathError> {
        let segments = path
            .split(self.separator)
            .map(parse_segment)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KeyPath::new(path, segments))
    }
}

fn parse_segment(raw: &str) -> Result<Segment, JPathError> {
    if !raw.ends_with(']') {
        return Ok(Segment::Key(raw.to_string()));
    }

    let malformed = || JPathError::MalformedIndex {
        segment: raw.to_string(),
    };
    let token = INDEX_TOKEN.find(raw).ok_or_else(malformed)?;
    let index = raw[token.start() + 1..token.end() - 1]
        .parse::<i64>()
        .map_err(|_| malformed())?;

    Ok(Segment::Indexed {
        key: raw[..token.start()].to_string(),
        index,
    })
}
