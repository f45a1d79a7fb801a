use super::ast::{KeyPath, Segment};
use super::error::JPathError;
use crate::document::lazy::LazyNode;
use crate::document::node::{Node, NodeKind};
use indexmap::IndexMap;

/// A tree node the navigator can walk through.
///
/// Implemented by the plain [`Node`] and the lazily expanded [`LazyNode`].
/// The only behavioural difference between the two lives in `descend`.
pub trait Navigable: Sized {
    /// The observable kind of this node.
    fn kind(&self) -> NodeKind;

    /// The object to continue a lookup in, if this node can be descended into.
    fn descend(&self) -> Option<&IndexMap<String, Self>>;

    /// The elements of this node if it is an array.
    fn elements(&self) -> Option<&[Self]>;

    fn string_value(&self) -> Option<&str>;

    fn number_value(&self) -> Option<f64>;
}

impl Navigable for Node {
    fn kind(&self) -> NodeKind {
        Node::kind(self)
    }

    fn descend(&self) -> Option<&IndexMap<String, Self>> {
        self.as_object()
    }

    fn elements(&self) -> Option<&[Self]> {
        self.as_array()
    }

    fn string_value(&self) -> Option<&str> {
        self.as_str()
    }

    fn number_value(&self) -> Option<f64> {
        self.as_f64()
    }
}

impl Navigable for LazyNode {
    fn kind(&self) -> NodeKind {
        LazyNode::kind(self)
    }

    /// Expands JSON-encoded object strings in place on first descent.
    fn descend(&self) -> Option<&IndexMap<String, Self>> {
        LazyNode::descend(self)
    }

    fn elements(&self) -> Option<&[Self]> {
        self.as_array()
    }

    fn string_value(&self) -> Option<&str> {
        self.as_str()
    }

    fn number_value(&self) -> Option<f64> {
        self.as_f64()
    }
}

/// Walks a tree segment by segment.
pub struct Navigator<'a, N> {
    root: &'a IndexMap<String, N>,
}

impl<'a, N: Navigable> Navigator<'a, N> {
    pub fn new(root: &'a IndexMap<String, N>) -> Self {
        Navigator { root }
    }

    /// Resolves `path` and returns the node it points at.
    ///
    /// The first structural mismatch, missing key or bad index ends the walk;
    /// there are no partial results. A terminal `null` counts as not found.
    pub fn resolve(&self, path: &KeyPath) -> Result<&'a N, JPathError> {
        let last = path.segments.len().saturating_sub(1);
        let mut current = self.root;

        for (position, segment) in path.segments.iter().enumerate() {
            let node = Self::step(current, segment, path, position == last)?;

            if position == last {
                if node.kind() == NodeKind::Null {
                    return Err(not_found(path));
                }
                return Ok(node);
            }

            current = node.descend().ok_or_else(|| match (segment, node.kind()) {
                (Segment::Key(_), NodeKind::Array) => JPathError::ArrayWithoutIndex {
                    segment: segment.to_string(),
                },
                (_, found) => JPathError::NotNavigable {
                    segment: segment.to_string(),
                    found,
                },
            })?;
        }

        Err(not_found(path))
    }

    /// Looks up a single segment in `current`.
    fn step(
        current: &'a IndexMap<String, N>,
        segment: &Segment,
        path: &KeyPath,
        terminal: bool,
    ) -> Result<&'a N, JPathError> {
        // A missing key only means "not found" at the end of the path. Earlier
        // on, the absent value is treated as null and fails to dereference.
        let node = current.get(segment.key()).ok_or_else(|| match segment {
            Segment::Indexed { .. } => JPathError::NotAnArray {
                segment: segment.to_string(),
                found: NodeKind::Null,
            },
            Segment::Key(_) if terminal => not_found(path),
            Segment::Key(_) => JPathError::NotNavigable {
                segment: segment.to_string(),
                found: NodeKind::Null,
            },
        })?;

        match segment {
            Segment::Key(_) => Ok(node),
            Segment::Indexed { index, .. } => {
                let items = node.elements().ok_or_else(|| JPathError::NotAnArray {
                    segment: segment.to_string(),
                    found: node.kind(),
                })?;
                // Negative indices are rejected, there is no wrap-around.
                usize::try_from(*index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| JPathError::IndexOutOfRange {
                        segment: segment.to_string(),
                        index: *index,
                        len: items.len(),
                    })
            }
        }
    }
}

fn not_found(path: &KeyPath) -> JPathError {
    JPathError::PathNotFound {
        path: path.source.clone(),
    }
}

/// Converts a number to `i64` when it is integral and in range.
pub fn integral_i64(n: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the cast rounds up to 2^63.
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}
