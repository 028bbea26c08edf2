//! Path segment and mismatch path types.

use crate::value::Value;
use std::cmp::Ordering;
use std::fmt;

/// Side selects one of the two documents being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// IndexPair locates a sequence element on either side of a comparison.
///
/// Exactly one index is present for an element that found no counterpart;
/// both are present when the divergence lies inside a matched element.
/// Indices refer to the original sequence positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPair {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl IndexPair {
    /// An element present only in the left sequence.
    pub fn left_only(index: usize) -> Self {
        IndexPair {
            left: Some(index),
            right: None,
        }
    }

    /// An element present only in the right sequence.
    pub fn right_only(index: usize) -> Self {
        IndexPair {
            left: None,
            right: Some(index),
        }
    }

    /// A pair of elements the matcher claimed as counterparts.
    pub fn matched(left: usize, right: usize) -> Self {
        IndexPair {
            left: Some(left),
            right: Some(right),
        }
    }

    /// Returns the index for the given side.
    pub fn get(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_one_sided(&self) -> bool {
        self.left.is_none() != self.right.is_none()
    }
}

/// PathSegment is one step of a mismatch path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key at which the divergence continues.
    Key(String),
    /// Sequence position(s) at which the divergence continues.
    Index(IndexPair),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    pub fn left_only(index: usize) -> Self {
        PathSegment::Index(IndexPair::left_only(index))
    }

    pub fn right_only(index: usize) -> Self {
        PathSegment::Index(IndexPair::right_only(index))
    }

    pub fn matched(left: usize, right: usize) -> Self {
        PathSegment::Index(IndexPair::matched(left, right))
    }
}

impl PartialOrd for PathSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathSegment::Key(a), PathSegment::Key(b)) => a.cmp(b),
            (PathSegment::Index(a), PathSegment::Index(b)) => a.cmp(b),
            (PathSegment::Key(_), PathSegment::Index(_)) => Ordering::Less,
            (PathSegment::Index(_), PathSegment::Key(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(index: Option<usize>) -> String {
            index.map_or_else(|| "-".to_string(), |i| i.to_string())
        }

        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(pair) => write!(f, "({}/{})", side(pair.left), side(pair.right)),
        }
    }
}

/// MismatchPath is the root-first route to one point where two documents diverge.
///
/// The last segment is always the divergence itself: a key whose leaf values
/// differ, or a sequence element with no counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MismatchPath {
    segments: Vec<PathSegment>,
}

impl MismatchPath {
    /// Creates a path from a vector of segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        MismatchPath { segments }
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walks this path into `root` and returns the value found on `side`.
    ///
    /// Returns `None` when the path leaves the document on that side: an
    /// index pair without an index for `side`, a missing key, or a segment
    /// that does not fit the shape of the value it is applied to.
    pub fn resolve<'a>(&self, root: &'a Value, side: Side) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Key(name), Value::Map(map)) => map.get(name)?,
                (PathSegment::Index(pair), Value::List(list)) => list.get(pair.get(side)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl FromIterator<PathSegment> for MismatchPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        MismatchPath {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MismatchPath {
    type Item = PathSegment;
    type IntoIter = std::vec::IntoIter<PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a MismatchPath {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for MismatchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for segment in &self.segments {
            write!(f, "->{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_yaml;

    #[test]
    fn test_index_pair_sides() {
        let pair = IndexPair::left_only(3);
        assert!(pair.is_one_sided());
        assert_eq!(pair.get(Side::Left), Some(3));
        assert_eq!(pair.get(Side::Right), None);

        assert!(!IndexPair::matched(1, 2).is_one_sided());
    }

    #[test]
    fn test_path_display() {
        let path = MismatchPath::from_segments(vec![
            PathSegment::key("a"),
            PathSegment::matched(0, 2),
            PathSegment::key("b"),
            PathSegment::left_only(3),
        ]);
        assert_eq!(path.len(), 4);
        assert_eq!(path.to_string(), "root->a->(0/2)->b->(3/-)");
    }

    #[test]
    fn test_segment_ordering() {
        let a = PathSegment::key("a");
        let b = PathSegment::key("b");
        assert!(a < b);
        // Keys sort before index pairs.
        assert!(b < PathSegment::left_only(0));
    }

    #[test]
    fn test_resolve() {
        let left = from_yaml("a: [1, 2, {b: x}]").unwrap();
        let right = from_yaml("a: [{b: y}, 1]").unwrap();

        let path = MismatchPath::from_segments(vec![
            PathSegment::key("a"),
            PathSegment::matched(2, 0),
            PathSegment::key("b"),
        ]);
        assert_eq!(path.resolve(&left, Side::Left), Some(&Value::from("x")));
        assert_eq!(path.resolve(&right, Side::Right), Some(&Value::from("y")));

        let one_sided = MismatchPath::from_segments(vec![
            PathSegment::key("a"),
            PathSegment::left_only(1),
        ]);
        assert_eq!(one_sided.resolve(&left, Side::Left), Some(&Value::Int(2)));
        assert_eq!(one_sided.resolve(&right, Side::Right), None);
    }

    #[test]
    fn test_resolve_missing_key() {
        let doc = from_yaml("a: 1").unwrap();
        let path = MismatchPath::from_segments(vec![PathSegment::key("k")]);
        assert_eq!(path.resolve(&doc, Side::Left), None);
    }
}
