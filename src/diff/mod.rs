//! Diff module - Content-matching structural diff of two documents.
//!
//! Mappings are compared key by key. Sequences are compared by content:
//! every left element is scored against every right element (see
//! [`similarity`]), the candidate pairs are ranked (see [`ranking`]) and
//! claimed greedily, and matched mappings or sequences are diffed
//! recursively. The result is a list of [`MismatchPath`]s, one per point
//! of divergence.
//!
//! Recursion depth follows the nesting depth of the documents. Set
//! [`DiffOptions::max_depth`] to fail fast on untrusted input.

mod error;
mod mapping;
mod options;
pub mod ranking;
mod sequence;
pub mod similarity;


pub use error::*;
pub use options::*;
pub use ranking::{rank, SimilarityEntry};
pub use sequence::{match_elements, Matching};
pub use similarity::{similarity_matrix, SimilarityMatrix};

use tracing::debug;

use crate::path::{MismatchPath, PathSegment};
use crate::value::{Map, Value};

/// Differ runs diffs with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    pub fn new(options: DiffOptions) -> Self {
        Differ { options }
    }

    /// Diffs two documents.
    ///
    /// Two mappings are compared with the mapping differ and two sequences
    /// with the sequence differ. Any other pair of roots either is equal,
    /// giving no mismatches, or fails with [`DiffError::RootMismatch`].
    ///
    /// A document diffed against itself yields no mismatches, with one
    /// exception: a NaN scalar is not equal to itself, so a NaN sequence
    /// element is reported as unmatched on both sides and a NaN under a
    /// mapping key is reported at that key.
    pub fn diff(&self, left: &Value, right: &Value) -> DiffResult<Vec<MismatchPath>> {
        debug!(left = %left.shape(), right = %right.shape(), "diffing documents");
        let mut walker = Walker::new(&self.options);
        match (left, right) {
            (Value::Map(a), Value::Map(b)) => walker.diff_maps(a, b)?,
            (Value::List(a), Value::List(b)) => walker.diff_lists(a, b)?,
            (a, b) if a == b => {}
            (a, b) => {
                return Err(DiffError::RootMismatch {
                    left: a.shape(),
                    right: b.shape(),
                })
            }
        }
        debug!(mismatches = walker.out.len(), "diff complete");
        Ok(walker.out)
    }

    /// Diffs two mappings.
    pub fn diff_maps(&self, left: &Map, right: &Map) -> DiffResult<Vec<MismatchPath>> {
        let mut walker = Walker::new(&self.options);
        walker.diff_maps(left, right)?;
        Ok(walker.out)
    }

    /// Diffs two sequences by content.
    pub fn diff_lists(&self, left: &[Value], right: &[Value]) -> DiffResult<Vec<MismatchPath>> {
        let mut walker = Walker::new(&self.options);
        walker.diff_lists(left, right)?;
        Ok(walker.out)
    }
}

/// Diffs two documents with default options.
pub fn diff(left: &Value, right: &Value) -> DiffResult<Vec<MismatchPath>> {
    Differ::default().diff(left, right)
}

/// Diffs two mappings with default options.
pub fn diff_maps(left: &Map, right: &Map) -> DiffResult<Vec<MismatchPath>> {
    Differ::default().diff_maps(left, right)
}

/// Diffs two sequences with default options.
pub fn diff_lists(left: &[Value], right: &[Value]) -> DiffResult<Vec<MismatchPath>> {
    Differ::default().diff_lists(left, right)
}

/// Walker carries the state of one diff run through the recursion: the
/// segments leading to the containers being compared, and the mismatch
/// paths found so far.
struct Walker<'o> {
    options: &'o DiffOptions,
    prefix: Vec<PathSegment>,
    out: Vec<MismatchPath>,
}

impl<'o> Walker<'o> {
    fn new(options: &'o DiffOptions) -> Self {
        Walker {
            options,
            prefix: Vec::new(),
            out: Vec::new(),
        }
    }

    /// Returns the path to the containers currently being compared.
    fn prefix(&self) -> MismatchPath {
        MismatchPath::from_segments(self.prefix.clone())
    }

    fn enter(&mut self, segment: PathSegment) {
        self.prefix.push(segment);
    }

    fn leave(&mut self) {
        self.prefix.pop();
    }

    /// Records a divergence at `segment` below the current prefix.
    fn emit(&mut self, segment: PathSegment) {
        let mut segments = Vec::with_capacity(self.prefix.len() + 1);
        segments.extend_from_slice(&self.prefix);
        segments.push(segment);
        self.out.push(MismatchPath::from_segments(segments));
    }

    fn check_depth(&self) -> DiffResult<()> {
        match self.options.max_depth {
            Some(limit) if self.prefix.len() > limit => Err(DiffError::DepthLimitExceeded {
                path: self.prefix(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}
