//! Error types for diff operations.

use crate::path::MismatchPath;
use crate::value::Shape;
use thiserror::Error;

/// DiffError reports why a diff could not be completed.
///
/// Ordinary divergences between the documents are never errors; they are
/// returned as mismatch paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// Two sequence elements were matched for recursion but have different shapes.
    #[error("{path}: matched elements have different shapes: {left} vs {right}")]
    ShapeMismatch {
        path: MismatchPath,
        left: Shape,
        right: Shape,
    },

    #[error("{path}: nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { path: MismatchPath, limit: usize },

    /// The document roots differ but are not both mappings or both sequences.
    #[error("documents differ at the root: left is a {left}, right is a {right}")]
    RootMismatch { left: Shape, right: Shape },
}

impl DiffError {
    /// Returns true if this error signals a broken matcher invariant rather
    /// than a property of the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, DiffError::ShapeMismatch { .. })
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
