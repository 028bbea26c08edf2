//! # Semantic YAML Diff
//!
//! A content-matching structural diff for YAML/JSON configuration documents.
//!
//! Unlike a textual or positional diff, sequence elements are paired by how
//! similar their contents are, so reordering or inserting list entries does
//! not make every following entry look different. The output is the set of
//! places where the two documents diverge, not an edit script.
//!
//! ```
//! use semantic_yaml_diff::{diff, value::from_yaml};
//!
//! let left = from_yaml("{a: [1, 2, 3, 5]}").unwrap();
//! let right = from_yaml("{a: [5, 1, 2, 4]}").unwrap();
//! let paths = diff(&left, &right).unwrap();
//! let rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
//! assert_eq!(rendered.len(), 2);
//! assert!(rendered.contains(&"root->a->(2/-)".to_string()));
//! assert!(rendered.contains(&"root->a->(-/3)".to_string()));
//! ```
//!
//! Scalars compare by strict equality: `1`, `1.0` and `true` are different
//! values, and a NaN float equals nothing, not even itself. A document that
//! contains NaN therefore reports mismatches against its own copy.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of parsed YAML/JSON documents
//! - [`path`] - Mismatch paths locating divergences in a pair of documents
//! - [`diff`] - Similarity scoring, greedy matching and the recursive differ

pub mod diff;
pub mod path;
pub mod value;

pub use diff::{diff, diff_lists, diff_maps, DiffError, DiffOptions, DiffResult, Differ};
pub use path::{IndexPair, MismatchPath, PathSegment, Side};
pub use value::{Map, Shape, Value};
