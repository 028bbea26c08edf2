//! Path module - Locates divergences inside a pair of documents.
//!
//! A [`MismatchPath`] is a route of mapping keys and sequence index pairs
//! from the document root down to the point where the two sides differ.

mod path;

pub use path::*;
