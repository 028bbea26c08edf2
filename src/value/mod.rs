//! Value module - In-memory representation of parsed YAML/JSON documents.
//!
//! This module provides the three-shape value model the differ walks.

mod value;

pub use value::*;
