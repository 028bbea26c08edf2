//! Pairwise similarity scoring between two sequences.
//!
//! `score(i, j)` estimates how likely `left[i]` corresponds to `right[j]`:
//!
//! - two mappings score +1 for every key both map to the same scalar, and
//!   +1 for every key both map to a mapping or sequence, whatever it holds;
//! - two sequences score 1 when they have the same length;
//! - two scalars score 1 when they are equal;
//! - elements of different shapes always score 0.
//!
//! Nested contents are never looked at here. The sequence rule is a length
//! bucket only, so unrelated sequences of equal length still look alike;
//! the recursive differ is what tells them apart afterwards.

use std::collections::HashMap;

use crate::value::{Map, Value};

/// SimilarityMatrix holds the scores of every (left, right) element pair.
///
/// Scores are stored row-major in a single buffer, one row per left element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<u32>,
}

impl SimilarityMatrix {
    fn zeroed(rows: usize, cols: usize) -> Self {
        SimilarityMatrix {
            rows,
            cols,
            scores: vec![0; rows * cols],
        }
    }

    /// Number of left elements.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of right elements.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns the score of `left[row]` against `right[col]`.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.scores[row * self.cols + col]
    }

    /// Iterates over `(row, col, score)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let cols = self.cols;
        self.scores
            .iter()
            .enumerate()
            .map(move |(n, score)| (n / cols, n % cols, *score))
    }

    fn bump(&mut self, row: usize, cols: &[usize]) {
        let base = row * self.cols;
        for col in cols {
            self.scores[base + col] += 1;
        }
    }
}

/// Lookup tables over the right-hand sequence, so each left element is
/// scored against only the right elements it can share something with.
#[derive(Default)]
struct Buckets<'a> {
    /// Scalar element -> indices holding an equal scalar.
    scalars: HashMap<&'a Value, Vec<usize>>,
    /// (key, scalar) -> indices of mappings holding that entry.
    entries: HashMap<(&'a str, &'a Value), Vec<usize>>,
    /// Key -> indices of mappings mapping it to a mapping or sequence.
    complex_keys: HashMap<&'a str, Vec<usize>>,
    /// Length -> indices of sequences of that length.
    lengths: HashMap<usize, Vec<usize>>,
}

impl<'a> Buckets<'a> {
    fn new(right: &'a [Value]) -> Self {
        let mut buckets = Buckets::default();
        for (index, element) in right.iter().enumerate() {
            match element {
                Value::Map(map) => {
                    for (key, value) in map.iter() {
                        if value.is_scalar() {
                            buckets
                                .entries
                                .entry((key.as_str(), value))
                                .or_default()
                                .push(index);
                        } else {
                            buckets.complex_keys.entry(key.as_str()).or_default().push(index);
                        }
                    }
                }
                Value::List(list) => buckets.lengths.entry(list.len()).or_default().push(index),
                scalar => buckets.scalars.entry(scalar).or_default().push(index),
            }
        }
        buckets
    }

    fn score_map(&self, map: &Map, row: usize, matrix: &mut SimilarityMatrix) {
        for (key, value) in map.iter() {
            let hits = if value.is_scalar() {
                self.entries.get(&(key.as_str(), value))
            } else {
                self.complex_keys.get(key.as_str())
            };
            if let Some(cols) = hits {
                matrix.bump(row, cols);
            }
        }
    }
}

/// Builds the similarity matrix of `left` against `right`.
pub fn similarity_matrix(left: &[Value], right: &[Value]) -> SimilarityMatrix {
    let mut matrix = SimilarityMatrix::zeroed(left.len(), right.len());
    if matrix.is_empty() {
        return matrix;
    }

    let buckets = Buckets::new(right);
    for (row, element) in left.iter().enumerate() {
        let hits = match element {
            Value::Map(map) => {
                buckets.score_map(map, row, &mut matrix);
                continue;
            }
            Value::List(list) => buckets.lengths.get(&list.len()),
            scalar => buckets.scalars.get(scalar),
        };
        if let Some(cols) = hits {
            matrix.bump(row, cols);
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_yaml;

    fn list(yaml: &str) -> Vec<Value> {
        match from_yaml(yaml).unwrap() {
            Value::List(l) => l,
            other => panic!("expected a sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_scores() {
        let m = similarity_matrix(&list("[1, 2, x]"), &list("[2, x, 1, 2]"));
        assert_eq!((m.rows(), m.cols()), (3, 4));
        assert_eq!(m.get(0, 2), 1);
        assert_eq!(m.get(1, 0), 1);
        assert_eq!(m.get(1, 3), 1);
        assert_eq!(m.get(2, 1), 1);
        assert_eq!(m.get(0, 0), 0);
        assert!(m.iter().all(|(_, _, s)| s <= 1));
    }

    #[test]
    fn test_scalars_do_not_coerce() {
        let m = similarity_matrix(&list("[1, true, null]"), &list(r#"[1.0, "true", ~]"#));
        assert_eq!(m.get(0, 0), 0);
        assert_eq!(m.get(1, 1), 0);
        assert_eq!(m.get(2, 2), 1);
    }

    #[test]
    fn test_mapping_scores() {
        let left = list("[{a: 1, b: 2, c: {x: 1}, d: [1]}]");
        let right = list("[{a: 1, b: 3, c: {y: 2}, d: {z: 1}}, {a: 2}, {e: 1}]");
        let m = similarity_matrix(&left, &right);
        // a matches as an entry, c and d as complex keys; b differs.
        assert_eq!(m.get(0, 0), 3);
        assert_eq!(m.get(0, 1), 0);
        assert_eq!(m.get(0, 2), 0);
    }

    #[test]
    fn test_sequence_length_bucket() {
        let m = similarity_matrix(&list("[[1, 2], [3]]"), &list("[[9, 9], [1, 2, 3], [4]]"));
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(0, 1), 0);
        assert_eq!(m.get(1, 2), 1);
    }

    #[test]
    fn test_different_shapes_score_zero() {
        let m = similarity_matrix(&list("[1, [1], {a: 1}]"), &list("[{a: 1}, 1, [1]]"));
        assert_eq!(m.get(0, 0), 0);
        assert_eq!(m.get(1, 0), 0);
        assert_eq!(m.get(1, 1), 0);
        assert_eq!(m.get(2, 1), 0);
        assert_eq!(m.get(2, 2), 0);
        assert_eq!(m.get(0, 1), 1);
        assert_eq!(m.get(1, 2), 1);
        assert_eq!(m.get(2, 0), 1);
    }

    #[test]
    fn test_empty_side() {
        let m = similarity_matrix(&list("[1, 2]"), &[]);
        assert!(m.is_empty());
        assert_eq!(m.iter().count(), 0);
    }
}
