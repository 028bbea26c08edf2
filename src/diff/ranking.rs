//! Ranking of candidate element pairings.

use super::similarity::SimilarityMatrix;

/// SimilarityEntry is one candidate pairing of a left and a right element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarityEntry {
    pub score: u32,
    pub left: usize,
    pub right: usize,
}

impl SimilarityEntry {
    pub fn new(score: u32, left: usize, right: usize) -> Self {
        SimilarityEntry { score, left, right }
    }
}

/// Flattens the matrix and sorts the entries by score, highest first.
///
/// Entries with equal scores keep their row-major order (left index, then
/// right index, ascending). The greedy matcher depends on this order being
/// reproducible.
pub fn rank(matrix: &SimilarityMatrix) -> Vec<SimilarityEntry> {
    let mut entries: Vec<SimilarityEntry> = matrix
        .iter()
        .map(|(left, right, score)| SimilarityEntry::new(score, left, right))
        .collect();
    // sort_by is stable
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}
