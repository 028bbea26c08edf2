//! Content-based matching and diffing of sequences.

use tracing::trace;

use super::ranking::rank;
use super::similarity::similarity_matrix;
use super::{DiffError, DiffResult, Walker};
use crate::path::{IndexPair, PathSegment};
use crate::value::Value;

/// Per-index matching state. Terminal once it leaves `Unseen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexState {
    Unseen,
    Matched,
    Mismatched,
}

/// Matching is the outcome of pairing the elements of two sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    /// Claimed `(left, right)` pairs, in the order they were claimed.
    pub matched: Vec<(usize, usize)>,
    /// Elements with no counterpart, each one-sided.
    pub unmatched: Vec<IndexPair>,
}

/// Pairs the elements of `left` and `right` by content.
///
/// Candidate pairs are consumed highest score first. A pair with a positive
/// score is claimed when neither element has been claimed yet; a zero-score
/// pair marks whichever of its elements are still unclaimed as unmatched.
/// Elements still unclaimed once every pair has been consumed are unmatched
/// as well.
pub fn match_elements(left: &[Value], right: &[Value]) -> Matching {
    let ranked = rank(&similarity_matrix(left, right));

    let mut left_state = vec![IndexState::Unseen; left.len()];
    let mut right_state = vec![IndexState::Unseen; right.len()];
    let mut matching = Matching::default();

    for entry in &ranked {
        let (i, j) = (entry.left, entry.right);
        if entry.score > 0 {
            if left_state[i] == IndexState::Unseen && right_state[j] == IndexState::Unseen {
                left_state[i] = IndexState::Matched;
                right_state[j] = IndexState::Matched;
                matching.matched.push((i, j));
            }
            continue;
        }

        if left_state[i] == IndexState::Unseen {
            left_state[i] = IndexState::Mismatched;
            matching.unmatched.push(IndexPair::left_only(i));
        }
        if right_state[j] == IndexState::Unseen {
            right_state[j] = IndexState::Mismatched;
            matching.unmatched.push(IndexPair::right_only(j));
        }
    }

    // Stragglers
    for (i, state) in left_state.iter().enumerate() {
        if *state == IndexState::Unseen {
            matching.unmatched.push(IndexPair::left_only(i));
        }
    }
    for (j, state) in right_state.iter().enumerate() {
        if *state == IndexState::Unseen {
            matching.unmatched.push(IndexPair::right_only(j));
        }
    }

    matching
}

impl Walker<'_> {
    pub(super) fn diff_lists(&mut self, left: &[Value], right: &[Value]) -> DiffResult<()> {
        self.check_depth()?;

        // The score matrix and ranking are dropped inside match_elements,
        // before any recursion below.
        let matching = match_elements(left, right);
        trace!(
            path = %self.prefix(),
            left = left.len(),
            right = right.len(),
            matched = matching.matched.len(),
            unmatched = matching.unmatched.len(),
            "matched sequence elements"
        );

        for pair in &matching.unmatched {
            self.emit(PathSegment::Index(*pair));
        }

        for &(i, j) in &matching.matched {
            self.enter(PathSegment::matched(i, j));
            let result = match (&left[i], &right[j]) {
                (Value::Map(a), Value::Map(b)) => self.diff_maps(a, b),
                (Value::List(a), Value::List(b)) => self.diff_lists(a, b),
                (a, b) if a.is_scalar() && b.is_scalar() => {
                    debug_assert_eq!(a, b, "positive scalar score implies equality");
                    Ok(())
                }
                (a, b) => Err(DiffError::ShapeMismatch {
                    path: self.prefix(),
                    left: a.shape(),
                    right: b.shape(),
                }),
            };
            self.leave();
            result?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_yaml;
    use pretty_assertions::assert_eq;

    fn list(yaml: &str) -> Vec<Value> {
        match from_yaml(yaml).unwrap() {
            Value::List(l) => l,
            other => panic!("expected a sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_match_identical_scalars() {
        let m = match_elements(&list("[1, 2, 3]"), &list("[3, 1, 2]"));
        assert_eq!(m.matched, vec![(0, 1), (1, 2), (2, 0)]);
        assert!(m.unmatched.is_empty());
    }

    #[test]
    fn test_first_claim_wins() {
        let m = match_elements(&list("[1, 2, 2]"), &list("[2, 1]"));
        assert_eq!(m.matched, vec![(0, 1), (1, 0)]);
        assert_eq!(m.unmatched, vec![IndexPair::left_only(2)]);
    }

    #[test]
    fn test_zero_scores_mark_unmatched_once() {
        let m = match_elements(&list("[1, 3, 5]"), &list("[1, 4]"));
        assert_eq!(m.matched, vec![(0, 0)]);
        // Zero-score pairs are visited row-major: (0,1) settles right 1 first.
        assert_eq!(
            m.unmatched,
            vec![IndexPair::right_only(1), IndexPair::left_only(1), IndexPair::left_only(2)]
        );
    }

    #[test]
    fn test_highest_score_claims_first() {
        let left = list("[{a: 1}, {a: 1, b: 2}]");
        let right = list("[{a: 1, b: 2}]");
        let m = match_elements(&left, &right);
        assert_eq!(m.matched, vec![(1, 0)]);
        assert_eq!(m.unmatched, vec![IndexPair::left_only(0)]);
    }

    #[test]
    fn test_stragglers_against_empty() {
        let m = match_elements(&list("[1, {a: 1}]"), &[]);
        assert!(m.matched.is_empty());
        assert_eq!(m.unmatched, vec![IndexPair::left_only(0), IndexPair::left_only(1)]);

        let m = match_elements(&[], &list("[[1]]"));
        assert_eq!(m.unmatched, vec![IndexPair::right_only(0)]);
    }

    #[test]
    fn test_straggler_against_non_empty() {
        // (1,0) is positive but right 0 is already claimed, and no zero-score
        // pair ever visits left 1.
        let m = match_elements(&list("[1, 1]"), &list("[1]"));
        assert_eq!(m.matched, vec![(0, 0)]);
        assert_eq!(m.unmatched, vec![IndexPair::left_only(1)]);
    }

    #[test]
    fn test_both_empty() {
        assert_eq!(match_elements(&[], &[]), Matching::default());
    }
}
