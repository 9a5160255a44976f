use crate::elision::ElisionTable;
use crate::record::AlignmentRecord;
use layered_verse::{has_elision_mark, Token, Verse};

/// Aligns a target verse against its reference counterpart.
///
/// Words are compared by alignment key: the normalized lemma, with elided
/// forms expanded first. The result is the longest order-preserving run of
/// exact key matches. Among equally long alignments the one with the
/// smallest total displacement `Σ|t - r|` wins; remaining ties are settled by
/// preferring a match, then skipping the target word, then skipping the
/// reference word, scanning left to right.
#[derive(Debug, Clone, Default)]
pub struct WordAligner {
    elisions: ElisionTable,
}

/// Best alignment of a pair of suffixes: matches (higher is better) and
/// displacement (lower is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cell {
    matches: u32,
    displacement: u64,
}

impl Cell {
    fn better_than(&self, other: &Cell) -> bool {
        self.matches > other.matches
            || (self.matches == other.matches && self.displacement < other.displacement)
    }
}

impl WordAligner {
    pub fn new(elisions: ElisionTable) -> Self {
        Self { elisions }
    }

    pub fn elisions(&self) -> &ElisionTable {
        &self.elisions
    }

    /// The key a token is compared by.
    pub fn alignment_key(&self, token: &Token) -> String {
        let lemma_key = token.lemma_key();
        if has_elision_mark(token.surface()) || has_elision_mark(token.lemma()) {
            let expanded = self
                .elisions
                .expand(&lemma_key)
                .or_else(|| self.elisions.expand(token.normalized()));
            if let Some(full) = expanded {
                return full.to_string();
            }
        }
        lemma_key
    }

    pub fn align(&self, target: &Verse, reference: &Verse) -> AlignmentRecord {
        let target_keys: Vec<String> = target.tokens().iter().map(|t| self.alignment_key(t)).collect();
        let reference_keys: Vec<String> =
            reference.tokens().iter().map(|t| self.alignment_key(t)).collect();
        let record = align_keys(&target_keys, &reference_keys);
        tracing::trace!(
            verse = %target.reference(),
            matched = record.matched_count(),
            target_len = record.target_len(),
            reference_len = record.reference_len(),
            "aligned verse"
        );
        record
    }
}

/// Align two key sequences.
pub(crate) fn align_keys<K: PartialEq>(target: &[K], reference: &[K]) -> AlignmentRecord {
    let n = target.len();
    let m = reference.len();
    let width = m + 1;
    // table[i * width + j] = best alignment of target[i..] with reference[j..]
    let mut table = vec![Cell::default(); (n + 1) * width];

    let matched = |table: &[Cell], i: usize, j: usize| -> Option<Cell> {
        if target[i] == reference[j] {
            let rest = table[(i + 1) * width + j + 1];
            Some(Cell {
                matches: rest.matches + 1,
                displacement: rest.displacement + i.abs_diff(j) as u64,
            })
        } else {
            None
        }
    };

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            let mut best = table[(i + 1) * width + j];
            if let Some(cell) = matched(&table, i, j) {
                if !best.better_than(&cell) {
                    best = cell;
                }
            }
            let skip_reference = table[i * width + j + 1];
            if skip_reference.better_than(&best) {
                best = skip_reference;
            }
            table[i * width + j] = best;
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        let here = table[i * width + j];
        if matched(&table, i, j) == Some(here) {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] == here {
            i += 1;
        } else {
            j += 1;
        }
    }

    AlignmentRecord::from_pairs(n, m, &pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(target: &str, reference: &str) -> Vec<Option<usize>> {
        let t: Vec<&str> = target.split_whitespace().collect();
        let r: Vec<&str> = reference.split_whitespace().collect();
        align_keys(&t, &r).map().to_vec()
    }

    #[test]
    fn test_identical() {
        assert_eq!(align("a b c", "a b c"), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_insertion_and_omission() {
        assert_eq!(align("a x b c", "a b c"), vec![Some(0), None, Some(1), Some(2)]);
        assert_eq!(align("a c", "a b c"), vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_tie_broken_by_displacement() {
        // "a" could pair with either reference "a"; the nearer one wins
        assert_eq!(align("x a", "a a"), vec![None, Some(1)]);
        assert_eq!(align("a x", "a a y"), vec![Some(0), None]);
    }

    #[test]
    fn test_equal_displacement_prefers_earliest_match() {
        assert_eq!(align("x a", "a y a"), vec![None, Some(0)]);
    }

    #[test]
    fn test_no_common_words() {
        assert_eq!(align("a b", "c d"), vec![None, None]);
        assert_eq!(align("", "c d"), Vec::<Option<usize>>::new());
        assert_eq!(align("a b", ""), vec![None, None]);
    }
}
