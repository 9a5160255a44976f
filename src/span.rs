use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A contiguous range of token positions within one verse.
///
/// Both indices are inclusive. Spans built through [`TokenSpan::new`] cover at
/// least one token; a span with `start > end` (for instance one read back from
/// serialized data) is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenSpan {
    /// Inclusive start position
    pub start: usize,
    /// Inclusive end position
    pub end: usize,
}

impl TokenSpan {
    /// Create a span from inclusive bounds.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A span covering a single token.
    pub fn single(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Build a span from a set of positions, if they form one contiguous run.
    ///
    /// Returns `None` for an empty set, duplicates, or gaps.
    pub fn from_positions(positions: &[usize]) -> Option<Self> {
        let mut sorted = positions.to_vec();
        sorted.sort_unstable();
        let (&first, &last) = (sorted.first()?, sorted.last()?);
        let contiguous = sorted.windows(2).all(|pair| pair[1] == pair[0] + 1);
        if contiguous {
            Some(Self::new(first, last))
        } else {
            None
        }
    }

    /// Number of tokens covered; zero for a reversed span.
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position <= self.end
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains_span(&self, other: &TokenSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &TokenSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn positions(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl std::fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_positions_contiguous() {
        assert_eq!(TokenSpan::from_positions(&[3, 1, 2]), Some(TokenSpan::new(1, 3)));
        assert_eq!(TokenSpan::from_positions(&[4]), Some(TokenSpan::single(4)));
    }

    #[test]
    fn test_from_positions_rejects_gaps_and_duplicates() {
        assert_eq!(TokenSpan::from_positions(&[1, 3]), None);
        assert_eq!(TokenSpan::from_positions(&[2, 2]), None);
        assert_eq!(TokenSpan::from_positions(&[]), None);
    }

    #[test]
    fn test_containment() {
        let outer = TokenSpan::new(2, 6);
        assert!(outer.contains_span(&TokenSpan::new(2, 6)));
        assert!(outer.contains_span(&TokenSpan::new(3, 4)));
        assert!(!outer.contains_span(&TokenSpan::new(1, 4)));
        assert!(outer.overlaps(&TokenSpan::new(6, 9)));
        assert!(!outer.overlaps(&TokenSpan::new(7, 9)));
        assert_eq!(outer.len(), 5);
    }

    #[test]
    fn test_reversed_span_is_empty() {
        let reversed = TokenSpan { start: 4, end: 2 };
        assert_eq!(reversed.len(), 0);
        assert!(reversed.is_empty());
        assert_eq!(reversed.positions().count(), 0);

        assert_eq!(TokenSpan::single(3).len(), 1);
        assert!(!TokenSpan::new(4, 2).is_empty());
    }
}
