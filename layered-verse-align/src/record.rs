use crate::errors::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};

/// Word alignment of one target verse against one reference verse.
///
/// `map[t]` is the reference position matched to target position `t`, or
/// `None` when the target word has no counterpart. Matched pairs never cross:
/// reference positions strictly increase with target position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    reference_len: usize,
    map: Vec<Option<usize>>,
}

impl AlignmentRecord {
    /// Build a record from a position map, checking range and monotonicity.
    pub fn from_map(map: Vec<Option<usize>>, reference_len: usize) -> AlignResult<Self> {
        let mut last: Option<usize> = None;
        for (target, reference) in map.iter().enumerate() {
            let Some(reference) = *reference else {
                continue;
            };
            if reference >= reference_len {
                return Err(AlignError::OutOfRange {
                    target,
                    reference,
                    reference_len,
                });
            }
            if last.map_or(false, |prev| reference <= prev) {
                return Err(AlignError::NotMonotonic { target });
            }
            last = Some(reference);
        }
        Ok(Self { reference_len, map })
    }

    /// A record where nothing matched.
    pub fn unmatched(target_len: usize, reference_len: usize) -> Self {
        Self {
            reference_len,
            map: vec![None; target_len],
        }
    }

    pub(crate) fn from_pairs(target_len: usize, reference_len: usize, pairs: &[(usize, usize)]) -> Self {
        let mut map = vec![None; target_len];
        for &(t, r) in pairs {
            map[t] = Some(r);
        }
        Self { reference_len, map }
    }

    pub fn target_len(&self) -> usize {
        self.map.len()
    }

    pub fn reference_len(&self) -> usize {
        self.reference_len
    }

    pub fn map(&self) -> &[Option<usize>] {
        &self.map
    }

    pub fn reference_of(&self, target: usize) -> Option<usize> {
        self.map.get(target).copied().flatten()
    }

    pub fn matched_count(&self) -> usize {
        self.map.iter().filter(|r| r.is_some()).count()
    }

    /// Matched target tokens over all target tokens; `0.0` for an empty verse.
    pub fn completeness(&self) -> f64 {
        if self.map.is_empty() {
            0.0
        } else {
            self.matched_count() as f64 / self.map.len() as f64
        }
    }

    /// Every target token matched, no reference token left over, same order.
    pub fn is_bijection(&self) -> bool {
        !self.map.is_empty()
            && self.map.len() == self.reference_len
            && self.map.iter().enumerate().all(|(t, r)| *r == Some(t))
    }

    pub fn is_monotonic(&self) -> bool {
        self.pairs()
            .collect::<Vec<_>>()
            .windows(2)
            .all(|w| w[0].1 < w[1].1)
    }

    /// Matched `(target, reference)` pairs in target order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.map
            .iter()
            .enumerate()
            .filter_map(|(t, r)| r.map(|r| (t, r)))
    }

    /// Reference position -> target position.
    pub fn reverse_map(&self) -> Vec<Option<usize>> {
        let mut reverse = vec![None; self.reference_len];
        for (t, r) in self.pairs() {
            if let Some(slot) = reverse.get_mut(r) {
                *slot = Some(t);
            }
        }
        reverse
    }

    /// Sum of `|t - r|` over matched pairs.
    pub fn displacement(&self) -> usize {
        self.pairs().map(|(t, r)| t.abs_diff(r)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        let record = AlignmentRecord::from_map(vec![Some(0), None, Some(1), Some(2)], 3).unwrap();
        assert_eq!(record.matched_count(), 3);
        assert_eq!(record.completeness(), 0.75);
        assert!(!record.is_bijection());
        assert_eq!(record.reverse_map(), vec![Some(0), Some(2), Some(3)]);
        assert_eq!(record.displacement(), 2);

        assert_eq!(AlignmentRecord::unmatched(0, 4).completeness(), 0.0);
    }

    #[test]
    fn test_bijection() {
        let record = AlignmentRecord::from_map(vec![Some(0), Some(1)], 2).unwrap();
        assert!(record.is_bijection());
        assert_eq!(record.completeness(), 1.0);

        // every target matched, but a reference word is left over
        let record = AlignmentRecord::from_map(vec![Some(0), Some(2)], 3).unwrap();
        assert_eq!(record.completeness(), 1.0);
        assert!(!record.is_bijection());

        assert!(!AlignmentRecord::unmatched(0, 0).is_bijection());
    }

    #[test]
    fn test_from_map_rejects_crossing_and_range() {
        assert_eq!(
            AlignmentRecord::from_map(vec![Some(1), Some(0)], 2),
            Err(AlignError::NotMonotonic { target: 1 })
        );
        assert_eq!(
            AlignmentRecord::from_map(vec![Some(0), Some(0)], 2),
            Err(AlignError::NotMonotonic { target: 1 })
        );
        assert_eq!(
            AlignmentRecord::from_map(vec![Some(5)], 2),
            Err(AlignError::OutOfRange {
                target: 0,
                reference: 5,
                reference_len: 2
            })
        );
    }
}
