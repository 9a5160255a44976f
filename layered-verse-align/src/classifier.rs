use crate::errors::{AlignError, AlignResult};
use crate::record::AlignmentRecord;
use layered_verse::StructureSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completeness at or above which a partial alignment counts as `inferred`.
pub const DEFAULT_INFERRED_THRESHOLD: f64 = 0.5;

/// How well a verse aligned with its reference counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentClass {
    /// Strict bijection; the reference tree can be transplanted
    Direct,
    /// Enough words matched to trust the word-level tags
    Inferred,
    /// Too little matched; structure must be generated
    Generated,
}

impl AlignmentClass {
    pub const ALL: [AlignmentClass; 3] = [
        AlignmentClass::Direct,
        AlignmentClass::Inferred,
        AlignmentClass::Generated,
    ];

    pub fn code(&self) -> &'static str {
        self.structure_source().code()
    }

    pub fn structure_source(&self) -> StructureSource {
        match self {
            AlignmentClass::Direct => StructureSource::Direct,
            AlignmentClass::Inferred => StructureSource::Inferred,
            AlignmentClass::Generated => StructureSource::Generated,
        }
    }
}

impl fmt::Display for AlignmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Labels alignment records as direct, inferred or generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentClassifier {
    inferred_threshold: f64,
}

impl AlignmentClassifier {
    /// Fails if the threshold is not a finite value in `[0, 1]`.
    pub fn new(inferred_threshold: f64) -> AlignResult<Self> {
        if !inferred_threshold.is_finite() || !(0.0..=1.0).contains(&inferred_threshold) {
            return Err(AlignError::InvalidThreshold {
                value: inferred_threshold,
            });
        }
        Ok(Self { inferred_threshold })
    }

    pub fn inferred_threshold(&self) -> f64 {
        self.inferred_threshold
    }

    /// A verse with no matched words is always `generated`, whatever the
    /// threshold.
    pub fn classify(&self, record: &AlignmentRecord) -> AlignmentClass {
        if record.is_bijection() {
            AlignmentClass::Direct
        } else if record.matched_count() > 0 && record.completeness() >= self.inferred_threshold {
            AlignmentClass::Inferred
        } else {
            AlignmentClass::Generated
        }
    }
}

impl Default for AlignmentClassifier {
    fn default() -> Self {
        Self {
            inferred_threshold: DEFAULT_INFERRED_THRESHOLD,
        }
    }
}
