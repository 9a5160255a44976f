//! `Scored<T>` for confidence-carrying labels.
//!
//! Every node and relation label produced by the engine carries a confidence:
//! - `1.0` means the label was copied from the reference corpus
//! - lower values come from a heuristic rule and should be reviewed
//!
//! Where the score came from is tracked via [`ScoreSource`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value with an associated confidence score.
///
/// # Example
/// ```
/// use layered_verse::{Scored, ScoreSource};
///
/// let subj = Scored::rule_based("Subj".to_string(), 0.75, "Subj");
/// assert!(!subj.is_certain());
///
/// let copied = Scored::transplanted("Objc".to_string());
/// assert!(copied.is_certain());
/// assert_eq!(copied.source, ScoreSource::Transplanted);
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Scored<T> {
    pub value: T,
    /// Confidence score from 0.0 to 1.0
    pub confidence: f64,
    pub source: ScoreSource,
}

/// The source of a confidence score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreSource {
    /// Produced by a named heuristic rule
    RuleBased { rule_name: String },
    /// Copied verbatim from the reference corpus
    Transplanted,
}

impl<T> Scored<T> {
    /// Create a new scored value. Confidence is clamped into `[0, 1]`.
    pub fn new(value: T, confidence: f64, source: ScoreSource) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            value,
            confidence,
            source,
        }
    }

    pub fn rule_based(value: T, confidence: f64, rule_name: &str) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::RuleBased {
                rule_name: rule_name.to_string(),
            },
        )
    }

    /// A value copied from the reference corpus (confidence = 1.0).
    pub fn transplanted(value: T) -> Self {
        Self::new(value, 1.0, ScoreSource::Transplanted)
    }

    /// Returns true if confidence is exactly 1.0.
    pub fn is_certain(&self) -> bool {
        (self.confidence - 1.0).abs() < f64::EPSILON
    }

    /// Name of the rule that produced this score, if any.
    pub fn rule_name(&self) -> Option<&str> {
        match &self.source {
            ScoreSource::RuleBased { rule_name } => Some(rule_name),
            ScoreSource::Transplanted => None,
        }
    }

    /// Map the inner value while preserving confidence and source.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Scored<U> {
        Scored {
            value: f(self.value),
            confidence: self.confidence,
            source: self.source,
        }
    }

    pub fn as_ref(&self) -> Scored<&T> {
        Scored {
            value: &self.value,
            confidence: self.confidence,
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Scored<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Scored(value, conf: 0.85)
        write!(f, "Scored({:?}, conf: {:.2})", self.value, self.confidence)
    }
}

impl<T: PartialEq> PartialEq for Scored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && (self.confidence - other.confidence).abs() < f64::EPSILON
            && self.source == other.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_based_score() {
        let scored = Scored::rule_based("NP", 0.85, "NP");
        assert_eq!(scored.confidence, 0.85);
        assert!(!scored.is_certain());
        assert_eq!(scored.rule_name(), Some("NP"));
    }

    #[test]
    fn test_transplanted_is_certain() {
        let scored = Scored::transplanted("clause");
        assert_eq!(scored.confidence, 1.0);
        assert!(scored.is_certain());
        assert_eq!(scored.rule_name(), None);
    }

    #[test]
    fn test_confidence_clamping() {
        assert_eq!(Scored::rule_based("x", 1.5, "r").confidence, 1.0);
        assert_eq!(Scored::rule_based("x", -0.5, "r").confidence, 0.0);
        assert_eq!(Scored::rule_based("x", f64::NAN, "r").confidence, 0.0);
    }

    #[test]
    fn test_sources_are_rule_or_transplant() {
        let sources = [
            Scored::rule_based("Attr", 0.85, "Attr").source,
            Scored::transplanted("Attr").source,
        ];
        for source in sources {
            match source {
                ScoreSource::RuleBased { rule_name } => assert_eq!(rule_name, "Attr"),
                ScoreSource::Transplanted => {}
            }
        }
    }

    #[test]
    fn test_map() {
        let mapped = Scored::rule_based(42, 0.8, "rule").map(|x| x.to_string());
        assert_eq!(mapped.value, "42");
        assert_eq!(mapped.confidence, 0.8);
    }

    #[test]
    fn test_debug_format() {
        let scored = Scored::rule_based("Subj", 0.75, "Subj");
        assert_eq!(format!("{:?}", scored), r#"Scored("Subj", conf: 0.75)"#);
    }
}
