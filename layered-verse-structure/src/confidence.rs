//! Rule -> confidence table.
//!
//! Every clause trigger, phrase kind, word-group rule and relation rule looks
//! its confidence up here by [`RuleId`]; the matchers never carry numbers of
//! their own. The table is versioned so that a stored run can name the values
//! it was produced with.

use crate::errors::{StructureError, StructureResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a heuristic rule or trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    // clause boundaries
    VerseStart,
    Subordinator,
    Relative,
    Coordinator,
    Punctuation,
    // phrases
    #[serde(rename = "NP")]
    Np,
    #[serde(rename = "VP")]
    Vp,
    #[serde(rename = "PP")]
    Pp,
    AdvP,
    // word groups
    #[serde(rename = "DetNP")]
    DetNp,
    PrepNp,
    #[serde(rename = "NPofNP")]
    NpOfNp,
    AdjpNp,
    NpAdjp,
    // relations
    Attr,
    Cmpl,
    Subj,
    Objc,
}

impl RuleId {
    pub const ALL: [RuleId; 18] = [
        RuleId::VerseStart,
        RuleId::Subordinator,
        RuleId::Relative,
        RuleId::Coordinator,
        RuleId::Punctuation,
        RuleId::Np,
        RuleId::Vp,
        RuleId::Pp,
        RuleId::AdvP,
        RuleId::DetNp,
        RuleId::PrepNp,
        RuleId::NpOfNp,
        RuleId::AdjpNp,
        RuleId::NpAdjp,
        RuleId::Attr,
        RuleId::Cmpl,
        RuleId::Subj,
        RuleId::Objc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleId::VerseStart => "VerseStart",
            RuleId::Subordinator => "Subordinator",
            RuleId::Relative => "Relative",
            RuleId::Coordinator => "Coordinator",
            RuleId::Punctuation => "Punctuation",
            RuleId::Np => "NP",
            RuleId::Vp => "VP",
            RuleId::Pp => "PP",
            RuleId::AdvP => "AdvP",
            RuleId::DetNp => "DetNP",
            RuleId::PrepNp => "PrepNp",
            RuleId::NpOfNp => "NPofNP",
            RuleId::AdjpNp => "AdjpNp",
            RuleId::NpAdjp => "NpAdjp",
            RuleId::Attr => "Attr",
            RuleId::Cmpl => "Cmpl",
            RuleId::Subj => "Subj",
            RuleId::Objc => "Objc",
        }
    }

    pub fn from_name(name: &str) -> StructureResult<Self> {
        RuleId::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == name.trim())
            .ok_or_else(|| StructureError::UnknownRule {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Versioned mapping of rule -> confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceTable {
    pub version: u32,
    entries: BTreeMap<RuleId, f64>,
}

impl ConfidenceTable {
    pub const STANDARD_VERSION: u32 = 1;

    /// The standard confidence values.
    pub fn standard() -> Self {
        let entries = [
            (RuleId::VerseStart, 0.95),
            (RuleId::Subordinator, 0.95),
            (RuleId::Relative, 0.90),
            (RuleId::Coordinator, 0.90),
            (RuleId::Punctuation, 0.95),
            (RuleId::Np, 0.85),
            (RuleId::Vp, 0.85),
            (RuleId::Pp, 0.90),
            (RuleId::AdvP, 0.85),
            (RuleId::DetNp, 0.90),
            (RuleId::PrepNp, 0.90),
            (RuleId::NpOfNp, 0.85),
            (RuleId::AdjpNp, 0.85),
            (RuleId::NpAdjp, 0.80),
            (RuleId::Attr, 0.85),
            (RuleId::Cmpl, 0.80),
            (RuleId::Subj, 0.75),
            (RuleId::Objc, 0.75),
        ];
        Self {
            version: Self::STANDARD_VERSION,
            entries: entries.into_iter().collect(),
        }
    }

    /// Confidence for a rule. A table that passed [`validate`](Self::validate)
    /// has an entry for every rule; a missing entry reads as `0.0`.
    pub fn get(&self, rule: RuleId) -> f64 {
        self.entries.get(&rule).copied().unwrap_or(0.0)
    }

    /// Replace one value.
    pub fn with_override(mut self, rule: RuleId, value: f64) -> StructureResult<Self> {
        check_value(rule, value)?;
        self.entries.insert(rule, value);
        Ok(self)
    }

    /// Apply overrides keyed by rule name, as found in configuration files.
    pub fn with_named_overrides<'a, I>(mut self, overrides: I) -> StructureResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (name, value) in overrides {
            self = self.with_override(RuleId::from_name(name)?, value)?;
        }
        Ok(self)
    }

    /// Every rule present, every value finite and within `[0, 1]`.
    pub fn validate(&self) -> StructureResult<()> {
        for rule in RuleId::ALL {
            match self.entries.get(&rule) {
                Some(&value) => check_value(rule, value)?,
                None => {
                    return Err(StructureError::MissingRule {
                        rule: rule.name().to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleId, f64)> + '_ {
        self.entries.iter().map(|(rule, value)| (*rule, *value))
    }

    /// Serialize to a RON string.
    pub fn to_ron_string(&self) -> StructureResult<String> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(10)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config).map_err(|e| StructureError::Ron {
            message: e.to_string(),
        })
    }

    /// Deserialize from a RON string and validate.
    pub fn from_ron_string(s: &str) -> StructureResult<Self> {
        let table: Self = ron::from_str(s).map_err(|e| StructureError::Ron {
            message: e.to_string(),
        })?;
        table.validate()?;
        Ok(table)
    }
}

impl Default for ConfidenceTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_value(rule: RuleId, value: f64) -> StructureResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StructureError::InvalidConfidence {
            rule: rule.name().to_string(),
            value,
        })
    }
}
