//! Fixed word lists that drive clause segmentation.

use crate::errors::{StructureError, StructureResult};
use layered_verse::{normalize_form, PartOfSpeech, Token};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseType {
    Main,
    Content,
    Purpose,
    Conditional,
    Temporal,
    Comparative,
    Result,
    Subordinate,
    Relative,
    Coordinate,
}

impl ClauseType {
    pub const ALL: [ClauseType; 10] = [
        ClauseType::Main,
        ClauseType::Content,
        ClauseType::Purpose,
        ClauseType::Conditional,
        ClauseType::Temporal,
        ClauseType::Comparative,
        ClauseType::Result,
        ClauseType::Subordinate,
        ClauseType::Relative,
        ClauseType::Coordinate,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ClauseType::Main => "main",
            ClauseType::Content => "content",
            ClauseType::Purpose => "purpose",
            ClauseType::Conditional => "conditional",
            ClauseType::Temporal => "temporal",
            ClauseType::Comparative => "comparative",
            ClauseType::Result => "result",
            ClauseType::Subordinate => "subordinate",
            ClauseType::Relative => "relative",
            ClauseType::Coordinate => "coordinate",
        }
    }

    pub fn from_code(code: &str) -> StructureResult<Self> {
        ClauseType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code.trim())
            .ok_or_else(|| StructureError::UnknownClauseType {
                name: code.to_string(),
            })
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const STANDARD_SUBORDINATORS: &[(&str, ClauseType)] = &[
    ("ὅτι", ClauseType::Content),
    ("ἵνα", ClauseType::Purpose),
    ("ὅπως", ClauseType::Purpose),
    ("εἰ", ClauseType::Conditional),
    ("ἐάν", ClauseType::Conditional),
    ("εἴπερ", ClauseType::Conditional),
    ("εἴτε", ClauseType::Conditional),
    ("κἄν", ClauseType::Conditional),
    ("ὅταν", ClauseType::Temporal),
    ("ὅτε", ClauseType::Temporal),
    ("ὁπότε", ClauseType::Temporal),
    ("ὁπόταν", ClauseType::Temporal),
    ("ἡνίκα", ClauseType::Temporal),
    ("πρίν", ClauseType::Temporal),
    ("ἕως", ClauseType::Temporal),
    ("ἄχρι", ClauseType::Temporal),
    ("μέχρι", ClauseType::Temporal),
    ("ὡς", ClauseType::Comparative),
    ("καθώς", ClauseType::Comparative),
    ("ὥσπερ", ClauseType::Comparative),
    ("καθάπερ", ClauseType::Comparative),
    ("ὥστε", ClauseType::Result),
    ("ἐπεί", ClauseType::Subordinate),
    ("ἐπειδή", ClauseType::Subordinate),
    ("διότι", ClauseType::Subordinate),
];

const STANDARD_RELATIVES: &[&str] = &["ὅς", "ὅστις", "ὅσπερ"];

const STANDARD_COORDINATORS: &[&str] = &[
    "καί", "δέ", "ἀλλά", "γάρ", "οὖν", "μέν", "τε", "οὐδέ", "μηδέ", "ἤ",
];

/// `.` `;` `·`, the Greek question mark and the ano teleia.
const STANDARD_MAJOR_PUNCTUATION: &[&str] = &[".", ";", "·", "\u{0387}", "\u{037E}"];

/// Subordinators, relatives, coordinators and sentence punctuation.
///
/// Words are compared by normalized lemma, so keys are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseLexicon {
    subordinators: BTreeMap<String, ClauseType>,
    relatives: BTreeSet<String>,
    coordinators: BTreeSet<String>,
    major_punctuation: Vec<String>,
}

impl ClauseLexicon {
    pub fn standard() -> Self {
        Self {
            subordinators: STANDARD_SUBORDINATORS
                .iter()
                .map(|(word, clause_type)| (normalize_form(word), *clause_type))
                .collect(),
            relatives: STANDARD_RELATIVES.iter().map(|w| normalize_form(w)).collect(),
            coordinators: STANDARD_COORDINATORS.iter().map(|w| normalize_form(w)).collect(),
            major_punctuation: STANDARD_MAJOR_PUNCTUATION.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Replace the subordinator map.
    pub fn with_subordinators<'a, I>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, ClauseType)>,
    {
        self.subordinators = words
            .into_iter()
            .map(|(word, clause_type)| (normalize_form(word), clause_type))
            .collect();
        self
    }

    pub fn with_relatives<'a, I: IntoIterator<Item = &'a str>>(mut self, words: I) -> Self {
        self.relatives = words.into_iter().map(normalize_form).collect();
        self
    }

    pub fn with_coordinators<'a, I: IntoIterator<Item = &'a str>>(mut self, words: I) -> Self {
        self.coordinators = words.into_iter().map(normalize_form).collect();
        self
    }

    pub fn with_major_punctuation<'a, I: IntoIterator<Item = &'a str>>(mut self, marks: I) -> Self {
        self.major_punctuation = marks
            .into_iter()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    pub fn validate(&self) -> StructureResult<()> {
        if self.major_punctuation.is_empty() {
            return Err(StructureError::EmptyPunctuation);
        }
        Ok(())
    }

    /// The clause type a subordinating conjunction introduces.
    pub fn subordinator(&self, token: &Token) -> Option<ClauseType> {
        self.subordinators.get(&token.lemma_key()).copied()
    }

    /// A pronoun whose lemma is a known relative, or whose morphology code
    /// marks it as relative (`R-`).
    pub fn is_relative(&self, token: &Token) -> bool {
        if token.pos() != PartOfSpeech::Pronoun {
            return false;
        }
        token.morph_code().map_or(false, |code| code.starts_with("R-"))
            || self.relatives.contains(&token.lemma_key())
    }

    pub fn is_coordinator(&self, token: &Token) -> bool {
        self.coordinators.contains(&token.lemma_key())
    }

    /// The token ends a sentence: it is followed by a major punctuation mark,
    /// or is itself one.
    pub fn is_major_break(&self, token: &Token) -> bool {
        token.followed_by_any(&self.major_punctuation)
            || (token.pos() == PartOfSpeech::Punctuation
                && self.major_punctuation.iter().any(|m| m == token.surface().trim()))
    }
}

impl Default for ClauseLexicon {
    fn default() -> Self {
        Self::standard()
    }
}
