use crate::confidence::{ConfidenceTable, RuleId};
use crate::phrase::{Phrase, PhraseKind};
use layered_verse::{Case, Scored};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic function of a phrase within its clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Attributive genitive
    Attr,
    /// Prepositional complement
    Cmpl,
    Subj,
    Objc,
}

impl Relation {
    pub fn code(&self) -> &'static str {
        self.rule().name()
    }

    pub fn rule(&self) -> RuleId {
        match self {
            Relation::Attr => RuleId::Attr,
            Relation::Cmpl => RuleId::Cmpl,
            Relation::Subj => RuleId::Subj,
            Relation::Objc => RuleId::Objc,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Assigns at most one relation per phrase, by fixed priority:
/// `Attr`, `Cmpl`, `Subj`, `Objc`.
#[derive(Debug, Clone, Copy)]
pub struct RelationInferer<'a> {
    confidence: &'a ConfidenceTable,
}

impl<'a> RelationInferer<'a> {
    pub fn new(confidence: &'a ConfidenceTable) -> Self {
        Self { confidence }
    }

    /// Index of the first phrase holding a finite verb.
    pub fn verb_index(phrases: &[Phrase]) -> Option<usize> {
        phrases.iter().position(|p| p.has_finite_verb)
    }

    /// One entry per phrase, in the same order.
    pub fn infer(&self, phrases: &[Phrase]) -> Vec<Option<Scored<Relation>>> {
        let verb_index = Self::verb_index(phrases);
        let after_verb = |index: usize| verb_index.map_or(false, |v| index > v);

        phrases
            .iter()
            .enumerate()
            .map(|(index, phrase)| {
                let is_np = phrase.kind == PhraseKind::Np;
                let follows_np = index
                    .checked_sub(1)
                    .and_then(|prev| phrases.get(prev))
                    .map_or(false, |prev| {
                        prev.kind == PhraseKind::Np && prev.span.end + 1 == phrase.span.start
                    });

                let relation = if is_np && phrase.case == Some(Case::Genitive) && follows_np {
                    Some(Relation::Attr)
                } else if phrase.kind == PhraseKind::Pp && after_verb(index) {
                    Some(Relation::Cmpl)
                } else if is_np && phrase.case == Some(Case::Nominative) {
                    Some(Relation::Subj)
                } else if is_np && phrase.case == Some(Case::Accusative) && after_verb(index) {
                    Some(Relation::Objc)
                } else {
                    None
                };

                relation.map(|r| {
                    let rule = r.rule();
                    Scored::rule_based(r, self.confidence.get(rule), rule.name())
                })
            })
            .collect()
    }
}
