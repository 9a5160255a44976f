//! Syntactic structure for target verses.
//!
//! Two routes produce a [`VerseStructure`](layered_verse::VerseStructure):
//!
//! - [`Transplanter`] copies the reference tree through an exact alignment
//!   (confidence `1.0`, source `direct`).
//! - [`HeuristicGenerator`] builds flat structure from token tags:
//!   [`ClauseSegmenter`] splits the verse into clauses, [`PhraseGrouper`]
//!   groups each clause by part of speech, [`RelationInferer`] labels the
//!   phrases, and [`WordGroupMatcher`] finds word groups inside each phrase.
//!
//! Every heuristic confidence comes from a [`ConfidenceTable`]; the word lists
//! come from a [`ClauseLexicon`]. Both are plain data and can be replaced
//! without touching the matchers.
//!
//! ## Usage
//!
//! ```
//! use layered_verse::{Case, NodeKind, PartOfSpeech, Token, TokenTags, Verse, VerseRef};
//! use layered_verse_structure::HeuristicGenerator;
//!
//! let verse = Verse::new(
//!     VerseRef::new("JHN", 1, 1),
//!     vec![
//!         Token::new(0, "ὁ", TokenTags::new("ὁ", PartOfSpeech::Article).with_case(Case::Nominative)),
//!         Token::new(1, "λόγος", TokenTags::new("λόγος", PartOfSpeech::Noun).with_case(Case::Nominative)),
//!     ],
//! );
//! let structure = HeuristicGenerator::default().generate(&verse);
//! let groups: Vec<_> = structure.of_kind(NodeKind::WordGroup).collect();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].rule.as_deref(), Some("DetNP"));
//! assert_eq!(groups[0].confidence, 0.90);
//! ```

mod clause;
mod confidence;
mod errors;
mod generator;
mod lexicon;
mod phrase;
mod relation;
mod transplant;
mod word_group;

pub use clause::{ClauseSegment, ClauseSegmenter};
pub use confidence::{ConfidenceTable, RuleId};
pub use errors::{StructureError, StructureResult};
pub use generator::HeuristicGenerator;
pub use lexicon::{ClauseLexicon, ClauseType};
pub use phrase::{Phrase, PhraseGrouper, PhraseKind};
pub use relation::{Relation, RelationInferer};
pub use transplant::Transplanter;
pub use word_group::{WordGroup, WordGroupMatcher, WordGroupRule, WORD_GROUP_RULES};

#[cfg(test)]
mod tests {
    mod generator;
    mod phrase;
    mod transplant;
}
