//! Data model for carrying syntactic structure between two editions of a
//! verse corpus.
//!
//! A *target* corpus (tokens only) is aligned verse-by-verse against a
//! richly annotated *reference* corpus. Where the alignment is exact the
//! reference tree is transplanted; elsewhere structure is generated from the
//! token tags. This crate holds the types shared by every stage:
//!
//! - [`Token`] / [`TokenTags`] / [`Morphology`] - tagged words
//! - [`Verse`] / [`VerseRef`] / [`RawVerse`] - ordered tokens of one verse
//! - [`TokenSpan`] - inclusive, contiguous token ranges
//! - [`StructureNode`] / [`VerseStructure`] - clause, phrase and word-group nodes
//! - [`ReferenceTree`] - the read-only structure of the reference corpus
//! - [`Scored<T>`] - values with a confidence and provenance
//! - [`VerseDisplay`] - renders a verse with its structure spans
//!
//! ## Example
//!
//! ```
//! use layered_verse::{PartOfSpeech, Token, TokenTags, Verse, VerseRef};
//!
//! let verse = Verse::new(
//!     VerseRef::new("JHN", 1, 1),
//!     vec![
//!         Token::new(0, "ὁ", TokenTags::new("ὁ", PartOfSpeech::Article)),
//!         Token::new(1, "λόγος", TokenTags::new("λόγος", PartOfSpeech::Noun)),
//!     ],
//! );
//! assert_eq!(verse.len(), 2);
//! assert_eq!(verse.token(1).map(|t| t.normalized()), Some("λογοσ"));
//! ```

mod morphology;
mod normalize;
mod scored;
mod span;
mod structure;
mod token;
mod verse;

pub use morphology::{Case, Morphology, Mood, PartOfSpeech, Tense};
pub use normalize::{has_elision_mark, normalize_form, ELISION_MARKS};
pub use scored::{ScoreSource, Scored};
pub use span::TokenSpan;
pub use structure::{
    NodeKind, NodeLabels, ReferenceNode, ReferenceTree, ReferenceVerse, StructureNode,
    StructureSource, VerseStructure,
};
pub use token::{Token, TokenTags};
pub use verse::{RawToken, RawVerse, Verse, VerseDisplay, VerseRef};

#[cfg(test)]
mod tests {
    mod display;
    mod raw_verse;
    mod verse_serde;
}
