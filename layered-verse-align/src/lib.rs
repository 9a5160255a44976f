//! Verse-by-verse word alignment between a target and a reference edition.
//!
//! ## Usage
//!
//! ```
//! use layered_verse::{PartOfSpeech, Token, TokenTags, Verse, VerseRef};
//! use layered_verse_align::{AlignmentClass, AlignmentClassifier, WordAligner};
//!
//! let words = |forms: &[&str]| {
//!     let tokens = forms
//!         .iter()
//!         .enumerate()
//!         .map(|(i, f)| Token::new(i, *f, TokenTags::new(*f, PartOfSpeech::Other)))
//!         .collect();
//!     Verse::new(VerseRef::new("JHN", 1, 1), tokens)
//! };
//!
//! let record = WordAligner::default().align(&words(&["ἐν", "ἀρχῇ"]), &words(&["ἐν", "ἀρχῇ"]));
//! let classifier = AlignmentClassifier::new(0.5).unwrap();
//! assert_eq!(classifier.classify(&record), AlignmentClass::Direct);
//! ```
//!
//! Alignment never fails: a verse with nothing in common simply comes back
//! with every position unmatched and is classified `generated`.

mod aligner;
mod classifier;
mod elision;
mod errors;
mod record;

pub use aligner::WordAligner;
pub use classifier::{AlignmentClass, AlignmentClassifier, DEFAULT_INFERRED_THRESHOLD};
pub use elision::ElisionTable;
pub use errors::{AlignError, AlignResult};
pub use record::AlignmentRecord;
