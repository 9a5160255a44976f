mod display;

use crate::normalize::ELISION_MARKS;
use crate::span::TokenSpan;
use crate::token::{Token, TokenTags};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

pub use display::VerseDisplay;

/// Book/chapter/verse coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseRef {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// An ordered, tagged verse. Owns its tokens.
///
/// Deserialization goes through [`Verse::new`], so stored positions are
/// always `0..len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VerseRecord")]
pub struct Verse {
    reference: VerseRef,
    tokens: Vec<Token>,
}

#[derive(Deserialize)]
struct VerseRecord {
    reference: VerseRef,
    tokens: Vec<Token>,
}

impl From<VerseRecord> for Verse {
    fn from(record: VerseRecord) -> Self {
        Verse::new(record.reference, record.tokens)
    }
}

impl Verse {
    /// Build a verse. Token positions are re-stamped to `0..len` in order.
    pub fn new(reference: VerseRef, mut tokens: Vec<Token>) -> Self {
        for (position, token) in tokens.iter_mut().enumerate() {
            token.set_position(position);
        }
        Self { reference, tokens }
    }

    pub fn reference(&self) -> &VerseRef {
        &self.reference
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The span covering every token, or `None` for an empty verse.
    pub fn full_span(&self) -> Option<TokenSpan> {
        self.tokens.len().checked_sub(1).map(|last| TokenSpan::new(0, last))
    }

    /// Tokens covered by `span`, clipped to the verse.
    pub fn tokens_in(&self, span: TokenSpan) -> &[Token] {
        let end = (span.end + 1).min(self.tokens.len());
        let start = span.start.min(end);
        &self.tokens[start..end]
    }

    pub fn display(&self) -> VerseDisplay<'_> {
        VerseDisplay::new(self)
    }
}

/// A target-corpus token before tagging is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub surface: String,
    #[serde(default)]
    pub after: String,
    /// Tags supplied by the corpus itself, if any
    #[serde(default)]
    pub tags: Option<TokenTags>,
}

impl RawToken {
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            after: String::new(),
            tags: None,
        }
    }

    pub fn with_tags(mut self, tags: TokenTags) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }
}

/// A target verse as read from the corpus, possibly partly untagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVerse {
    pub reference: VerseRef,
    pub tokens: Vec<RawToken>,
}

impl RawVerse {
    pub fn new(reference: VerseRef, tokens: Vec<RawToken>) -> Self {
        Self { reference, tokens }
    }

    /// Split verse text into untagged word tokens.
    ///
    /// Word boundaries follow UAX #29. Punctuation and whitespace are attached
    /// to the preceding word's `after`, and a trailing elision mark stays on
    /// its word (`δι᾽`). Text before the first word is dropped.
    pub fn from_text(reference: VerseRef, text: &str) -> Self {
        let mut tokens: Vec<RawToken> = Vec::new();
        for segment in text.split_word_bounds() {
            let is_word = segment.chars().any(char::is_alphanumeric);
            let is_elision = !segment.is_empty() && segment.chars().all(|c| ELISION_MARKS.contains(&c));
            if is_word {
                tokens.push(RawToken::new(segment));
                continue;
            }
            if let Some(last) = tokens.last_mut() {
                if is_elision && last.after.is_empty() {
                    last.surface.push_str(segment);
                } else {
                    last.after.push_str(segment);
                }
            }
        }
        Self { reference, tokens }
    }

    /// Positions of tokens that still need tags.
    pub fn untagged_positions(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.tags.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Finish tagging and build the verse.
    ///
    /// `fill` is called for each token without corpus-supplied tags.
    pub fn into_verse<F>(self, mut fill: F) -> Verse
    where
        F: FnMut(usize, &RawToken) -> TokenTags,
    {
        let tokens = self
            .tokens
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let tags = match raw.tags.clone() {
                    Some(tags) => tags,
                    None => fill(position, &raw),
                };
                Token::new(position, raw.surface, tags).with_after(raw.after)
            })
            .collect();
        Verse::new(self.reference, tokens)
    }
}
