use layered_verse::{normalize_form, PartOfSpeech, TokenTags, VerseRef};
use std::collections::HashMap;

/// A target token that the corpus could not tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest<'a> {
    pub reference: &'a VerseRef,
    pub position: usize,
    pub surface: &'a str,
}

/// External tagger for target tokens missing from the reference edition.
///
/// The pipeline calls [`tag`](TaggingOracle::tag) once per run with every
/// untagged token of the corpus, before any verse is aligned. The answer must
/// hold exactly one entry per request, in request order.
pub trait TaggingOracle {
    fn tag(&self, requests: &[TagRequest<'_>]) -> Result<Vec<TokenTags>, String>;
}

/// Tags by surface form alone.
///
/// Known forms come from a lookup table keyed by normalized surface; anything
/// else is tagged [`PartOfSpeech::Other`] with the surface as its lemma, or
/// [`PartOfSpeech::Punctuation`] when it has no alphanumeric characters.
#[derive(Debug, Clone, Default)]
pub struct SurfaceOracle {
    known: HashMap<String, TokenTags>,
}

impl SurfaceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, surface: &str, tags: TokenTags) -> Self {
        self.known.insert(normalize_form(surface), tags);
        self
    }

    pub fn tag_surface(&self, surface: &str) -> TokenTags {
        if let Some(tags) = self.known.get(&normalize_form(surface)) {
            return tags.clone();
        }
        let pos = if surface.chars().any(char::is_alphanumeric) {
            PartOfSpeech::Other
        } else {
            PartOfSpeech::Punctuation
        };
        TokenTags::new(surface, pos)
    }
}

impl TaggingOracle for SurfaceOracle {
    fn tag(&self, requests: &[TagRequest<'_>]) -> Result<Vec<TokenTags>, String> {
        Ok(requests.iter().map(|r| self.tag_surface(r.surface)).collect())
    }
}
