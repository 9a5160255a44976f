use crate::errors::{PipelineError, PipelineResult};
use layered_verse::{RawVerse, ReferenceVerse, VerseRef};
use std::collections::{HashMap, HashSet};

/// The annotated edition. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCorpus {
    verses: Vec<ReferenceVerse>,
    index: HashMap<VerseRef, usize>,
}

impl ReferenceCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, verse: ReferenceVerse) -> PipelineResult<()> {
        let reference = verse.verse.reference().clone();
        if self.index.contains_key(&reference) {
            return Err(PipelineError::DuplicateVerse {
                reference,
                corpus: "reference",
            });
        }
        self.index.insert(reference, self.verses.len());
        self.verses.push(verse);
        Ok(())
    }

    pub fn get(&self, reference: &VerseRef) -> Option<&ReferenceVerse> {
        self.index.get(reference).and_then(|&i| self.verses.get(i))
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceVerse> {
        self.verses.iter()
    }
}

/// The edition to enrich, as raw tokens in corpus order.
#[derive(Debug, Clone, Default)]
pub struct TargetCorpus {
    verses: Vec<RawVerse>,
    seen: HashSet<VerseRef>,
}

impl TargetCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_verses(verses: Vec<RawVerse>) -> PipelineResult<Self> {
        let mut corpus = Self::new();
        for verse in verses {
            corpus.push(verse)?;
        }
        Ok(corpus)
    }

    pub fn push(&mut self, verse: RawVerse) -> PipelineResult<()> {
        if !self.seen.insert(verse.reference.clone()) {
            return Err(PipelineError::DuplicateVerse {
                reference: verse.reference,
                corpus: "target",
            });
        }
        self.verses.push(verse);
        Ok(())
    }

    pub fn verses(&self) -> &[RawVerse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn untagged_count(&self) -> usize {
        self.verses.iter().map(|v| v.untagged_positions().len()).sum()
    }

    pub(crate) fn into_verses(self) -> Vec<RawVerse> {
        self.verses
    }
}
