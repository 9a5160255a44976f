//! Expansion of elided forms (`δι᾽`, `ἀπ᾽`, ...) to their full lemma.

use layered_verse::normalize_form;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Elided surface form -> full lemma, as written in editions.
const STANDARD_ELISIONS: &[(&str, &str)] = &[
    ("ἀλλ᾽", "ἀλλά"),
    ("δ᾽", "δέ"),
    ("δι᾽", "διά"),
    ("ἐπ᾽", "ἐπί"),
    ("ἐφ᾽", "ἐπί"),
    ("ἀπ᾽", "ἀπό"),
    ("ἀφ᾽", "ἀπό"),
    ("μετ᾽", "μετά"),
    ("μεθ᾽", "μετά"),
    ("κατ᾽", "κατά"),
    ("καθ᾽", "κατά"),
    ("παρ᾽", "παρά"),
    ("ὑπ᾽", "ὑπό"),
    ("ὑφ᾽", "ὑπό"),
    ("ἀνθ᾽", "ἀντί"),
    ("τοῦτ᾽", "τοῦτο"),
    ("ταῦτ᾽", "ταῦτα"),
    ("ἐκεῖν᾽", "ἐκεῖνο"),
    ("ποτ᾽", "ποτέ"),
    ("οὔτ᾽", "οὔτε"),
    ("μήτ᾽", "μήτε"),
    ("οὐδ᾽", "οὐδέ"),
    ("μηδ᾽", "μηδέ"),
];

/// Lookup table from normalized elided form to normalized full form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElisionTable {
    entries: BTreeMap<String, String>,
}

impl ElisionTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The built-in table of common elisions.
    pub fn standard() -> Self {
        Self::empty().with_entries(STANDARD_ELISIONS.iter().copied())
    }

    pub fn with_entry(mut self, elided: &str, full: &str) -> Self {
        self.insert(elided, full);
        self
    }

    /// Add several entries. Later entries replace earlier ones with the same key.
    pub fn with_entries<'s, I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        for (elided, full) in entries {
            self.insert(elided, full);
        }
        self
    }

    fn insert(&mut self, elided: &str, full: &str) {
        let key = normalize_form(elided);
        if !key.is_empty() {
            self.entries.insert(key, normalize_form(full));
        }
    }

    /// Expand a normalized elided form.
    pub fn expand(&self, normalized: &str) -> Option<&str> {
        self.entries.get(normalized).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ElisionTable {
    fn default() -> Self {
        Self::standard()
    }
}
