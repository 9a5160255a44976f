use crate::morphology::{Case, Morphology, Mood, PartOfSpeech, Tense};
use crate::normalize::normalize_form;
use serde::{Deserialize, Serialize};

/// Linguistic tags attached to one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTags {
    pub lemma: String,
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub morphology: Morphology,
    /// The raw morphology code as reported by the tagger, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morph_code: Option<String>,
}

impl TokenTags {
    pub fn new(lemma: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            morphology: Morphology::default(),
            morph_code: None,
        }
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.morphology.case = Some(case);
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.morphology.mood = Some(mood);
        self
    }

    pub fn with_morph_code(mut self, code: impl Into<String>) -> Self {
        self.morph_code = Some(code.into());
        self
    }

    /// Build tags from a lemma and a Robinson morphology code.
    ///
    /// Unrecognized codes yield [`PartOfSpeech::Other`] with no features; the
    /// code is kept either way. A `N-` code on a capitalized lemma is read as a
    /// proper noun.
    pub fn from_robinson(lemma: impl Into<String>, code: &str) -> Self {
        let lemma = lemma.into();
        let (mut pos, morphology) =
            Morphology::parse_robinson(code).unwrap_or((PartOfSpeech::Other, Morphology::default()));
        if pos == PartOfSpeech::Noun && lemma.chars().next().map_or(false, char::is_uppercase) {
            pos = PartOfSpeech::ProperNoun;
        }
        Self {
            lemma,
            pos,
            morphology,
            morph_code: Some(code.trim().to_string()),
        }
    }
}

/// One word of a verse: its surface form, tags and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    position: usize,
    surface: String,
    normalized: String,
    /// Trailing punctuation and whitespace, kept for display
    #[serde(default)]
    after: String,
    tags: TokenTags,
}

impl Token {
    pub fn new(position: usize, surface: impl Into<String>, tags: TokenTags) -> Self {
        let surface = surface.into();
        Self {
            position,
            normalized: normalize_form(&surface),
            surface,
            after: String::new(),
            tags,
        }
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Diacritic-free lowercase form. See [`normalize_form`].
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    pub fn tags(&self) -> &TokenTags {
        &self.tags
    }

    pub fn lemma(&self) -> &str {
        &self.tags.lemma
    }

    /// Normalized lemma, falling back to the normalized surface when the
    /// lemma is missing.
    pub fn lemma_key(&self) -> String {
        if self.tags.lemma.trim().is_empty() {
            self.normalized.clone()
        } else {
            normalize_form(&self.tags.lemma)
        }
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.tags.pos
    }

    pub fn case(&self) -> Option<Case> {
        self.tags.morphology.case
    }

    pub fn mood(&self) -> Option<Mood> {
        self.tags.morphology.mood
    }

    pub fn tense(&self) -> Option<Tense> {
        self.tags.morphology.tense
    }

    pub fn morph_code(&self) -> Option<&str> {
        self.tags.morph_code.as_deref()
    }

    /// A verb that is neither an infinitive nor a participle.
    ///
    /// Verbs with unknown mood count as finite.
    pub fn is_finite_verb(&self) -> bool {
        self.tags.pos == PartOfSpeech::Verb && self.mood().map_or(true, |m| m.is_finite())
    }

    pub fn is_noun_head(&self) -> bool {
        self.tags.pos.is_noun()
    }

    /// Returns true if the trailing text contains any of the given marks.
    pub fn followed_by_any(&self, marks: &[String]) -> bool {
        marks.iter().any(|m| !m.is_empty() && self.after.contains(m.as_str()))
    }
}
