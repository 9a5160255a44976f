//! Part of speech and morphological features.
//!
//! Tags arrive from two places: the reference corpus, which uses short
//! part-of-speech codes (`subs`, `nmpr`, `art`, ...), and the external tagger,
//! which reports Robinson-style morphology codes (`N-NSM`, `V-PAI-3S`, ...).
//! Both are folded into the same small set of enums here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Article,
    Pronoun,
    Verb,
    Preposition,
    Conjunction,
    Adverb,
    Particle,
    Interjection,
    Numeral,
    Punctuation,
    Other,
}

impl PartOfSpeech {
    /// Parse a part-of-speech code.
    ///
    /// Accepts the reference corpus codes (`subs`, `nmpr`, `adjv`, `art`,
    /// `pron`, `verb`, `prep`, `conj`, `advb`, `ptcl`, `intj`, `num`) as well as
    /// universal-style aliases (`noun`, `propn`, `adj`, `det`, `adp`, ...).
    /// Unknown codes map to [`PartOfSpeech::Other`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "subs" | "noun" | "n" => Self::Noun,
            "nmpr" | "propn" | "name" => Self::ProperNoun,
            "adjv" | "adj" | "a" => Self::Adjective,
            "art" | "det" | "t" => Self::Article,
            "pron" | "pronoun" => Self::Pronoun,
            "verb" | "aux" | "v" => Self::Verb,
            "prep" | "adp" => Self::Preposition,
            "conj" | "cconj" | "sconj" => Self::Conjunction,
            "advb" | "adv" => Self::Adverb,
            "ptcl" | "part" | "prt" => Self::Particle,
            "intj" | "inj" => Self::Interjection,
            "num" => Self::Numeral,
            "punct" | "pun" => Self::Punctuation,
            _ => Self::Other,
        }
    }

    /// The reference corpus code for this part of speech.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Noun => "subs",
            Self::ProperNoun => "nmpr",
            Self::Adjective => "adjv",
            Self::Article => "art",
            Self::Pronoun => "pron",
            Self::Verb => "verb",
            Self::Preposition => "prep",
            Self::Conjunction => "conj",
            Self::Adverb => "advb",
            Self::Particle => "ptcl",
            Self::Interjection => "intj",
            Self::Numeral => "num",
            Self::Punctuation => "punct",
            Self::Other => "other",
        }
    }

    /// Noun or proper noun, the heads of noun phrases.
    pub fn is_noun(&self) -> bool {
        matches!(self, Self::Noun | Self::ProperNoun)
    }

    /// Any word that can sit inside a noun phrase.
    pub fn is_nominal(&self) -> bool {
        matches!(
            self,
            Self::Noun
                | Self::ProperNoun
                | Self::Adjective
                | Self::Article
                | Self::Pronoun
                | Self::Numeral
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Vocative,
}

impl Case {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "N" => Some(Self::Nominative),
            "G" => Some(Self::Genitive),
            "D" => Some(Self::Dative),
            "A" => Some(Self::Accusative),
            "V" => Some(Self::Vocative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Indicative,
    Subjunctive,
    Optative,
    Imperative,
    Infinitive,
    Participle,
}

impl Mood {
    /// Indicative, subjunctive, optative and imperative forms are finite.
    pub fn is_finite(&self) -> bool {
        !matches!(self, Self::Infinitive | Self::Participle)
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "I" => Some(Self::Indicative),
            "S" => Some(Self::Subjunctive),
            "O" => Some(Self::Optative),
            "M" => Some(Self::Imperative),
            "N" => Some(Self::Infinitive),
            "P" => Some(Self::Participle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Present,
    Imperfect,
    Future,
    Aorist,
    Perfect,
    Pluperfect,
}

impl Tense {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "P" => Some(Self::Present),
            "I" => Some(Self::Imperfect),
            "F" => Some(Self::Future),
            "A" => Some(Self::Aorist),
            "R" => Some(Self::Perfect),
            "L" => Some(Self::Pluperfect),
            _ => None,
        }
    }
}

/// Morphological features of a single word, where known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morphology {
    pub case: Option<Case>,
    pub mood: Option<Mood>,
    pub tense: Option<Tense>,
}

// V-PAI-3S, V-2AAI-3S, V-AAP-NSM, V-PAN
static VERB_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^V-2?([PIFARL])[AMPEDONQX]?([ISOMNP])(?:-([NGDAV])[SP][MFN]?)?")
        .expect("verb morphology pattern is valid")
});

// N-NSM, T-GSF, A-DPN, P-1NS, F-3ASM, S-1SNSM
static NOMINAL_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([NATRCDKIXQFSP])-(?:\d[SP]?)?([NGDAV])?")
        .expect("nominal morphology pattern is valid")
});

impl Morphology {
    /// Parse a Robinson-style morphology code into part of speech and features.
    ///
    /// Returns `None` when the code is not recognized.
    pub fn parse_robinson(code: &str) -> Option<(PartOfSpeech, Morphology)> {
        let code = code.trim().to_uppercase();
        let bare = code.split('-').next().unwrap_or("");

        let indeclinable = match bare {
            "PREP" => Some(PartOfSpeech::Preposition),
            "CONJ" | "COND" => Some(PartOfSpeech::Conjunction),
            "ADV" => Some(PartOfSpeech::Adverb),
            "PRT" => Some(PartOfSpeech::Particle),
            "INJ" => Some(PartOfSpeech::Interjection),
            "HEB" | "ARAM" | "ARA" => Some(PartOfSpeech::ProperNoun),
            _ => None,
        };
        if let Some(pos) = indeclinable {
            return Some((pos, Morphology::default()));
        }

        if let Some(caps) = VERB_CODE.captures(&code) {
            let morphology = Morphology {
                tense: caps.get(1).and_then(|m| Tense::from_letter(m.as_str())),
                mood: caps.get(2).and_then(|m| Mood::from_letter(m.as_str())),
                case: caps.get(3).and_then(|m| Case::from_letter(m.as_str())),
            };
            return Some((PartOfSpeech::Verb, morphology));
        }

        if code == "N-PRI" || code == "N-LI" {
            return Some((PartOfSpeech::ProperNoun, Morphology::default()));
        }

        let caps = NOMINAL_CODE.captures(&code)?;
        let pos = match caps.get(1).map(|m| m.as_str()) {
            Some("N") => PartOfSpeech::Noun,
            Some("A") => PartOfSpeech::Adjective,
            Some("T") => PartOfSpeech::Article,
            _ => PartOfSpeech::Pronoun,
        };
        let morphology = Morphology {
            case: caps.get(2).and_then(|m| Case::from_letter(m.as_str())),
            ..Morphology::default()
        };
        Some((pos, morphology))
    }
}
