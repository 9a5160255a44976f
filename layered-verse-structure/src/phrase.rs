use crate::confidence::RuleId;
use layered_verse::{Case, PartOfSpeech, Token, TokenSpan, Verse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhraseKind {
    #[serde(rename = "NP")]
    Np,
    #[serde(rename = "VP")]
    Vp,
    #[serde(rename = "PP")]
    Pp,
    AdvP,
}

impl PhraseKind {
    pub fn code(&self) -> &'static str {
        self.rule().name()
    }

    pub fn rule(&self) -> RuleId {
        match self {
            PhraseKind::Np => RuleId::Np,
            PhraseKind::Vp => RuleId::Vp,
            PhraseKind::Pp => RuleId::Pp,
            PhraseKind::AdvP => RuleId::AdvP,
        }
    }
}

/// A run of adjacent tokens forming one phrase-level group.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub kind: PhraseKind,
    pub span: TokenSpan,
    /// Case of the group's nominals, if any carry one
    pub case: Option<Case>,
    pub has_finite_verb: bool,
}

/// Groups the tokens of a clause into phrases by part of speech.
///
/// Nominals form `NP`s, verbs `VP`s, adverbs `AdvP`s, and a preposition takes
/// the nominals that follow it into a `PP`. Conjunctions, particles,
/// interjections and punctuation belong to no phrase. A nominal whose case
/// differs from its group's case starts a new group, except for a genitive
/// noun directly after a noun.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseGrouper;

enum Category {
    Nominal,
    Verb,
    Preposition,
    Adverb,
    Break,
}

fn category(token: &Token) -> Category {
    match token.pos() {
        pos if pos.is_nominal() => Category::Nominal,
        PartOfSpeech::Verb => Category::Verb,
        PartOfSpeech::Preposition => Category::Preposition,
        PartOfSpeech::Adverb => Category::Adverb,
        _ => Category::Break,
    }
}

impl PhraseGrouper {
    pub fn new() -> Self {
        PhraseGrouper
    }

    /// Phrases within `span` of `verse`, in token order.
    pub fn group(&self, verse: &Verse, span: TokenSpan) -> Vec<Phrase> {
        let mut phrases = Vec::new();
        let mut current: Option<Phrase> = None;

        for token in verse.tokens_in(span) {
            let position = token.position();
            let kind = match category(token) {
                Category::Break => {
                    phrases.extend(current.take());
                    continue;
                }
                Category::Nominal => PhraseKind::Np,
                Category::Verb => PhraseKind::Vp,
                Category::Preposition => PhraseKind::Pp,
                Category::Adverb => PhraseKind::AdvP,
            };

            let joins = match (&current, kind) {
                (Some(open), PhraseKind::Np) => {
                    matches!(open.kind, PhraseKind::Np | PhraseKind::Pp)
                        && continues_nominal(verse, open, token)
                }
                (Some(open), PhraseKind::Vp) => open.kind == PhraseKind::Vp,
                (Some(open), PhraseKind::AdvP) => open.kind == PhraseKind::AdvP,
                // a preposition always opens a new PP
                _ => false,
            };
            if !joins {
                phrases.extend(current.take());
            }

            let phrase = current.get_or_insert_with(|| Phrase {
                kind,
                span: TokenSpan::single(position),
                case: None,
                has_finite_verb: false,
            });
            phrase.span = TokenSpan::new(phrase.span.start, position);
            if phrase.case.is_none() && token.pos().is_nominal() {
                phrase.case = token.case();
            }
            phrase.has_finite_verb |= token.is_finite_verb();
        }

        phrases.extend(current);
        phrases
    }
}

fn continues_nominal(verse: &Verse, phrase: &Phrase, token: &Token) -> bool {
    let (Some(group_case), Some(case)) = (phrase.case, token.case()) else {
        return true;
    };
    if group_case == case {
        return true;
    }
    let previous = token.position().checked_sub(1).and_then(|p| verse.token(p));
    case == Case::Genitive && token.is_noun_head() && previous.map_or(false, Token::is_noun_head)
}
