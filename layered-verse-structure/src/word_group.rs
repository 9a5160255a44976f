//! Greedy word-group matcher.
//!
//! A cursor walks the tokens of one phrase. At each position the rules of
//! [`WORD_GROUP_RULES`] are tried in order; the first match consumes its span
//! and moves the cursor past it. When nothing matches the cursor advances by
//! one and that token stays ungrouped.

use crate::confidence::{ConfidenceTable, RuleId};
use layered_verse::{Case, PartOfSpeech, Token, TokenSpan, Verse};

/// A rule returns the index of the last token it consumes, starting at `at`.
type Matcher = fn(&[Token], usize) -> Option<usize>;

pub struct WordGroupRule {
    pub id: RuleId,
    matcher: Matcher,
}

/// Rules in priority order.
pub const WORD_GROUP_RULES: &[WordGroupRule] = &[
    WordGroupRule {
        id: RuleId::DetNp,
        matcher: det_np,
    },
    WordGroupRule {
        id: RuleId::PrepNp,
        matcher: prep_np,
    },
    WordGroupRule {
        id: RuleId::NpOfNp,
        matcher: np_of_np,
    },
    WordGroupRule {
        id: RuleId::AdjpNp,
        matcher: adjp_np,
    },
    WordGroupRule {
        id: RuleId::NpAdjp,
        matcher: np_adjp,
    },
];

fn pos_at(tokens: &[Token], at: usize) -> Option<PartOfSpeech> {
    tokens.get(at).map(Token::pos)
}

fn noun_at(tokens: &[Token], at: usize) -> bool {
    tokens.get(at).map_or(false, Token::is_noun_head)
}

/// article (adjective | pronoun)* noun
fn det_np(tokens: &[Token], at: usize) -> Option<usize> {
    if pos_at(tokens, at)? != PartOfSpeech::Article {
        return None;
    }
    let mut end = at + 1;
    while matches!(pos_at(tokens, end), Some(PartOfSpeech::Adjective | PartOfSpeech::Pronoun)) {
        end += 1;
    }
    noun_at(tokens, end).then_some(end)
}

/// preposition (DetNP | noun)
fn prep_np(tokens: &[Token], at: usize) -> Option<usize> {
    if pos_at(tokens, at)? != PartOfSpeech::Preposition {
        return None;
    }
    det_np(tokens, at + 1).or_else(|| noun_at(tokens, at + 1).then_some(at + 1))
}

/// noun followed by a chain of genitives ending in a genitive noun
fn np_of_np(tokens: &[Token], at: usize) -> Option<usize> {
    if !noun_at(tokens, at) {
        return None;
    }
    let mut last_noun = None;
    let mut cursor = at + 1;
    while let Some(token) = tokens.get(cursor) {
        let genitive_nominal = token.case() == Some(Case::Genitive)
            && matches!(
                token.pos(),
                PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Article | PartOfSpeech::Adjective
            );
        if !genitive_nominal {
            break;
        }
        if token.is_noun_head() {
            last_noun = Some(cursor);
        }
        cursor += 1;
    }
    last_noun
}

/// adjective noun
fn adjp_np(tokens: &[Token], at: usize) -> Option<usize> {
    (pos_at(tokens, at)? == PartOfSpeech::Adjective && noun_at(tokens, at + 1)).then_some(at + 1)
}

/// noun adjective, agreeing in case when both are known
fn np_adjp(tokens: &[Token], at: usize) -> Option<usize> {
    let (noun, adjective) = (tokens.get(at)?, tokens.get(at + 1)?);
    let agrees = match (noun.case(), adjective.case()) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };
    (noun.is_noun_head() && adjective.pos() == PartOfSpeech::Adjective && agrees).then_some(at + 1)
}

/// A matched word group.
#[derive(Debug, Clone, PartialEq)]
pub struct WordGroup {
    pub rule: RuleId,
    pub span: TokenSpan,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct WordGroupMatcher<'a> {
    confidence: &'a ConfidenceTable,
}

impl<'a> WordGroupMatcher<'a> {
    pub fn new(confidence: &'a ConfidenceTable) -> Self {
        Self { confidence }
    }

    /// Word groups within `span` of `verse`, in token order.
    pub fn match_span(&self, verse: &Verse, span: TokenSpan) -> Vec<WordGroup> {
        let tokens = verse.tokens_in(span);
        let Some(offset) = tokens.first().map(Token::position) else {
            return Vec::new();
        };

        let mut groups = Vec::new();
        let mut cursor = 0;
        while cursor < tokens.len() {
            let matched = WORD_GROUP_RULES
                .iter()
                .find_map(|rule| (rule.matcher)(tokens, cursor).map(|end| (rule.id, end)));
            match matched {
                Some((rule, end)) => {
                    groups.push(WordGroup {
                        rule,
                        span: TokenSpan::new(offset + cursor, offset + end),
                        confidence: self.confidence.get(rule),
                    });
                    cursor = end + 1;
                }
                None => cursor += 1,
            }
        }
        groups
    }
}
