use crate::confidence::{ConfidenceTable, RuleId};
use crate::lexicon::{ClauseLexicon, ClauseType};
use layered_verse::{TokenSpan, Verse};

/// One clause of a verse, in token order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClauseSegment {
    pub clause_type: ClauseType,
    /// What opened the clause
    pub trigger: RuleId,
    pub confidence: f64,
    /// `None` only for a leading main clause with no tokens
    pub span: Option<TokenSpan>,
}

/// Splits a verse into clauses with a single left-to-right scan.
///
/// A clause opens at the current token on a subordinator, a relative
/// pronoun, or a coordinator once the current clause already holds a finite
/// verb. Major punctuation closes the current clause after the token that
/// carries it; the next token then opens a `main` clause. The leading `main`
/// clause is always reported, even when a trigger on the first token leaves
/// it empty.
#[derive(Debug, Clone, Copy)]
pub struct ClauseSegmenter<'a> {
    lexicon: &'a ClauseLexicon,
    confidence: &'a ConfidenceTable,
}

struct OpenClause {
    clause_type: ClauseType,
    trigger: RuleId,
    span: Option<TokenSpan>,
    seen_finite_verb: bool,
}

impl OpenClause {
    fn new(clause_type: ClauseType, trigger: RuleId) -> Self {
        Self {
            clause_type,
            trigger,
            span: None,
            seen_finite_verb: false,
        }
    }

    fn extend(&mut self, position: usize) {
        self.span = Some(match self.span {
            Some(span) => TokenSpan::new(span.start, position),
            None => TokenSpan::single(position),
        });
    }
}

impl<'a> ClauseSegmenter<'a> {
    pub fn new(lexicon: &'a ClauseLexicon, confidence: &'a ConfidenceTable) -> Self {
        Self { lexicon, confidence }
    }

    fn trigger_at(&self, verse: &Verse, position: usize, seen_finite_verb: bool) -> Option<(ClauseType, RuleId)> {
        let token = verse.token(position)?;
        if let Some(clause_type) = self.lexicon.subordinator(token) {
            Some((clause_type, RuleId::Subordinator))
        } else if self.lexicon.is_relative(token) {
            Some((ClauseType::Relative, RuleId::Relative))
        } else if seen_finite_verb && self.lexicon.is_coordinator(token) {
            Some((ClauseType::Coordinate, RuleId::Coordinator))
        } else {
            None
        }
    }

    fn close(&self, clause: OpenClause, segments: &mut Vec<ClauseSegment>) {
        // only the leading clause may be reported without tokens
        if clause.span.is_none() && !segments.is_empty() {
            return;
        }
        segments.push(ClauseSegment {
            clause_type: clause.clause_type,
            trigger: clause.trigger,
            confidence: self.confidence.get(clause.trigger),
            span: clause.span,
        });
    }

    pub fn segment(&self, verse: &Verse) -> Vec<ClauseSegment> {
        let mut segments = Vec::new();
        let mut current = Some(OpenClause::new(ClauseType::Main, RuleId::VerseStart));

        for (position, token) in verse.tokens().iter().enumerate() {
            let mut clause = match current.take() {
                Some(clause) => clause,
                None => OpenClause::new(ClauseType::Main, RuleId::Punctuation),
            };

            if let Some((clause_type, trigger)) = self.trigger_at(verse, position, clause.seen_finite_verb) {
                self.close(clause, &mut segments);
                clause = OpenClause::new(clause_type, trigger);
            }

            clause.extend(position);
            if token.is_finite_verb() {
                clause.seen_finite_verb = true;
            }

            if self.lexicon.is_major_break(token) {
                self.close(clause, &mut segments);
            } else {
                current = Some(clause);
            }
        }

        if let Some(clause) = current {
            self.close(clause, &mut segments);
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_verse::{Mood, PartOfSpeech, Token, TokenTags, VerseRef};

    fn verse(words: &[(&str, PartOfSpeech)]) -> Verse {
        let tokens = words
            .iter()
            .enumerate()
            .map(|(i, (form, pos))| {
                let surface = form.trim_end_matches('.');
                let mut tags = TokenTags::new(surface, *pos);
                if *pos == PartOfSpeech::Verb {
                    tags = tags.with_mood(Mood::Indicative);
                }
                let after = if form.ends_with('.') { "." } else { " " };
                Token::new(i, surface, tags).with_after(after)
            })
            .collect();
        Verse::new(VerseRef::new("MRK", 1, 1), tokens)
    }

    fn summary(segments: &[ClauseSegment]) -> Vec<(ClauseType, Option<(usize, usize)>)> {
        segments
            .iter()
            .map(|s| (s.clause_type, s.span.map(|sp| (sp.start, sp.end))))
            .collect()
    }

    #[test]
    fn test_coordinator_needs_finite_verb() {
        let lexicon = ClauseLexicon::standard();
        let table = ConfidenceTable::standard();
        let segmenter = ClauseSegmenter::new(&lexicon, &table);

        // "καί" before any verb does not split
        let segments = segmenter.segment(&verse(&[
            ("καί", PartOfSpeech::Conjunction),
            ("ἦλθεν", PartOfSpeech::Verb),
            ("καί", PartOfSpeech::Conjunction),
            ("εἶδεν", PartOfSpeech::Verb),
        ]));
        assert_eq!(
            summary(&segments),
            vec![
                (ClauseType::Main, Some((0, 1))),
                (ClauseType::Coordinate, Some((2, 3)))
            ]
        );
        assert_eq!(segments[1].confidence, 0.90);
    }

    #[test]
    fn test_punctuation_opens_main_clause() {
        let lexicon = ClauseLexicon::standard();
        let table = ConfidenceTable::standard();
        let segmenter = ClauseSegmenter::new(&lexicon, &table);

        let segments = segmenter.segment(&verse(&[
            ("ἦλθεν.", PartOfSpeech::Verb),
            ("εἶδεν", PartOfSpeech::Verb),
            ("ὅς", PartOfSpeech::Pronoun),
            ("ἦν.", PartOfSpeech::Verb),
        ]));
        assert_eq!(
            summary(&segments),
            vec![
                (ClauseType::Main, Some((0, 0))),
                (ClauseType::Main, Some((1, 1))),
                (ClauseType::Relative, Some((2, 3)))
            ]
        );
        assert_eq!(segments[1].trigger, RuleId::Punctuation);
        assert_eq!(segments[1].confidence, 0.95);
        assert_eq!(segments[2].confidence, 0.90);
    }

    #[test]
    fn test_empty_verse_has_empty_main_clause() {
        let lexicon = ClauseLexicon::standard();
        let table = ConfidenceTable::standard();
        let segments = ClauseSegmenter::new(&lexicon, &table).segment(&verse(&[]));
        assert_eq!(summary(&segments), vec![(ClauseType::Main, None)]);
    }
}
