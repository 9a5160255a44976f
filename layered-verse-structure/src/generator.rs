use crate::clause::{ClauseSegment, ClauseSegmenter};
use crate::confidence::ConfidenceTable;
use crate::errors::StructureResult;
use crate::lexicon::ClauseLexicon;
use crate::phrase::PhraseGrouper;
use crate::relation::RelationInferer;
use crate::word_group::WordGroupMatcher;
use layered_verse::{NodeKind, StructureNode, StructureSource, Verse, VerseStructure};

/// Builds clause, phrase and word-group structure from token tags alone.
///
/// The result is at most three levels deep: phrases hang off their clause
/// and word groups off their phrase. Every node is marked
/// [`StructureSource::Generated`] and carries the confidence of the rule that
/// produced it.
#[derive(Debug, Clone, Default)]
pub struct HeuristicGenerator {
    lexicon: ClauseLexicon,
    confidence: ConfidenceTable,
}

impl HeuristicGenerator {
    pub fn new(lexicon: ClauseLexicon, confidence: ConfidenceTable) -> StructureResult<Self> {
        lexicon.validate()?;
        confidence.validate()?;
        Ok(Self { lexicon, confidence })
    }

    pub fn lexicon(&self) -> &ClauseLexicon {
        &self.lexicon
    }

    pub fn confidence(&self) -> &ConfidenceTable {
        &self.confidence
    }

    pub fn segment(&self, verse: &Verse) -> Vec<ClauseSegment> {
        ClauseSegmenter::new(&self.lexicon, &self.confidence).segment(verse)
    }

    pub fn generate(&self, verse: &Verse) -> VerseStructure {
        let grouper = PhraseGrouper::new();
        let matcher = WordGroupMatcher::new(&self.confidence);
        let relations = RelationInferer::new(&self.confidence);

        let mut structure = VerseStructure::new();
        for segment in self.segment(verse) {
            let Some(clause_span) = segment.span else {
                continue;
            };
            let clause = structure.push(
                StructureNode::new(NodeKind::Clause, clause_span, segment.confidence, StructureSource::Generated)
                    .with_clause_type(segment.clause_type.code())
                    .with_rule(segment.trigger.name()),
            );

            let phrases = grouper.group(verse, clause_span);
            let phrase_relations = relations.infer(&phrases);
            for (phrase, relation) in phrases.iter().zip(phrase_relations) {
                let mut node = StructureNode::new(
                    NodeKind::Phrase,
                    phrase.span,
                    self.confidence.get(phrase.kind.rule()),
                    StructureSource::Generated,
                )
                .with_type(phrase.kind.code())
                .with_parent(clause);
                if let Some(relation) = relation {
                    node = node.with_relation(relation.map(|r| r.code().to_string()));
                }
                let phrase_index = structure.push(node);

                for group in matcher.match_span(verse, phrase.span) {
                    structure.push(
                        StructureNode::new(NodeKind::WordGroup, group.span, group.confidence, StructureSource::Generated)
                            .with_rule(group.rule.name())
                            .with_parent(phrase_index),
                    );
                }
            }
        }

        tracing::trace!(
            verse = %verse.reference(),
            nodes = structure.len(),
            "generated structure"
        );
        structure
    }
}
