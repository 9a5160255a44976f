use crate::config::EngineConfig;
use crate::corpus::{ReferenceCorpus, TargetCorpus};
use crate::errors::{ConfigResult, PipelineError, PipelineResult};
use crate::graph::{NodeGraph, NodeGraphBuilder};
use crate::oracle::{TagRequest, TaggingOracle};
use layered_verse::{NodeKind, PartOfSpeech, RawToken, ReferenceVerse, TokenTags, Verse, VerseRef, VerseStructure};
use layered_verse_align::{AlignmentClass, AlignmentClassifier, AlignmentRecord, WordAligner};
use layered_verse_structure::{HeuristicGenerator, Transplanter};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Everything computed for one target verse.
#[derive(Debug, Clone, PartialEq)]
pub struct VerseOutcome {
    pub verse: Verse,
    pub alignment: AlignmentRecord,
    pub class: AlignmentClass,
    pub structure: VerseStructure,
}

/// Align, classify, then transplant or generate, verse by verse.
///
/// Per-verse work shares nothing mutable, so verses run on the rayon pool
/// when `parallel` is set. Node ids are assigned afterwards by a single
/// [`NodeGraphBuilder`] pass over the collected outcomes.
#[derive(Debug, Clone)]
pub struct StructurePipeline {
    aligner: WordAligner,
    classifier: AlignmentClassifier,
    generator: HeuristicGenerator,
    transplanter: Transplanter,
    parallel: bool,
}

impl StructurePipeline {
    pub fn new(config: &EngineConfig) -> ConfigResult<Self> {
        let pipeline = Self {
            aligner: config.aligner(),
            classifier: config.classifier()?,
            generator: config.generator()?,
            transplanter: Transplanter::new(),
            parallel: config.execution.parallel,
        };
        tracing::debug!(
            inferred_threshold = pipeline.classifier.inferred_threshold(),
            elisions = pipeline.aligner.elisions().len(),
            confidence_version = pipeline.generator.confidence().version,
            parallel = pipeline.parallel,
            "structure pipeline ready"
        );
        Ok(pipeline)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Tag the target corpus, consulting `oracle` once for every token the
    /// corpus left untagged.
    pub fn tag<O: TaggingOracle + ?Sized>(&self, target: TargetCorpus, oracle: &O) -> PipelineResult<Vec<Verse>> {
        let verses = target.into_verses();
        let answers = {
            let requests: Vec<TagRequest<'_>> = verses
                .iter()
                .flat_map(|verse| {
                    verse.untagged_positions().into_iter().filter_map(move |position| {
                        verse.tokens.get(position).map(|token| TagRequest {
                            reference: &verse.reference,
                            position,
                            surface: &token.surface,
                        })
                    })
                })
                .collect();
            let answers = if requests.is_empty() {
                Vec::new()
            } else {
                oracle.tag(&requests).map_err(|message| PipelineError::Tagging { message })?
            };
            if answers.len() != requests.len() {
                return Err(PipelineError::Tagging {
                    message: format!("expected {} tags, oracle returned {}", requests.len(), answers.len()),
                });
            }
            answers
        };
        tracing::info!(tokens = answers.len(), "tagged tokens missing from the target corpus");

        let mut answers = answers.into_iter();
        Ok(verses
            .into_iter()
            .map(|raw| {
                raw.into_verse(|_, token| answers.next().unwrap_or_else(|| fallback_tags(token)))
            })
            .collect())
    }

    /// Process one verse against its reference counterpart, if any.
    pub fn process_verse(&self, verse: Verse, reference: Option<&ReferenceVerse>) -> VerseOutcome {
        let alignment = match reference {
            Some(reference) => self.aligner.align(&verse, &reference.verse),
            None => AlignmentRecord::unmatched(verse.len(), 0),
        };
        let class = self.classifier.classify(&alignment);

        let structure = match (class, reference) {
            (AlignmentClass::Direct, Some(reference)) => {
                match self.transplanter.transplant(&reference.tree, &alignment) {
                    Ok(structure) => structure,
                    Err(error) => {
                        tracing::warn!(verse = %verse.reference(), %error, "transplant failed, generating instead");
                        self.generator.generate(&verse)
                    }
                }
            }
            _ => self.generator.generate(&verse),
        };

        tracing::debug!(
            verse = %verse.reference(),
            class = %class,
            completeness = alignment.completeness(),
            nodes = structure.len(),
            "processed verse"
        );
        VerseOutcome {
            verse,
            alignment,
            class,
            structure,
        }
    }

    /// Process tagged verses in corpus order.
    pub fn process_all(&self, verses: Vec<Verse>, reference: &ReferenceCorpus) -> Vec<VerseOutcome> {
        let process = |verse: Verse| {
            let counterpart = reference.get(verse.reference());
            if counterpart.is_none() {
                tracing::warn!(verse = %verse.reference(), "no reference verse, structure will be generated");
            }
            self.process_verse(verse, counterpart)
        };

        if self.parallel {
            verses.into_par_iter().map(process).collect()
        } else {
            verses.into_iter().map(process).collect()
        }
    }

    /// Tag, then process the whole corpus.
    pub fn run<O: TaggingOracle + ?Sized>(
        &self,
        target: TargetCorpus,
        reference: &ReferenceCorpus,
        oracle: &O,
    ) -> PipelineResult<PipelineRun> {
        let verses = self.tag(target, oracle)?;
        let run = PipelineRun {
            outcomes: self.process_all(verses, reference),
        };
        run.log_summary();
        Ok(run)
    }
}

fn fallback_tags(token: &RawToken) -> TokenTags {
    TokenTags::new(token.surface.clone(), PartOfSpeech::Other)
}

/// Outcomes of one run, in target corpus order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineRun {
    outcomes: Vec<VerseOutcome>,
}

impl PipelineRun {
    pub fn outcomes(&self) -> &[VerseOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, reference: &VerseRef) -> Option<&VerseOutcome> {
        self.outcomes.iter().find(|o| o.verse.reference() == reference)
    }

    /// Verses per alignment class. Every class is present.
    pub fn class_counts(&self) -> BTreeMap<AlignmentClass, usize> {
        let mut counts: BTreeMap<_, _> = AlignmentClass::ALL.iter().map(|&c| (c, 0)).collect();
        for outcome in &self.outcomes {
            *counts.entry(outcome.class).or_insert(0) += 1;
        }
        counts
    }

    /// Structure nodes per kind, over all verses.
    pub fn node_counts(&self) -> BTreeMap<NodeKind, usize> {
        let mut counts = BTreeMap::new();
        for node in self.outcomes.iter().flat_map(|o| o.structure.nodes()) {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_summary(&self) {
        let classes = self.class_counts();
        let nodes = self.node_counts();
        let count = |class| classes.get(&class).copied().unwrap_or(0);
        let nodes_of = |kind| nodes.get(&kind).copied().unwrap_or(0);
        tracing::info!(
            verses = self.outcomes.len(),
            direct = count(AlignmentClass::Direct),
            inferred = count(AlignmentClass::Inferred),
            generated = count(AlignmentClass::Generated),
            clauses = nodes_of(NodeKind::Clause),
            phrases = nodes_of(NodeKind::Phrase),
            word_groups = nodes_of(NodeKind::WordGroup),
            "pipeline run complete"
        );
    }

    /// Merge every verse into one graph with corpus-wide node ids.
    pub fn build_graph(&self) -> NodeGraph {
        NodeGraphBuilder::new().build(&self.outcomes)
    }
}
