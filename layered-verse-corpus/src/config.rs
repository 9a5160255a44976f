//! Engine configuration, read from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration
//! that reproduces the standard tables.

use crate::errors::{ConfigError, ConfigResult};
use layered_verse_align::{AlignmentClassifier, ElisionTable, WordAligner, DEFAULT_INFERRED_THRESHOLD};
use layered_verse_structure::{ClauseLexicon, ClauseType, ConfidenceTable, HeuristicGenerator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub alignment: AlignmentConfig,
    pub lexicon: LexiconConfig,
    /// Per-rule overrides on top of the standard confidence table, keyed by
    /// rule name (`DetNP`, `Subj`, ...).
    pub confidence: BTreeMap<String, f64>,
    pub execution: ExecutionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlignmentConfig {
    /// Minimum completeness for `inferred`.
    pub inferred_threshold: f64,
    /// Elided form to full lemma, added to the standard table.
    pub elisions: BTreeMap<String, String>,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            inferred_threshold: DEFAULT_INFERRED_THRESHOLD,
            elisions: BTreeMap::new(),
        }
    }
}

/// Lexical sets for clause segmentation. A set that is present replaces the
/// standard one; an absent set keeps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconConfig {
    /// Word to clause type code (`content`, `purpose`, ...).
    pub subordinators: Option<BTreeMap<String, String>>,
    pub relatives: Option<Vec<String>>,
    pub coordinators: Option<Vec<String>>,
    pub major_punctuation: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Process verses on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { message } => ConfigError::Parse {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Check every value that would otherwise fail later.
    pub fn validate(&self) -> ConfigResult<()> {
        self.classifier()?;
        self.generator()?;
        Ok(())
    }

    pub fn classifier(&self) -> ConfigResult<AlignmentClassifier> {
        Ok(AlignmentClassifier::new(self.alignment.inferred_threshold)?)
    }

    pub fn aligner(&self) -> WordAligner {
        let elisions = ElisionTable::standard().with_entries(
            self.alignment
                .elisions
                .iter()
                .map(|(elided, full)| (elided.as_str(), full.as_str())),
        );
        WordAligner::new(elisions)
    }

    pub fn lexicon(&self) -> ConfigResult<ClauseLexicon> {
        let settings = &self.lexicon;
        let mut lexicon = ClauseLexicon::standard();

        if let Some(subordinators) = &settings.subordinators {
            let entries = subordinators
                .iter()
                .map(|(word, code)| Ok((word.as_str(), ClauseType::from_code(code)?)))
                .collect::<ConfigResult<Vec<_>>>()?;
            lexicon = lexicon.with_subordinators(entries);
        }
        if let Some(relatives) = &settings.relatives {
            lexicon = lexicon.with_relatives(relatives.iter().map(String::as_str));
        }
        if let Some(coordinators) = &settings.coordinators {
            lexicon = lexicon.with_coordinators(coordinators.iter().map(String::as_str));
        }
        if let Some(marks) = &settings.major_punctuation {
            lexicon = lexicon.with_major_punctuation(marks.iter().map(String::as_str));
        }

        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn confidence_table(&self) -> ConfigResult<ConfidenceTable> {
        let table = ConfidenceTable::standard()
            .with_named_overrides(self.confidence.iter().map(|(name, value)| (name.as_str(), *value)))?;
        Ok(table)
    }

    pub fn generator(&self) -> ConfigResult<HeuristicGenerator> {
        Ok(HeuristicGenerator::new(self.lexicon()?, self.confidence_table()?)?)
    }
}
