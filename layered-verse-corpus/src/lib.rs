//! Batch processing of a whole target corpus.
//!
//! [`StructurePipeline::run`] tags the target corpus (one call to the
//! [`TaggingOracle`]), aligns each verse with its reference counterpart,
//! classifies it, and then transplants the reference tree or generates
//! structure. [`PipelineRun::build_graph`] merges the results into one
//! [`NodeGraph`] with corpus-wide ids, and [`IntegrityValidator`] reports
//! structural defects without repairing them.
//!
//! Configuration is TOML, see [`EngineConfig`]. Invalid values fail when the
//! pipeline is built, before any verse is touched.
//!
//! ## Usage
//!
//! ```
//! use layered_verse::{RawVerse, VerseRef};
//! use layered_verse_align::AlignmentClass;
//! use layered_verse_corpus::{EngineConfig, ReferenceCorpus, StructurePipeline, SurfaceOracle, TargetCorpus};
//!
//! let config = EngineConfig::from_toml_str("[execution]\nparallel = false\n").unwrap();
//! let pipeline = StructurePipeline::new(&config).unwrap();
//!
//! let target = TargetCorpus::from_verses(vec![RawVerse::from_text(VerseRef::new("JHN", 11, 35), "ἐδάκρυσεν ὁ Ἰησοῦς.")]).unwrap();
//! let run = pipeline.run(target, &ReferenceCorpus::new(), &SurfaceOracle::new()).unwrap();
//!
//! assert_eq!(run.outcomes()[0].class, AlignmentClass::Generated);
//! assert_eq!(run.class_counts()[&AlignmentClass::Generated], 1);
//! ```

mod config;
mod corpus;
mod errors;
mod graph;
mod oracle;
mod pipeline;
mod validate;

pub use config::{AlignmentConfig, EngineConfig, ExecutionConfig, LexiconConfig};
pub use corpus::{ReferenceCorpus, TargetCorpus};
pub use errors::{ConfigError, ConfigResult, PipelineError, PipelineResult};
pub use graph::{GraphNode, NodeFeatures, NodeGraph, NodeGraphBuilder, NodeId, NodeType};
pub use oracle::{SurfaceOracle, TagRequest, TaggingOracle};
pub use pipeline::{PipelineRun, StructurePipeline, VerseOutcome};
pub use validate::{FindingKind, IntegrityFinding, IntegrityValidator};
