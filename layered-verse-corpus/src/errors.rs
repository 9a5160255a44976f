use layered_verse::VerseRef;
use layered_verse_align::AlignError;
use layered_verse_structure::StructureError;
use thiserror::Error;

/// Errors in engine configuration. All of them surface before any verse is
/// processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {message}")]
    Parse { message: String },

    #[error("invalid alignment settings: {0}")]
    Alignment(#[from] AlignError),

    #[error("invalid structure settings: {0}")]
    Structure(#[from] StructureError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("tagging oracle failed: {message}")]
    Tagging { message: String },

    #[error("duplicate verse {reference} in {corpus} corpus")]
    DuplicateVerse { reference: VerseRef, corpus: &'static str },

    #[error("failed to export node graph: {message}")]
    Export { message: String },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
