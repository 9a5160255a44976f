use thiserror::Error;

/// Errors raised while building structure or its configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructureError {
    /// The transplanter only accepts exact, order-preserving alignments.
    #[error("alignment is not a bijection ({matched} of {target_len} target words matched, reference has {reference_len})")]
    NotBijective {
        matched: usize,
        target_len: usize,
        reference_len: usize,
    },

    #[error("confidence for rule {rule} must be within [0, 1], got {value}")]
    InvalidConfidence { rule: String, value: f64 },

    #[error("unknown rule name: {name}")]
    UnknownRule { name: String },

    #[error("confidence table has no entry for rule {rule}")]
    MissingRule { rule: String },

    #[error("unknown clause type: {name}")]
    UnknownClauseType { name: String },

    #[error("major punctuation set must not be empty")]
    EmptyPunctuation,

    #[error("failed to (de)serialize confidence table: {message}")]
    Ron { message: String },
}

pub type StructureResult<T> = Result<T, StructureError>;
