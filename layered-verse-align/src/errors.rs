use thiserror::Error;

/// Errors raised by the alignment layer.
///
/// Poor or empty alignments are not errors; they are ordinary
/// [`AlignmentRecord`](crate::AlignmentRecord) values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    /// The classification threshold is not a finite value in `[0, 1]`.
    #[error("inferred threshold must be within [0, 1], got {value}")]
    InvalidThreshold { value: f64 },

    /// A mapped reference position does not exist.
    #[error("target position {target} maps to reference position {reference}, but the reference has {reference_len} tokens")]
    OutOfRange {
        target: usize,
        reference: usize,
        reference_len: usize,
    },

    /// Matched pairs cross or share a reference position.
    #[error("alignment is not monotonic at target position {target}")]
    NotMonotonic { target: usize },
}

pub type AlignResult<T> = Result<T, AlignError>;
