use thiserror::Error;

/// Rejected context size input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextSizeError {
    #[error("context size must be non-negative, got {0}")]
    Negative(i64),

    #[error("unrecognized context size {0:?} (expected a line count or \"all\")")]
    Unrecognized(String),
}
