use linediff_seq::ContextSizeError;
use thiserror::Error;

/// Rejected option input, reported where options enter a session.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid context: {0}")]
    Context(#[from] ContextSizeError),

    #[error("invalid options document: {0}")]
    Document(#[from] serde_json::Error),
}
