//! Token accounting errors.

use thiserror::Error;

/// Errors from tokenizer loading and transcript accounting.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The tokenizer file could not be loaded.
    #[error("failed to load tokenizer: {0}")]
    Load(String),

    /// The tracker was handed a transcript shorter than what it has already
    /// counted. Counts would be double-applied or lost, so this is a loud
    /// failure instead of a silent miscount.
    #[error(
        "token accounting out of sync: {counted} steps already counted but transcript has {seen}"
    )]
    OutOfSync {
        /// Steps the tracker has already accounted for.
        counted: usize,
        /// Steps in the transcript it was handed.
        seen: usize,
    },
}

/// Convenience alias for token accounting results.
pub type Result<T> = std::result::Result<T, TokenError>;
