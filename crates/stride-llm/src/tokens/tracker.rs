//! Running token count over a run's transcript.
//!
//! Re-tokenizing the whole transcript before every planning call is O(n) per
//! step. [`TranscriptTracker`] instead seeds itself with the base prompt's
//! count and tokenizes only the steps appended since its last call, keeping
//! the per-step cost proportional to the new material.
//!
//! The tracker keeps a high-water mark of how many steps it has counted, so
//! it tolerates several appends between calls (all new steps are counted, in
//! append order) and repeated calls with nothing new (idempotent). A
//! transcript *shorter* than the mark means the caller replayed or swapped
//! transcripts; that fails loudly rather than miscounting.
//!
//! One tracker belongs to exactly one run and is not safe to share across
//! concurrent runs.

use std::sync::Arc;

use tracing::debug;

use stride_core::transcript::{Step, Transcript};

use super::errors::{Result, TokenError};
use crate::tokenizer::Tokenizer;

/// Incremental token accounting for one run.
pub struct TranscriptTracker {
    tokenizer: Arc<dyn Tokenizer>,
    /// Tokens in the initial prompt template, counted once at construction.
    base_tokens: u64,
    /// Base plus every counted step. Monotonically non-decreasing.
    total_tokens: u64,
    /// High-water mark: number of transcript steps already counted.
    counted_steps: usize,
}

impl TranscriptTracker {
    /// Create a tracker seeded with the base prompt's token count.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, base_prompt: &str) -> Self {
        let base_tokens = tokenizer.count_tokens(base_prompt);
        Self {
            tokenizer,
            base_tokens,
            total_tokens: base_tokens,
            counted_steps: 0,
        }
    }

    /// Tokens in the base prompt.
    #[must_use]
    pub fn base_tokens(&self) -> u64 {
        self.base_tokens
    }

    /// Current running total (base + all counted steps).
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Number of transcript steps already counted.
    #[must_use]
    pub fn counted_steps(&self) -> usize {
        self.counted_steps
    }

    /// Bring the running total up to date with `transcript` and return it.
    ///
    /// Counts every step past the high-water mark, in append order. Calling
    /// with no new steps returns the cached total unchanged. Errors with
    /// [`TokenError::OutOfSync`] if the transcript has fewer steps than have
    /// already been counted.
    pub fn record(&mut self, transcript: &Transcript) -> Result<u64> {
        let seen = transcript.len();
        if seen < self.counted_steps {
            return Err(TokenError::OutOfSync {
                counted: self.counted_steps,
                seen,
            });
        }
        for step in &transcript.steps()[self.counted_steps..] {
            let tokens = self.step_tokens(step);
            self.total_tokens += tokens;
            debug!(tool = %step.action.tool, tokens, total = self.total_tokens, "step counted");
        }
        self.counted_steps = seen;
        Ok(self.total_tokens)
    }

    /// Tokens one step contributes: action log + tool name + rendered input
    /// + observation.
    fn step_tokens(&self, step: &Step) -> u64 {
        self.tokenizer.count_tokens(&step.action.log)
            + self.tokenizer.count_tokens(&step.action.tool)
            + self.tokenizer.count_tokens(&step.action.input_text())
            + self.tokenizer.count_tokens(&step.observation)
    }
}
