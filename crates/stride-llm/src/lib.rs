//! # stride-llm
//!
//! Model-side concerns for the stride agent runtime:
//!
//! - **Model tiers**: [`model::ModelPair`] (short/long-context configs plus a
//!   switch threshold) and [`model::ModelSlot`], the one-directional
//!   promotion cell a run owns.
//! - **Tokenizer**: the [`tokenizer::Tokenizer`] counting trait, a
//!   HuggingFace-backed implementation, and a byte-estimate fallback.
//! - **Token accounting**: [`tokens::TranscriptTracker`], the incremental
//!   running count over a run's transcript.
//!
//! ## Crate Position
//!
//! Depends on: stride-core. Depended on by: stride-runtime.

#![deny(unsafe_code)]

pub mod model;
pub mod tokenizer;
pub mod tokens;

pub use model::{ModelConfig, ModelPair, ModelSlot, ModelTier};
pub use tokenizer::{CHARS_PER_TOKEN, HeuristicTokenizer, HfTokenizer, Tokenizer};
pub use tokens::{Result, TokenError, TranscriptTracker};
