//! Incremental token accounting over a run transcript.

pub mod errors;
pub mod tracker;

pub use errors::{Result, TokenError};
pub use tracker::TranscriptTracker;
