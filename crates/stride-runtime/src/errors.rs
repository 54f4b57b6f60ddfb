//! Runtime errors and stop reasons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::planner::PlanError;
use stride_llm::TokenError;

/// Errors that terminate a run abnormally.
///
/// Everything the model can plausibly self-correct (unknown tool, failing
/// tool, malformed output under a non-fatal recovery policy) stays inside
/// the transcript and never surfaces here.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Malformed planner output under the hard-fail recovery policy.
    #[error("could not parse model output: {raw}")]
    MalformedOutput {
        /// The raw model text that failed to parse.
        raw: String,
    },

    /// A planner failure other than malformed output. Always fatal.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Token accounting invariant violation (see `TokenError::OutOfSync`).
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The planner produced a final answer.
    Finished,
    /// The configured iteration limit was reached first.
    MaxIterations,
    /// The configured wall-clock deadline passed first.
    DeadlineExceeded,
    /// The run's cancellation token fired.
    Cancelled,
}

impl StopReason {
    /// Stable snake_case name (matches the serialized form).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::MaxIterations => "max_iterations",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_reason_serde_matches_as_str() {
        for reason in [
            StopReason::Finished,
            StopReason::MaxIterations,
            StopReason::DeadlineExceeded,
            StopReason::Cancelled,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }

    #[test]
    fn plan_error_converts() {
        let err: RuntimeError = PlanError::Other("provider down".into()).into();
        assert!(err.to_string().contains("provider down"));
    }
}
