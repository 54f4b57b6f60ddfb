//! The planner seam.
//!
//! A [`Planner`] is the decision-making side of the agent: given the
//! prepared transcript, the step inputs, and the currently active model, it
//! produces either a final answer or one or more tool actions. Malformed
//! model output is a tagged error variant, not an exception path, so the step
//! executor branches on it explicitly.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use stride_core::action::{AgentAction, AgentFinish};
use stride_core::transcript::Step;
use stride_llm::ModelConfig;

/// Free-form inputs for one run (question text, variables, etc).
pub type StepInputs = serde_json::Map<String, Value>;

/// The outcome of one planning call.
#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    /// The run is done; return this answer.
    Finish(AgentFinish),
    /// Execute these actions, in order, then plan again.
    Act(Vec<AgentAction>),
}

/// Planning failures.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The model's output could not be parsed into a finish or actions.
    /// Recoverable: the step executor applies the configured recovery
    /// policy.
    #[error("could not parse model output: {raw}")]
    MalformedOutput {
        /// The raw model text that failed to parse.
        raw: String,
    },

    /// Any other planning failure (provider error, prompt construction).
    /// Fatal: propagates to the caller.
    #[error("planner failed: {0}")]
    Other(String),
}

/// Produces the next plan for a run.
///
/// Implementations own prompt construction and output parsing for a
/// concrete model provider. The active model is passed in per call; the
/// planner holds no tier state of its own (the run's `ModelSlot` does).
#[async_trait]
pub trait Planner: Send + Sync {
    /// Plan the next move given the prepared transcript and inputs.
    async fn plan(
        &self,
        transcript: &[Step],
        inputs: &StepInputs,
        model: &ModelConfig,
    ) -> Result<Plan, PlanError>;
}
