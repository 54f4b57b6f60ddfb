//! The append-only run transcript.
//!
//! A [`Transcript`] is the ordered history of (action, observation) pairs
//! for one run. Entries are appended as tools execute and never mutated in
//! place; the token tracker in `stride-llm` relies on this to count
//! incrementally instead of re-tokenizing the whole history every step.

use serde::{Deserialize, Serialize};

use crate::action::AgentAction;

/// One completed (action, observation) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// The action the planner proposed.
    pub action: AgentAction,
    /// The result text the tool (or the error path) produced.
    pub observation: String,
}

impl Step {
    /// Create a step from an action and its observation.
    pub fn new(action: AgentAction, observation: impl Into<String>) -> Self {
        Self {
            action,
            observation: observation.into(),
        }
    }
}

/// Ordered history of one run. Append-only; grows monotonically until the
/// run ends. One transcript belongs to exactly one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    steps: Vec<Step>,
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Steps are never removed or reordered.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// All steps, in append order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the transcript has no steps yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The most recently appended step, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
