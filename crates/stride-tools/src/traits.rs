//! The tool trait and per-run execution context.

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::errors::ToolError;

/// Per-run context handed to every tool invocation.
#[derive(Clone, Debug)]
pub struct ToolContext {
    /// The run this invocation belongs to.
    pub run_id: String,
    /// Cooperative cancellation signal. Long-running tools should check it;
    /// the runtime itself stops between steps, not mid-tool.
    pub cancellation: CancellationToken,
}

impl ToolContext {
    /// Create a context with a fresh cancellation token.
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            cancellation: CancellationToken::new(),
        }
    }
}

/// A named capability the planner can invoke.
///
/// `run` takes a free-form JSON input and produces observation text. Errors
/// are surfaced to the model as observation text by the step executor, so a
/// failing tool never terminates a run.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name the planner refers to.
    fn name(&self) -> &str;

    /// Short human-readable description (used in listings and logs).
    fn description(&self) -> &str {
        ""
    }

    /// Execute the tool against `input`, returning the observation text.
    async fn run(&self, input: &Value, ctx: &ToolContext) -> Result<String, ToolError>;
}
