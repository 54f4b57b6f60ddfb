//! Lifecycle events for agent runs.
//!
//! [`RunEvent`]s are broadcast by the runtime as a run progresses: run
//! boundaries, step boundaries, tool execution, model promotion, and parse
//! recovery. They are transient observability signals; nothing in the core
//! loop depends on anyone listening.

use serde::{Deserialize, Serialize};

/// Fields common to every run event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEvent {
    /// Run this event belongs to.
    pub run_id: String,
    /// ISO 8601 timestamp.
    pub timestamp: String,
}

impl BaseEvent {
    /// Create a base event stamped with the current time.
    pub fn now(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Events emitted over the lifetime of one agent run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RunEvent {
    /// A run started.
    RunStarted {
        /// Common fields.
        base: BaseEvent,
    },

    /// A step began (before planning).
    StepStarted {
        /// Common fields.
        base: BaseEvent,
        /// 1-based step number within the run.
        iteration: u32,
    },

    /// A tool is about to execute.
    ToolExecutionStart {
        /// Common fields.
        base: BaseEvent,
        /// Tool name.
        tool: String,
    },

    /// A tool finished executing.
    ToolExecutionEnd {
        /// Common fields.
        base: BaseEvent,
        /// Tool name.
        tool: String,
        /// Whether the tool itself failed (the failure text became the
        /// observation).
        is_error: bool,
        /// Wall-clock duration in milliseconds.
        duration_ms: u64,
    },

    /// The planner requested a tool that is not registered.
    InvalidToolRequested {
        /// Common fields.
        base: BaseEvent,
        /// The tool name the planner asked for.
        tool: String,
    },

    /// The active model was promoted from the short-context to the
    /// long-context tier. Emitted at most once per run.
    ModelPromoted {
        /// Common fields.
        base: BaseEvent,
        /// Model the run started on.
        from: String,
        /// Model the run continues on.
        to: String,
        /// Running token count that crossed the threshold.
        used_tokens: u64,
        /// The configured switch threshold.
        threshold: u64,
    },

    /// A malformed planning output was converted into a transcript entry.
    ParseRecovered {
        /// Common fields.
        base: BaseEvent,
    },

    /// The run ended, either with a final answer or at a limit.
    RunCompleted {
        /// Common fields.
        base: BaseEvent,
        /// Why the run stopped (serialized `StopReason`).
        stop_reason: String,
        /// Steps executed.
        iterations: u32,
    },
}

impl RunEvent {
    /// The common fields of this event.
    #[must_use]
    pub fn base(&self) -> &BaseEvent {
        match self {
            Self::RunStarted { base }
            | Self::StepStarted { base, .. }
            | Self::ToolExecutionStart { base, .. }
            | Self::ToolExecutionEnd { base, .. }
            | Self::InvalidToolRequested { base, .. }
            | Self::ModelPromoted { base, .. }
            | Self::ParseRecovered { base }
            | Self::RunCompleted { base, .. } => base,
        }
    }

    /// The run this event belongs to.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.base().run_id
    }

    /// Stable snake_case event name (matches the serialized `type` tag).
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "run_started",
            Self::StepStarted { .. } => "step_started",
            Self::ToolExecutionStart { .. } => "tool_execution_start",
            Self::ToolExecutionEnd { .. } => "tool_execution_end",
            Self::InvalidToolRequested { .. } => "invalid_tool_requested",
            Self::ModelPromoted { .. } => "model_promoted",
            Self::ParseRecovered { .. } => "parse_recovered",
            Self::RunCompleted { .. } => "run_completed",
        }
    }
}
