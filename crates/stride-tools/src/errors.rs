//! Tool errors.
//!
//! These never escape the step executor: whatever a tool fails with is
//! rendered to text and appended to the transcript as the observation.

use thiserror::Error;

/// Errors a tool run can produce.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The input did not match what the tool expects.
    #[error("invalid tool input: {0}")]
    InvalidInput(String),

    /// The tool ran and failed (I/O, subprocess, remote call).
    #[error("{0}")]
    Execution(String),

    /// The run's cancellation token fired while the tool was working.
    #[error("operation cancelled")]
    Cancelled,
}
