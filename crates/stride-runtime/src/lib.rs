//! # stride-runtime
//!
//! The adaptive step executor and run loop.
//!
//! - **Planner**: trait seam to the decision-making model, yielding next actions or
//!   a final answer, given the transcript so far
//! - **Step executor**: one step of the loop: token accounting, model
//!   promotion, planning, tool dispatch, failure recovery
//! - **Runner**: drives `step()` under iteration, deadline, and cancellation
//!   limits; the executor itself is timer-free
//! - **Event emitter**: broadcast channel for [`stride_core::events::RunEvent`]
//!
//! ## Crate Position
//!
//! Aggregation layer. Depends on: stride-core, stride-llm, stride-tools.

#![deny(unsafe_code)]

pub mod emitter;
pub mod errors;
pub mod planner;
pub mod runner;
pub mod step;

// Re-export main public API
pub use emitter::EventEmitter;
pub use errors::{RuntimeError, StopReason};
pub use planner::{Plan, PlanError, Planner, StepInputs};
pub use runner::{RunResult, Runner, RunnerConfig};
pub use step::executor::{ExecutorOpts, StepExecutor, StepOutcome};
pub use step::recovery::ParseRecovery;
pub use step::trim::TrimPolicy;
