//! # stride-core
//!
//! Foundation types for the stride agent runtime.
//!
//! This crate provides the shared vocabulary the other stride crates depend on:
//!
//! - **Actions**: [`action::AgentAction`] (a proposed tool call) and
//!   [`action::AgentFinish`] (a final answer)
//! - **Transcript**: [`transcript::Step`] pairs and the append-only
//!   [`transcript::Transcript`] history of one run
//! - **Events**: [`events::RunEvent`] lifecycle events broadcast during a run
//! - **Logging**: [`logging::init_tracing`] subscriber setup
//! - **Text**: [`text::log_preview`] UTF-8-safe truncation for log output
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other stride crates.

#![deny(unsafe_code)]

pub mod action;
pub mod events;
pub mod logging;
pub mod text;
pub mod transcript;

pub use action::{AgentAction, AgentFinish, render_input};
pub use transcript::{Step, Transcript};
