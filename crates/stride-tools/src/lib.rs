//! # stride-tools
//!
//! The tool seam for the stride agent runtime:
//!
//! - **[`traits::Tool`]**: named capability with a free-form JSON input and
//!   a text observation result
//! - **[`registry::ToolRegistry`]**: name → tool lookup, immutable for the
//!   duration of a run
//! - **[`recovery::PassthroughTool`]**: built-in tool backing synthetic
//!   parse-recovery transcript entries
//!
//! Tool failures are values here, not control flow: a failed tool's error
//! text becomes the observation the model sees on its next planning call.
//!
//! ## Crate Position
//!
//! Depends on: stride-core. Depended on by: stride-runtime.

#![deny(unsafe_code)]

pub mod errors;
pub mod recovery;
pub mod registry;
pub mod traits;

pub use errors::ToolError;
pub use recovery::{PARSE_RECOVERY_TOOL, PassthroughTool};
pub use registry::{ToolRegistry, invalid_tool_observation};
pub use traits::{Tool, ToolContext};
