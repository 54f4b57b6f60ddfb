//! One step of the agent loop.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `executor` | The step state machine: account → promote → plan → act |
//! | `recovery` | Policies for malformed planner output |
//! | `trim` | Transcript preparation hook applied before planning |

pub mod executor;
pub mod recovery;
pub mod trim;
