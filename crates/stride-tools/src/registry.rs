//! Name → tool lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::traits::Tool;

/// The set of tools available to a run.
///
/// Built once before the run starts and never mutated during it. Lookup is
/// by exact name; a miss is a recoverable condition the step executor turns
/// into an invalid-tool observation.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name. A tool registered twice replaces
    /// the earlier entry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let _ = self.tools.insert(tool.name().to_owned(), tool);
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Whether a tool with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All registered tool names, sorted for stable output.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Observation text for an action naming an unregistered tool.
///
/// Includes the requested name and every valid name so the model can
/// self-correct on its next planning call.
#[must_use]
pub fn invalid_tool_observation(requested: &str, valid: &[String]) -> String {
    format!(
        "'{requested}' is not a valid tool. Valid tools: [{}].",
        valid.join(", ")
    )
}
