//! Agent actions and final answers.
//!
//! A planning call produces either one or more [`AgentAction`]s (tool calls
//! to execute) or an [`AgentFinish`] (the run's final answer). Both carry the
//! raw model text (`log`) that produced them, so the full reasoning trail is
//! reconstructable from the transcript alone.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A proposed tool invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAction {
    /// Name of the tool the model wants to run.
    pub tool: String,
    /// Free-form tool input. A bare string for simple tools, a JSON object
    /// for tools with structured parameters.
    pub tool_input: Value,
    /// Raw model text (reasoning + the emitted call) behind this action.
    pub log: String,
}

impl AgentAction {
    /// Create an action with a plain-text input.
    pub fn new(
        tool: impl Into<String>,
        tool_input: impl Into<Value>,
        log: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            tool_input: tool_input.into(),
            log: log.into(),
        }
    }

    /// The tool input rendered as text (used for prompts and token counts).
    #[must_use]
    pub fn input_text(&self) -> String {
        render_input(&self.tool_input)
    }
}

/// The run's final answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentFinish {
    /// The answer returned to the caller.
    pub output: String,
    /// Raw model text behind this answer.
    pub log: String,
}

impl AgentFinish {
    /// Create a final answer.
    pub fn new(output: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            log: log.into(),
        }
    }
}

/// Render a tool input value as text.
///
/// Bare strings render without JSON quoting; everything else renders as
/// compact JSON. Token accounting and prompt construction both go through
/// this so the two always agree.
#[must_use]
pub fn render_input(input: &Value) -> String {
    match input {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_with_string_input() {
        let action = AgentAction::new("search", "rust agents", "I should search.");
        assert_eq!(action.tool, "search");
        assert_eq!(action.input_text(), "rust agents");
    }

    #[test]
    fn action_with_structured_input() {
        let action = AgentAction::new("query", json!({"sql": "SELECT 1"}), "");
        assert_eq!(action.input_text(), r#"{"sql":"SELECT 1"}"#);
    }

    #[test]
    fn render_input_string_is_unquoted() {
        assert_eq!(render_input(&json!("plain")), "plain");
        assert_eq!(render_input(&json!(42)), "42");
        assert_eq!(render_input(&json!(null)), "null");
    }

    #[test]
    fn action_serde_roundtrip() {
        let action = AgentAction::new("calc", json!({"expr": "1+1"}), "thinking");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["tool"], "calc");
        assert_eq!(json["toolInput"]["expr"], "1+1");
        let back: AgentAction = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn finish_serde_roundtrip() {
        let finish = AgentFinish::new("42", "Final Answer: 42");
        let json = serde_json::to_value(&finish).unwrap();
        assert_eq!(json["output"], "42");
        let back: AgentFinish = serde_json::from_value(json).unwrap();
        assert_eq!(back, finish);
    }
}
