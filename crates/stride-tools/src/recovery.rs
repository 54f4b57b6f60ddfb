//! Built-in passthrough tool for parse recovery.
//!
//! When a planning call produces unparsable output and the recovery policy
//! is non-fatal, the step executor fabricates a single action tagged with
//! [`PARSE_RECOVERY_TOOL`] and runs it through [`PassthroughTool`], which
//! returns its input untouched. The parse failure thereby becomes a normal
//! transcript entry the model can see and correct on the next step.

use async_trait::async_trait;
use serde_json::Value;

use stride_core::action::render_input;

use crate::errors::ToolError;
use crate::traits::{Tool, ToolContext};

/// Reserved name tagging synthetic parse-recovery actions in a transcript.
pub const PARSE_RECOVERY_TOOL: &str = "_parse_recovery";

/// Returns its input unchanged as the observation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughTool;

#[async_trait]
impl Tool for PassthroughTool {
    fn name(&self) -> &str {
        PARSE_RECOVERY_TOOL
    }

    fn description(&self) -> &str {
        "Internal passthrough used to surface planning errors in the transcript"
    }

    async fn run(&self, input: &Value, _ctx: &ToolContext) -> Result<String, ToolError> {
        Ok(render_input(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn echoes_string_input() {
        let ctx = ToolContext::new("run-1");
        let out = PassthroughTool.run(&json!("the raw error"), &ctx).await.unwrap();
        assert_eq!(out, "the raw error");
    }

    #[tokio::test]
    async fn renders_structured_input() {
        let ctx = ToolContext::new("run-1");
        let out = PassthroughTool.run(&json!({"k": 1}), &ctx).await.unwrap();
        assert_eq!(out, r#"{"k":1}"#);
    }

    #[test]
    fn reserved_name() {
        assert_eq!(PassthroughTool.name(), PARSE_RECOVERY_TOOL);
    }
}
