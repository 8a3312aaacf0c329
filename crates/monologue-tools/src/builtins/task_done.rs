//! The subordinate-loop terminal tool: identical shape to [`crate::ResponseTool`]
//! but named distinctly so a subordinate's system prompt can instruct it
//! specifically, per the root/subordinate split in the design.

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::{ToolError, ToolExecResult};
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Delivers a subordinate agent's final answer and ends its monologue.
pub struct TaskDoneTool;

#[async_trait]
impl Tool for TaskDoneTool {
    fn name(&self) -> &str {
        "task_done"
    }

    fn description(&self) -> &str {
        "Deliver the result of the delegated task and end this subordinate's monologue."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([("text".to_string(), ArgType::String)])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["text".to_string()]
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        _ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let text = args
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'text'".to_string()))?;
        Ok(ToolResponse::terminal(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_terminal_response_with_text() {
        let tool = TaskDoneTool;
        let ctx = ToolContext::new(std::env::temp_dir());
        let args = json!({"text": "done"}).as_object().unwrap().clone();
        let response = tool.execute(&args, &ctx).await.unwrap();
        assert_eq!(response.message, "done");
        assert!(response.break_loop);
    }
}
