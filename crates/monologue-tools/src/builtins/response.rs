//! The terminal response tool: the root agent's only way to end a monologue.

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::{ToolError, ToolExecResult};
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Delivers the agent's final answer and ends the monologue.
pub struct ResponseTool;

#[async_trait]
impl Tool for ResponseTool {
    fn name(&self) -> &str {
        "response"
    }

    fn description(&self) -> &str {
        "Deliver the final answer to the user and end the monologue."
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
        let tool = ResponseTool;
        let ctx = ToolContext::new(std::env::temp_dir());
        let args = json!({"text": "4"}).as_object().unwrap().clone();
        let response = tool.execute(&args, &ctx).await.unwrap();
        assert_eq!(response.message, "4");
        assert!(response.break_loop);
    }
}
