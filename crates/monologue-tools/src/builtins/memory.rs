//! A facade over the vector-memory subsystem, which lives outside the core
//! runtime's scope. `search` is treated as read-only and parallel-safe;
//! `store` is a write and runs sequentially.

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::{ToolError, ToolExecResult};
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Facade tool for memory search/store operations.
pub struct MemoryTool;

fn action(args: &Map<String, Value>) -> Option<&str> {
    args.get("action").and_then(Value::as_str)
}

#[async_trait]
impl Tool for MemoryTool {
    fn name(&self) -> &str {
        "memory"
    }

    fn description(&self) -> &str {
        "Search or store entries in the agent's memory subsystem. action: \"search\" or \"store\"."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([
            ("action".to_string(), ArgType::String),
            ("text".to_string(), ArgType::String),
        ])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["action".to_string()]
    }

    fn cacheable(&self) -> bool {
        true
    }

    fn parallel_safe(&self) -> bool {
        true
    }

    fn should_cache(&self, args: &Map<String, Value>) -> bool {
        action(args) == Some("search")
    }

    fn is_parallel_safe(&self, args: &Map<String, Value>) -> bool {
        action(args) == Some("search")
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        _ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let action = action(args)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'action'".to_string()))?;
        let text = args.get("text").and_then(Value::as_str).unwrap_or("");
        let message = match action {
            "search" => format!("[memory search] no stored entries match {text:?}"),
            "store" => format!("[memory store] recorded {text:?}"),
            other => {
                return Err(ToolError::InvalidArguments(format!(
                    "unknown memory action '{other}'"
                )))
            }
        };
        Ok(ToolResponse::message(message))
    }
}
