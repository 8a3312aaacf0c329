//! The subordinate-dispatch facade: hands a task description to the
//! runtime-installed [`SubAgentSpawner`](crate::SubAgentSpawner), runs it
//! to completion, and folds its terminal text back as this call's result.

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::{SubAgentRequest, ToolContext};
use crate::error::{ToolError, ToolExecResult};
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Spawns a subordinate agent to carry out a delegated task.
pub struct TaskTool;

#[async_trait]
impl Tool for TaskTool {
    fn name(&self) -> &str {
        "task"
    }

    fn description(&self) -> &str {
        "Delegate a sub-task to a subordinate agent and return its final answer."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([("task".to_string(), ArgType::String)])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["task".to_string()]
    }

    fn parallel_safe(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let task = args
            .get("task")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'task'".to_string()))?;

        let spawner = ctx.subagent_spawner().await.ok_or_else(|| {
            ToolError::ExecutionFailed("no subordinate spawner configured".to_string())
        })?;

        let result = spawner
            .spawn(SubAgentRequest {
                task: task.to_string(),
            })
            .await;
        Ok(ToolResponse::message(result.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{SubAgentResult, SubAgentSpawner};
    use serde_json::json;
    use std::sync::Arc;

    struct EchoSpawner;

    #[async_trait]
    impl SubAgentSpawner for EchoSpawner {
        async fn spawn(&self, request: SubAgentRequest) -> SubAgentResult {
            SubAgentResult {
                text: format!("did: {}", request.task),
            }
        }
    }

    #[tokio::test]
    async fn delegates_to_installed_spawner() {
        let tool = TaskTool;
        let ctx = ToolContext::new(std::env::temp_dir());
        ctx.set_subagent_spawner(Some(Arc::new(EchoSpawner))).await;
        let args = json!({"task": "find the bug"}).as_object().unwrap().clone();
        let response = tool.execute(&args, &ctx).await.unwrap();
        assert_eq!(response.message, "did: find the bug");
    }

    #[tokio::test]
    async fn fails_without_a_spawner_installed() {
        let tool = TaskTool;
        let ctx = ToolContext::new(std::env::temp_dir());
        let args = json!({"task": "x"}).as_object().unwrap().clone();
        assert!(tool.execute(&args, &ctx).await.is_err());
    }
}
