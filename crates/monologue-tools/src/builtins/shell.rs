//! A subprocess-runtime facade, grounded on the teacher's bash tool but
//! stripped of its own timeout handling — the executor wraps every call in
//! a timeout already, so the tool itself just runs to completion or dies
//! with the process when cancelled.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::process::Command;

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::{ToolError, ToolExecResult};
use crate::normalize::truncate_output;
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Runs a shell command against the agent's persistent working directory.
pub struct ShellTool;

#[async_trait]
impl Tool for ShellTool {
    fn name(&self) -> &str {
        "shell"
    }

    fn description(&self) -> &str {
        "Execute a shell command in the agent's current working directory."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([("code".to_string(), ArgType::String)])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["code".to_string()]
    }

    fn parallel_safe(&self) -> bool {
        false
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let code = args
            .get("code")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'code'".to_string()))?;

        let cwd = ctx.cwd.read().await.clone();
        let output = Command::new("sh")
            .arg("-c")
            .arg(code)
            .current_dir(&cwd)
            .output()
            .await?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            text.push_str(&format!("\n(exit code {code})"));
        }
        Ok(ToolResponse::message(truncate_output(text)))
    }
}
