//! Scriptable test-double tools used by integration tests to exercise the
//! executor's timeout, cache, and parallel-safety discipline without a
//! live LLM backend or filesystem.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::ToolExecResult;
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Echoes its `text` argument back unchanged.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo the given text back."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([("text".to_string(), ArgType::String)])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["text".to_string()]
    }

    fn parallel_safe(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        _ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let text = args.get("text").and_then(Value::as_str).unwrap_or("");
        Ok(ToolResponse::message(text.to_string()))
    }
}

/// Sleeps a fixed duration regardless of arguments, named and gated at
/// construction so one type can stand in for either a timeout probe
/// (`"sleep"`, unsafe) or a read-only parallel probe (`"memory"`-shaped).
pub struct SleepTool {
    name: String,
    duration: Duration,
    parallel_safe: bool,
}

impl SleepTool {
    /// Build a named sleeper. `parallel_safe` controls whether batches
    /// containing it may run concurrently.
    #[must_use]
    pub fn new(name: impl Into<String>, duration: Duration, parallel_safe: bool) -> Self {
        Self {
            name: name.into(),
            duration,
            parallel_safe,
        }
    }
}

#[async_trait]
impl Tool for SleepTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Sleep for a fixed duration; for exercising timeout and parallel-safety behavior."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::new()
    }

    fn required_args(&self) -> Vec<String> {
        Vec::new()
    }

    fn parallel_safe(&self) -> bool {
        self.parallel_safe
    }

    async fn execute(
        &self,
        _args: &Map<String, Value>,
        _ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        tokio::time::sleep(self.duration).await;
        Ok(ToolResponse::message(format!(
            "slept {}ms",
            self.duration.as_millis()
        )))
    }
}

/// Increments a process-wide counter once per `execute` call, regardless of
/// how many times the same canonical args key is cached — used to prove
/// `should_cache` collapses repeats into one execution.
pub struct CounterTool {
    count: Arc<AtomicU64>,
}

impl CounterTool {
    /// Build a counter tool backed by a fresh atomic counter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current counter value, for test assertions.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// A shared handle to the underlying counter, so callers can keep
    /// inspecting it after moving the tool into a registry.
    #[must_use]
    pub fn count_handle(&self) -> Arc<AtomicU64> {
        self.count.clone()
    }
}

impl Default for CounterTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CounterTool {
    fn name(&self) -> &str {
        "counter"
    }

    fn description(&self) -> &str {
        "Increment a process-wide counter; for exercising cache behavior."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([("x".to_string(), ArgType::Integer)])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["x".to_string()]
    }

    fn cacheable(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        _ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let new_count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        let x = args.get("x").and_then(Value::as_i64).unwrap_or(0);
        Ok(ToolResponse::message(format!("counter={new_count} x={x}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn counter_increments_each_execute_call() {
        let tool = CounterTool::new();
        let ctx = ToolContext::new(std::env::temp_dir());
        let args = json!({"x": 1}).as_object().unwrap().clone();
        tool.execute(&args, &ctx).await.unwrap();
        tool.execute(&args, &ctx).await.unwrap();
        assert_eq!(tool.count(), 2);
    }

    #[tokio::test]
    async fn sleep_tool_sleeps_for_configured_duration() {
        let tool = SleepTool::new("sleep", Duration::from_millis(10), false);
        let ctx = ToolContext::new(std::env::temp_dir());
        let started = std::time::Instant::now();
        tool.execute(&Map::new(), &ctx).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(10));
    }
}
