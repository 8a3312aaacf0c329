//! Concurrent tool execution with caching, timeouts, and hook dispatch
//! (C5 in the design doc this crate implements).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::debug;

use monologue_config::RuntimeConfig;
use monologue_core::{canonical_json, ToolCall, ToolResponse};
use monologue_hooks::HookManager;
use monologue_telemetry::{TelemetryRecorder, ToolCallMetric};
use monologue_tools::{Tool, ToolContext, ToolRegistry};

/// One entry of an [`ToolExecutor::execute_batch`] result: the call, its
/// response, and whether it was served from the cache.
pub type ExecutedCall = (ToolCall, ToolResponse, bool);

/// Runs a batch of tool calls per the executor's ordering, caching, and
/// timeout rules.
pub struct ToolExecutor {
    cache: Mutex<HashMap<String, ToolResponse>>,
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolExecutor {
    /// An executor with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Execute `calls` against `registry`, preserving input order in the
    /// returned list regardless of completion order.
    #[allow(clippy::too_many_arguments)]
    pub async fn execute_batch(
        &self,
        calls: Vec<ToolCall>,
        registry: &ToolRegistry,
        ctx: &ToolContext,
        config: &RuntimeConfig,
        hooks: &HookManager,
        telemetry: &TelemetryRecorder,
    ) -> Vec<ExecutedCall> {
        if calls.is_empty() {
            return Vec::new();
        }

        let all_parallel_safe = calls.len() > 1
            && calls.iter().all(|call| {
                registry
                    .get(&call.name)
                    .is_some_and(|tool| tool.is_parallel_safe(&call.args))
            });

        if all_parallel_safe {
            let futures = calls
                .into_iter()
                .map(|call| self.execute_one(call, registry, ctx, config, hooks, telemetry));
            join_all(futures).await
        } else {
            let mut results = Vec::new();
            for call in calls {
                results.push(
                    self.execute_one(call, registry, ctx, config, hooks, telemetry)
                        .await,
                );
            }
            results
        }
    }

    async fn execute_one(
        &self,
        call: ToolCall,
        registry: &ToolRegistry,
        ctx: &ToolContext,
        config: &RuntimeConfig,
        hooks: &HookManager,
        telemetry: &TelemetryRecorder,
    ) -> ExecutedCall {
        hooks.dispatch_tool_execute_before(&call).await;

        let Some(tool) = registry.get(&call.name) else {
            let response =
                ToolResponse::message(format!("[Tool '{}' error: unknown tool]", call.name));
            hooks.dispatch_tool_execute_after(&call, &response).await;
            return (call, response, false);
        };

        let args_key = format!(
            "{}:{}",
            call.name,
            canonical_json(&serde_json::Value::Object(call.args.clone()))
        );

        if config.cache_enabled && tool.should_cache(&call.args) {
            let cached = self
                .cache
                .lock()
                .ok()
                .and_then(|cache| cache.get(&args_key).cloned());
            if let Some(response) = cached {
                telemetry.record_tool_call(ToolCallMetric {
                    name: call.name.clone(),
                    args_key: args_key.clone(),
                    duration_ms: 0,
                    cached: true,
                    result_summary: summarize(&response.message),
                    error: infer_error(&response.message),
                });
                hooks.dispatch_tool_execute_after(&call, &response).await;
                return (call, response, true);
            }
        }

        let timeout_secs = config.resolve_timeout_secs(&call.name, tool.timeout_seconds());
        let started = Instant::now();
        let response = self.run_with_timeout(tool, &call, ctx, timeout_secs).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        telemetry.record_tool_call(ToolCallMetric {
            name: call.name.clone(),
            args_key: args_key.clone(),
            duration_ms,
            cached: false,
            result_summary: summarize(&response.message),
            error: infer_error(&response.message),
        });

        if config.cache_enabled
            && tool.should_cache(&call.args)
            && infer_error(&response.message).is_none()
        {
            if let Ok(mut cache) = self.cache.lock() {
                cache.insert(args_key, response.clone());
            }
        }

        hooks.dispatch_tool_execute_after(&call, &response).await;
        (call, response, false)
    }

    async fn run_with_timeout(
        &self,
        tool: &dyn Tool,
        call: &ToolCall,
        ctx: &ToolContext,
        timeout_secs: f64,
    ) -> ToolResponse {
        let fut = async {
            if let Err(error) = tool.before(&call.args, ctx).await {
                return ToolResponse::message(format!("[Tool '{}' error: {error}]", call.name));
            }
            let response = match tool.execute(&call.args, ctx).await {
                Ok(response) => response,
                Err(error) => {
                    return ToolResponse::message(format!("[Tool '{}' error: {error}]", call.name))
                }
            };
            match tool.after(response).await {
                Ok(response) => response,
                Err(error) => {
                    ToolResponse::message(format!("[Tool '{}' error: {error}]", call.name))
                }
            }
        };

        match tokio::time::timeout(Duration::from_secs_f64(timeout_secs.max(0.0)), fut).await {
            Ok(response) => response,
            Err(_) => {
                debug!(tool = %call.name, timeout_secs, "tool call timed out");
                ToolResponse::message(format!(
                    "[Tool '{}' timed out after {timeout_secs}s]",
                    call.name
                ))
            }
        }
    }
}

fn summarize(message: &str) -> String {
    const MAX: usize = 200;
    if message.chars().count() <= MAX {
        message.to_string()
    } else {
        let truncated: String = message.chars().take(MAX).collect();
        format!("{truncated}…")
    }
}

fn infer_error(message: &str) -> Option<String> {
    if message.starts_with("[Tool '")
        && (message.contains("timed out after") || message.contains("' error:"))
    {
        Some(message.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monologue_config::RuntimeConfig;
    use monologue_tools::testing::{CounterTool, SleepTool};
    use std::path::PathBuf;
    use std::time::Duration as StdDuration;

    fn fresh_ctx() -> ToolContext {
        ToolContext::new(PathBuf::from("."))
    }

    #[tokio::test]
    async fn preserves_input_order_regardless_of_completion_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(SleepTool::new(
            "slow",
            StdDuration::from_millis(60),
            true,
        )));
        registry.register(Box::new(SleepTool::new(
            "fast",
            StdDuration::from_millis(5),
            true,
        )));

        let calls = vec![
            ToolCall::new("slow", serde_json::Map::new()),
            ToolCall::new("fast", serde_json::Map::new()),
        ];

        let executor = ToolExecutor::new();
        let ctx = fresh_ctx();
        let config = RuntimeConfig::default();
        let hooks = HookManager::new();
        let telemetry = TelemetryRecorder::new("s1");

        let results = executor
            .execute_batch(calls, &registry, &ctx, &config, &hooks, &telemetry)
            .await;
        assert_eq!(results[0].0.name, "slow");
        assert_eq!(results[1].0.name, "fast");
    }

    #[tokio::test]
    async fn parallel_batch_finishes_close_to_the_slowest_call() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(SleepTool::new(
            "a",
            StdDuration::from_millis(100),
            true,
        )));
        registry.register(Box::new(SleepTool::new(
            "b",
            StdDuration::from_millis(100),
            true,
        )));

        let calls = vec![
            ToolCall::new("a", serde_json::Map::new()),
            ToolCall::new("b", serde_json::Map::new()),
        ];

        let executor = ToolExecutor::new();
        let ctx = fresh_ctx();
        let config = RuntimeConfig::default();
        let hooks = HookManager::new();
        let telemetry = TelemetryRecorder::new("s1");

        let started = Instant::now();
        executor
            .execute_batch(calls, &registry, &ctx, &config, &hooks, &telemetry)
            .await;
        assert!(started.elapsed() < StdDuration::from_millis(150));
    }

    #[tokio::test]
    async fn timed_out_call_produces_bracketed_message() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(SleepTool::new(
            "sleep",
            StdDuration::from_millis(50),
            false,
        )));

        let mut config = RuntimeConfig::default();
        config
            .tool_timeout_overrides
            .insert("sleep".to_string(), 0.01);

        let calls = vec![ToolCall::new("sleep", serde_json::Map::new())];
        let executor = ToolExecutor::new();
        let ctx = fresh_ctx();
        let hooks = HookManager::new();
        let telemetry = TelemetryRecorder::new("s1");

        let results = executor
            .execute_batch(calls, &registry, &ctx, &config, &hooks, &telemetry)
            .await;
        assert!(results[0].1.message.contains("timed out after 0.01s"));
    }

    #[tokio::test]
    async fn cached_call_executes_underlying_tool_once() {
        let counter = CounterTool::new();
        let count_handle = counter.count_handle();
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(counter));

        let config = RuntimeConfig::default();
        let executor = ToolExecutor::new();
        let ctx = fresh_ctx();
        let hooks = HookManager::new();
        let telemetry = TelemetryRecorder::new("s1");

        for _ in 0..3 {
            let args = serde_json::json!({"x": 1}).as_object().unwrap().clone();
            let calls = vec![ToolCall::new("counter", args)];
            executor
                .execute_batch(calls, &registry, &ctx, &config, &hooks, &telemetry)
                .await;
        }

        assert_eq!(count_handle.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
