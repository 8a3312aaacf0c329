//! The [`Tool`] trait: the capability set every built-in and external tool
//! implements.

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::ToolExecResult;
use crate::schema::ArgSchema;

/// A tool the runtime can invoke by name.
///
/// Instances are constructed once per call and hold a non-owning reference
/// to their [`crate::ToolContext`]; implementations should be cheap to
/// construct.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Canonical registry name.
    fn name(&self) -> &str;

    /// Human-readable description, used in the tool catalog and system prompt.
    fn description(&self) -> &str;

    /// Expected type per argument field.
    fn arg_schema(&self) -> ArgSchema;

    /// Argument names that must be present (order is documentation-only).
    fn required_args(&self) -> Vec<String>;

    /// Per-tool timeout override, in seconds. `None` defers to the global default.
    fn timeout_seconds(&self) -> Option<f64> {
        None
    }

    /// Static cacheability declaration; [`Tool::should_cache`] may refine it per call.
    fn cacheable(&self) -> bool {
        false
    }

    /// Static parallel-safety declaration; [`Tool::is_parallel_safe`] may refine it per call.
    fn parallel_safe(&self) -> bool {
        false
    }

    /// Run before `execute`; may validate or mutate shared state. Failing
    /// here short-circuits the call to an error `ToolResponse`.
    async fn before(&self, _args: &Map<String, Value>, _ctx: &ToolContext) -> ToolExecResult<()> {
        Ok(())
    }

    /// Perform the tool's effect and produce its result.
    async fn execute(
        &self,
        args: &Map<String, Value>,
        ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse>;

    /// Run after `execute`; may post-process the response (e.g. truncate).
    async fn after(&self, response: ToolResponse) -> ToolExecResult<ToolResponse> {
        Ok(response)
    }

    /// Dynamic refinement of [`Tool::cacheable`] for a specific call's arguments.
    fn should_cache(&self, _args: &Map<String, Value>) -> bool {
        self.cacheable()
    }

    /// Dynamic refinement of [`Tool::parallel_safe`] for a specific call's arguments.
    fn is_parallel_safe(&self, _args: &Map<String, Value>) -> bool {
        self.parallel_safe()
    }
}
