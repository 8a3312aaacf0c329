//! Built-in tool implementations and registry for the monologue agent runtime.
//!
//! [`Tool`] is the capability every tool implements; [`ToolRegistry`] looks
//! them up by name. [`builtins`] holds the production set (terminal
//! response, subordinate dispatch, memory/ingest facades, a shell facade);
//! [`testing`] holds scriptable doubles used by the runtime's own test suite.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod builtins;
mod context;
mod error;
mod normalize;
mod registry;
mod schema;
pub mod testing;
mod tool;

pub use builtins::{
    KnowledgeImportTool, MemoryTool, ResponseTool, ShellTool, TaskDoneTool, TaskTool,
};
pub use context::{SubAgentRequest, SubAgentResult, SubAgentSpawner, ToolContext};
pub use error::{ToolError, ToolExecResult};
pub use normalize::{normalize_args, truncate_output, MAX_OUTPUT_CHARS};
pub use registry::{ToolRegistry, ToolSchema};
pub use schema::{ArgSchema, ArgType};
pub use tool::Tool;

/// Build a [`ToolRegistry`] with all production built-in tools registered.
#[must_use]
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ResponseTool));
    registry.register(Box::new(TaskDoneTool));
    registry.register(Box::new(MemoryTool));
    registry.register(Box::new(KnowledgeImportTool));
    registry.register(Box::new(ShellTool));
    registry.register(Box::new(TaskTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_expected_tools() {
        let registry = default_registry();
        for name in [
            "response",
            "task_done",
            "memory",
            "knowledge_import",
            "shell",
            "task",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }
}
