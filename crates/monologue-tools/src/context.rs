//! Shared context handed to every tool call.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// A request to run a subordinate agent to completion, made by the
/// subordinate-dispatch tool.
#[derive(Debug, Clone)]
pub struct SubAgentRequest {
    /// Task description / system-prompt override text for the subordinate.
    pub task: String,
}

/// The subordinate's final result once its monologue terminates.
#[derive(Debug, Clone)]
pub struct SubAgentResult {
    /// Final text returned by the subordinate's terminal tool.
    pub text: String,
}

/// Implemented by the runtime; lets the subordinate-dispatch tool spawn and
/// drive a subordinate agent without the tools crate depending on the
/// scheduler.
#[async_trait]
pub trait SubAgentSpawner: Send + Sync {
    /// Spawn a subordinate agent, run its monologue to completion, and
    /// return its terminal text.
    async fn spawn(&self, request: SubAgentRequest) -> SubAgentResult;
}

/// Shared, per-agent state available to every tool invocation.
pub struct ToolContext {
    /// Workspace root, for tools that touch the filesystem.
    pub workspace_root: PathBuf,
    /// Current working directory, shared across calls on the same agent.
    pub cwd: Arc<RwLock<PathBuf>>,
    /// Subordinate spawner, installed by the runtime before each turn and
    /// cleared after; only the subordinate-dispatch tool reads it.
    subagent_spawner: RwLock<Option<Arc<dyn SubAgentSpawner>>>,
}

impl ToolContext {
    /// Create a new context rooted at `workspace_root`.
    #[must_use]
    pub fn new(workspace_root: PathBuf) -> Self {
        let cwd = Arc::new(RwLock::new(workspace_root.clone()));
        Self {
            workspace_root,
            cwd,
            subagent_spawner: RwLock::new(None),
        }
    }

    /// Create a context that shares `cwd` with a sibling context (same
    /// agent, different turn) but owns its own spawner slot.
    #[must_use]
    pub fn with_shared_cwd(workspace_root: PathBuf, cwd: Arc<RwLock<PathBuf>>) -> Self {
        Self {
            workspace_root,
            cwd,
            subagent_spawner: RwLock::new(None),
        }
    }

    /// Install the subordinate spawner for this turn.
    pub async fn set_subagent_spawner(&self, spawner: Option<Arc<dyn SubAgentSpawner>>) {
        *self.subagent_spawner.write().await = spawner;
    }

    /// Fetch the subordinate spawner, if one is installed.
    pub async fn subagent_spawner(&self) -> Option<Arc<dyn SubAgentSpawner>> {
        self.subagent_spawner.read().await.clone()
    }
}
