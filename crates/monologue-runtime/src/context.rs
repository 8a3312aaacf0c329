//! Shared session state: agents keyed by integer id, the tool cache's home
//! (the executor), the hook manager, telemetry, and the stream sink every
//! agent in the subordinate tree writes through (C7 in the design doc
//! this crate implements).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use monologue_config::RuntimeConfig;
use monologue_core::{AgentId, History, Message, ROOT_AGENT_ID};
use monologue_hooks::HookManager;
use monologue_llm::LlmClient;
use monologue_telemetry::TelemetryRecorder;
use monologue_tools::{ToolContext, ToolRegistry};

use crate::executor::ToolExecutor;
use crate::router::ModelRouter;

/// Receives one chunk of streamed model output as it arrives, tagged with
/// the agent that produced it so subordinate output interleaves into the
/// same stream as the root.
pub trait StreamSink: Send + Sync {
    /// Called once per chunk, in the exact order received from the backend.
    fn on_chunk(&self, agent_id: AgentId, chunk: &str);
}

/// One participant in a monologue session: the root agent (id 0) or a
/// subordinate spawned by the `task` tool.
///
/// Holds a non-owning back-reference conceptually to its [`AgentContext`]
/// (the context owns agents, not the other way around); interior mutability
/// on `history`/`last_tool_name` lets the scheduler mutate through a shared
/// `Arc<Agent>` without the context needing a mutable borrow per turn.
pub struct Agent {
    /// This agent's id within the context. Root is always `0`.
    pub agent_id: AgentId,
    /// The spawning agent's id, if this is a subordinate.
    pub parent: Option<AgentId>,
    /// Override text injected ahead of the tool catalog in the system
    /// prompt. Empty for the root agent.
    pub system_prompt_override: String,
    /// Tool-facing context for this agent: workspace root, shared cwd, and
    /// the subordinate spawner slot installed per turn.
    pub tool_context: ToolContext,
    history: Mutex<History>,
    last_tool_name: Mutex<Option<String>>,
}

impl Agent {
    fn root(workspace_root: PathBuf) -> Self {
        Self {
            agent_id: ROOT_AGENT_ID,
            parent: None,
            system_prompt_override: String::new(),
            tool_context: ToolContext::new(workspace_root),
            history: Mutex::new(History::new()),
            last_tool_name: Mutex::new(None),
        }
    }

    fn subordinate(
        agent_id: AgentId,
        parent: &Agent,
        system_prompt_override: impl Into<String>,
    ) -> Self {
        Self {
            agent_id,
            parent: Some(parent.agent_id),
            system_prompt_override: system_prompt_override.into(),
            tool_context: ToolContext::with_shared_cwd(
                parent.tool_context.workspace_root.clone(),
                parent.tool_context.cwd.clone(),
            ),
            history: Mutex::new(History::new()),
            last_tool_name: Mutex::new(None),
        }
    }

    /// Append a message to this agent's history.
    pub fn push_history(&self, message: Message) {
        if let Ok(mut history) = self.history.lock() {
            history.push(message);
        }
    }

    /// A snapshot of this agent's history, for prompt assembly.
    #[must_use]
    pub fn history_snapshot(&self) -> Vec<Message> {
        self.history
            .lock()
            .map(|history| history.snapshot())
            .unwrap_or_default()
    }

    /// The name of the last tool this agent's monologue executed, if any.
    #[must_use]
    pub fn last_tool_name(&self) -> Option<String> {
        self.last_tool_name
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Record the name of the most recently executed tool.
    pub fn set_last_tool_name(&self, name: Option<String>) {
        if let Ok(mut guard) = self.last_tool_name.lock() {
            *guard = name;
        }
    }
}

/// Owns every agent in a session, plus the components they share: the tool
/// registry and executor, the hook manager, the model router, telemetry,
/// and the LLM client. Lives for the lifetime of one user-facing
/// conversation, including any subordinate agents it spawns.
pub struct AgentContext {
    /// Opaque session identifier, also bound to the telemetry recorder.
    pub session_id: String,
    /// Immutable runtime configuration for this session.
    pub config: Arc<RuntimeConfig>,
    /// The LLM backend this session streams chat completions from.
    pub llm: Arc<dyn LlmClient>,
    /// Tool catalog.
    pub registry: Arc<ToolRegistry>,
    /// Concurrent tool executor, owner of the per-session tool cache.
    pub executor: Arc<ToolExecutor>,
    /// Lifecycle hook dispatcher.
    pub hooks: Arc<HookManager>,
    /// Per-turn model selection.
    pub router: Arc<ModelRouter>,
    /// Fire-and-forget telemetry sink for this session.
    pub telemetry: Arc<TelemetryRecorder>,
    /// Optional sink every agent's stream chunks are forwarded to.
    pub on_stream: Option<Arc<dyn StreamSink>>,
    agents: Mutex<HashMap<AgentId, Arc<Agent>>>,
    next_agent_id: AtomicU32,
    shared_data: Mutex<HashMap<String, Value>>,
}

impl AgentContext {
    /// Build a fresh context with only the root agent present.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: impl Into<String>,
        workspace_root: PathBuf,
        config: Arc<RuntimeConfig>,
        llm: Arc<dyn LlmClient>,
        registry: Arc<ToolRegistry>,
        hooks: Arc<HookManager>,
        on_stream: Option<Arc<dyn StreamSink>>,
    ) -> Self {
        let session_id = session_id.into();
        let telemetry = Arc::new(TelemetryRecorder::new(session_id.clone()));
        let mut agents = HashMap::new();
        agents.insert(ROOT_AGENT_ID, Arc::new(Agent::root(workspace_root)));
        Self {
            session_id,
            config,
            llm,
            registry,
            executor: Arc::new(ToolExecutor::new()),
            hooks,
            router: Arc::new(ModelRouter::new()),
            telemetry,
            on_stream,
            agents: Mutex::new(agents),
            next_agent_id: AtomicU32::new(ROOT_AGENT_ID + 1),
            shared_data: Mutex::new(HashMap::new()),
        }
    }

    /// The root agent, always present.
    #[must_use]
    pub fn root_agent(&self) -> Arc<Agent> {
        self.get_agent(ROOT_AGENT_ID)
            .expect("root agent always present")
    }

    /// Look up an agent by id.
    #[must_use]
    pub fn get_agent(&self, agent_id: AgentId) -> Option<Arc<Agent>> {
        self.agents
            .lock()
            .ok()
            .and_then(|agents| agents.get(&agent_id).cloned())
    }

    /// Spawn a subordinate agent under `parent`, with its own id and an
    /// empty history, and register it in this context. `None` if `parent`
    /// does not name a live agent.
    pub fn spawn_subordinate(
        &self,
        parent: AgentId,
        system_prompt_override: impl Into<String>,
    ) -> Option<Arc<Agent>> {
        let parent_agent = self.get_agent(parent)?;
        let agent_id = self.next_agent_id.fetch_add(1, Ordering::SeqCst);
        let agent = Arc::new(Agent::subordinate(
            agent_id,
            &parent_agent,
            system_prompt_override,
        ));
        if let Ok(mut agents) = self.agents.lock() {
            agents.insert(agent_id, agent.clone());
        }
        Some(agent)
    }

    /// Read a value from the cross-cutting shared-data map.
    #[must_use]
    pub fn shared_get(&self, key: &str) -> Option<Value> {
        self.shared_data
            .lock()
            .ok()
            .and_then(|data| data.get(key).cloned())
    }

    /// Write a value into the cross-cutting shared-data map.
    pub fn shared_set(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut data) = self.shared_data.lock() {
            data.insert(key.into(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monologue_llm::FakeLlmClient;

    fn fresh_context() -> AgentContext {
        AgentContext::new(
            "session-1",
            std::env::temp_dir(),
            Arc::new(RuntimeConfig::default()),
            Arc::new(FakeLlmClient::always("hi", vec!["llama3".to_string()])),
            Arc::new(ToolRegistry::new()),
            Arc::new(HookManager::new()),
            None,
        )
    }

    #[test]
    fn root_agent_exists_with_id_zero() {
        let ctx = fresh_context();
        assert_eq!(ctx.root_agent().agent_id, ROOT_AGENT_ID);
    }

    #[test]
    fn spawned_subordinates_get_distinct_increasing_ids() {
        let ctx = fresh_context();
        let first = ctx.spawn_subordinate(ROOT_AGENT_ID, "do task A").unwrap();
        let second = ctx.spawn_subordinate(ROOT_AGENT_ID, "do task B").unwrap();
        assert_ne!(first.agent_id, second.agent_id);
        assert!(second.agent_id > first.agent_id);
        assert_eq!(first.parent, Some(ROOT_AGENT_ID));
    }

    #[test]
    fn history_push_and_snapshot_round_trip() {
        let agent = Agent::root(std::env::temp_dir());
        agent.push_history(Message::user("hello"));
        assert_eq!(agent.history_snapshot().len(), 1);
    }

    #[test]
    fn shared_data_round_trips() {
        let ctx = fresh_context();
        ctx.shared_set("k", serde_json::json!(42));
        assert_eq!(ctx.shared_get("k"), Some(serde_json::json!(42)));
    }
}
