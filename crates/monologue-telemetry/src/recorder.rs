//! The telemetry sink the core consumes (§6 "Telemetry sink").
//!
//! Recording is always fire-and-forget: it emits a `tracing` event for log
//! aggregation and appends to an in-memory ring so tests (and, eventually,
//! an admin surface) can inspect what happened during a turn. There is no
//! durable backing store — that is an external concern the spec places out
//! of scope — but the recording contract itself is fully implemented.

use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, info, warn};

/// Default number of records of each kind kept in memory before the oldest
/// is evicted.
const RING_CAPACITY: usize = 512;

/// One LLM call, success or failure.
#[derive(Debug, Clone, Serialize)]
pub struct LlmCallMetric {
    /// Model name requested.
    pub model: String,
    /// Prompt tokens sent (best-effort estimate if the backend omits usage).
    pub input_tokens: usize,
    /// Completion tokens received (zero on error).
    pub output_tokens: usize,
    /// Wall-clock duration of the call.
    pub duration_ms: u64,
    /// Set when the call failed; holds the stable error-prefix string.
    pub error: Option<String>,
}

/// One tool call, cached or not.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallMetric {
    /// Canonical tool name.
    pub name: String,
    /// Canonical-JSON argument key, for correlating with cache hits.
    pub args_key: String,
    /// Wall-clock duration of the call (zero for cache hits).
    pub duration_ms: u64,
    /// Whether this call was served from the tool cache.
    pub cached: bool,
    /// Truncated summary of the result text.
    pub result_summary: String,
    /// Set when the result message matched an `[Error …]`/`[Tool … error …]` shape.
    pub error: Option<String>,
}

/// One pass of the monologue state machine.
#[derive(Debug, Clone, Serialize)]
pub struct LoopIterationMetric {
    /// 1-based iteration number within the turn.
    pub iteration: u32,
    /// Whether the model proposed any tool calls this iteration.
    pub had_tool_calls: bool,
}

/// A memory-subsystem operation (the vector-memory subsystem itself is out
/// of scope; this just records that a call crossed the boundary).
#[derive(Debug, Clone, Serialize)]
pub struct MemoryOpMetric {
    /// Operation name (e.g. `"search"`, `"store"`).
    pub op: String,
    /// Free-form detail, truncated.
    pub detail: String,
}

struct Ring<T> {
    items: Vec<T>,
}

impl<T> Ring<T> {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn push(&mut self, item: T) {
        if self.items.len() >= RING_CAPACITY {
            self.items.remove(0);
        }
        self.items.push(item);
    }
}

/// In-process recorder for the telemetry events the core emits.
///
/// One recorder per [`monologue_core::SessionId`][session-id] (bound at
/// construction); every recording method is synchronous and non-blocking
/// so it is safe to call directly from the scheduler's hot path.
///
/// [session-id]: ../monologue_core/type.SessionId.html
pub struct TelemetryRecorder {
    session_id: String,
    llm_calls: Mutex<Ring<LlmCallMetric>>,
    tool_calls: Mutex<Ring<ToolCallMetric>>,
    iterations: Mutex<Ring<LoopIterationMetric>>,
    memory_ops: Mutex<Ring<MemoryOpMetric>>,
}

impl TelemetryRecorder {
    /// Bind a new recorder to a session id.
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            llm_calls: Mutex::new(Ring::new()),
            tool_calls: Mutex::new(Ring::new()),
            iterations: Mutex::new(Ring::new()),
            memory_ops: Mutex::new(Ring::new()),
        }
    }

    /// Record one LLM call.
    pub fn record_llm_call(&self, metric: LlmCallMetric) {
        if let Some(error) = &metric.error {
            warn!(session_id = %self.session_id, model = %metric.model, error = %error, "llm call failed");
        } else {
            debug!(
                session_id = %self.session_id,
                model = %metric.model,
                input_tokens = metric.input_tokens,
                output_tokens = metric.output_tokens,
                duration_ms = metric.duration_ms,
                "llm call completed"
            );
        }
        if let Ok(mut ring) = self.llm_calls.lock() {
            ring.push(metric);
        }
    }

    /// Record one tool call.
    pub fn record_tool_call(&self, metric: ToolCallMetric) {
        if let Some(error) = &metric.error {
            warn!(session_id = %self.session_id, tool = %metric.name, error = %error, "tool call failed");
        } else {
            debug!(
                session_id = %self.session_id,
                tool = %metric.name,
                cached = metric.cached,
                duration_ms = metric.duration_ms,
                "tool call completed"
            );
        }
        if let Ok(mut ring) = self.tool_calls.lock() {
            ring.push(metric);
        }
    }

    /// Record one loop iteration.
    pub fn record_iteration(&self, metric: LoopIterationMetric) {
        debug!(
            session_id = %self.session_id,
            iteration = metric.iteration,
            had_tool_calls = metric.had_tool_calls,
            "monologue iteration"
        );
        if let Ok(mut ring) = self.iterations.lock() {
            ring.push(metric);
        }
    }

    /// Record one memory-subsystem operation.
    pub fn record_memory_op(&self, metric: MemoryOpMetric) {
        debug!(session_id = %self.session_id, op = %metric.op, "memory op");
        if let Ok(mut ring) = self.memory_ops.lock() {
            ring.push(metric);
        }
    }

    /// Finalize the turn's telemetry with the name of the terminal tool (or
    /// `"max_iterations"` when the loop ended via the iteration cap).
    pub fn finalize(&self, terminal_tool: &str) {
        info!(session_id = %self.session_id, terminal_tool, "monologue turn finalized");
    }

    /// Snapshot of recorded tool-call metrics, oldest first. Test/inspection use.
    #[must_use]
    pub fn tool_call_history(&self) -> Vec<ToolCallMetric> {
        self.tool_calls
            .lock()
            .map(|ring| ring.items.clone())
            .unwrap_or_default()
    }

    /// Snapshot of recorded LLM-call metrics, oldest first. Test/inspection use.
    #[must_use]
    pub fn llm_call_history(&self) -> Vec<LlmCallMetric> {
        self.llm_calls
            .lock()
            .map(|ring| ring.items.clone())
            .unwrap_or_default()
    }
}
