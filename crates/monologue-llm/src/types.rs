//! Wire-level request/response shapes for the LLM backend contract.

use monologue_core::Message;
use serde_json::{Map, Value};

/// One streaming chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Backend model name to use.
    pub model: String,
    /// Full message list for this turn (`[system] ++ history`).
    pub messages: Vec<Message>,
    /// Sampling temperature, backend-defined range.
    pub temperature: f32,
    /// Backend-specific free-form options (e.g. `num_ctx`, `top_p`).
    pub options: Map<String, Value>,
}

impl ChatRequest {
    /// Build a request with default temperature and no extra options.
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.7,
            options: Map::new(),
        }
    }
}

/// One item from a streaming chat response.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// An incremental chunk of assistant text.
    TextDelta(String),
    /// Token usage reported at the end of the stream, if the backend sends it.
    Usage {
        /// Prompt tokens consumed.
        input_tokens: usize,
        /// Completion tokens produced.
        output_tokens: usize,
    },
    /// The stream has ended successfully.
    Done,
}
