//! The LLM backend contract the core consumes (§6 "LLM backend").

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::LlmResult;
use crate::types::{ChatRequest, StreamEvent};

/// Stream of chat events; ends with `Ok(StreamEvent::Done)` or a terminal `Err`.
pub type ChatStream = BoxStream<'static, LlmResult<StreamEvent>>;

/// An HTTP client for an LLM backend: health probe, model listing, and
/// streaming chat. Implementations are expected to be cheap to clone
/// (an `Arc`-wrapped `reqwest::Client` internally) and `Send + Sync`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LlmError::Connect`] if the backend cannot be reached.
    async fn health(&self) -> LlmResult<()>;

    /// List model names the backend currently reports as available.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the listing call fails.
    async fn list_models(&self) -> LlmResult<Vec<String>>;

    /// Stream a chat completion for `request`.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the request cannot be started at all;
    /// mid-stream failures surface as a terminal `Err` item instead.
    async fn stream_chat(&self, request: ChatRequest) -> LlmResult<ChatStream>;
}

#[async_trait]
impl LlmClient for Box<dyn LlmClient> {
    async fn health(&self) -> LlmResult<()> {
        (**self).health().await
    }

    async fn list_models(&self) -> LlmResult<Vec<String>> {
        (**self).list_models().await
    }

    async fn stream_chat(&self, request: ChatRequest) -> LlmResult<ChatStream> {
        (**self).stream_chat(request).await
    }
}
