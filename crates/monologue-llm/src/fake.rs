//! A scriptable in-memory [`LlmClient`] double for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream;

use crate::client::{ChatStream, LlmClient};
use crate::error::{LlmError, LlmResult};
use crate::types::{ChatRequest, StreamEvent};

/// One scripted response: either a full assistant text (streamed as a
/// single chunk) or a canned failure.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Stream this text as one `TextDelta` followed by `Done`.
    Text(String),
    /// Fail the call outright with this error.
    Error(FakeError),
}

/// A stand-in for the three [`LlmError`] kinds, picked without needing a
/// live `reqwest::Error`.
#[derive(Debug, Clone)]
pub enum FakeError {
    /// Maps to [`LlmError::Connect`].
    Connect(String),
    /// Maps to [`LlmError::ModelNotFound`].
    ModelNotFound(String),
    /// Maps to [`LlmError::Other`].
    Other(String),
}

impl From<FakeError> for LlmError {
    fn from(error: FakeError) -> Self {
        match error {
            FakeError::Connect(message) => Self::Connect(message),
            FakeError::ModelNotFound(message) => Self::ModelNotFound(message),
            FakeError::Other(message) => Self::Other(message),
        }
    }
}

/// A fake client that returns a queued [`ScriptedReply`] on each
/// `stream_chat` call, in order, repeating the last once exhausted.
pub struct FakeLlmClient {
    replies: Mutex<Vec<ScriptedReply>>,
    models: Vec<String>,
}

impl FakeLlmClient {
    /// Build a fake client that replays `replies` in order.
    #[must_use]
    pub fn new(replies: Vec<ScriptedReply>, models: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies),
            models,
        }
    }

    /// Convenience constructor for a client that always returns the same text.
    #[must_use]
    pub fn always(text: impl Into<String>, models: Vec<String>) -> Self {
        Self::new(vec![ScriptedReply::Text(text.into())], models)
    }
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn health(&self) -> LlmResult<()> {
        Ok(())
    }

    async fn list_models(&self) -> LlmResult<Vec<String>> {
        Ok(self.models.clone())
    }

    async fn stream_chat(&self, _request: ChatRequest) -> LlmResult<ChatStream> {
        let reply = {
            let mut replies = self.replies.lock().expect("fake client mutex poisoned");
            if replies.is_empty() {
                ScriptedReply::Text(String::new())
            } else if replies.len() == 1 {
                replies[0].clone()
            } else {
                replies.remove(0)
            }
        };

        match reply {
            ScriptedReply::Text(text) => Ok(Box::pin(stream::iter(vec![
                Ok(StreamEvent::TextDelta(text)),
                Ok(StreamEvent::Done),
            ]))),
            ScriptedReply::Error(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn replays_scripted_text_then_done() {
        let client = FakeLlmClient::always("hello", vec!["m".to_string()]);
        let request = ChatRequest::new("m", vec![]);
        let mut stream = client.stream_chat(request).await.expect("ok");
        let first = stream.next().await.unwrap().unwrap();
        let second = stream.next().await.unwrap().unwrap();
        assert!(matches!(first, StreamEvent::TextDelta(ref t) if t == "hello"));
        assert!(matches!(second, StreamEvent::Done));
    }

    #[tokio::test]
    async fn advances_through_queued_replies() {
        let client = FakeLlmClient::new(
            vec![
                ScriptedReply::Text("first".to_string()),
                ScriptedReply::Text("second".to_string()),
            ],
            vec![],
        );
        let mut first_stream = client
            .stream_chat(ChatRequest::new("m", vec![]))
            .await
            .unwrap();
        let first = first_stream.next().await.unwrap().unwrap();
        assert!(matches!(first, StreamEvent::TextDelta(ref t) if t == "first"));

        let mut second_stream = client
            .stream_chat(ChatRequest::new("m", vec![]))
            .await
            .unwrap();
        let second = second_stream.next().await.unwrap().unwrap();
        assert!(matches!(second, StreamEvent::TextDelta(ref t) if t == "second"));
    }
}
