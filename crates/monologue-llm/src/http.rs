//! An OpenAI-compatible HTTP client.
//!
//! Works against LM Studio, Ollama's OpenAI-compatibility layer, vLLM, and
//! the real OpenAI API — anything that speaks `POST {base_url}/chat/completions`
//! with SSE streaming and `GET {base_url}/models`.

use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use monologue_core::{Message, Role};

use crate::client::{ChatStream, LlmClient};
use crate::error::{LlmError, LlmResult};
use crate::types::{ChatRequest, StreamEvent};

const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// An OpenAI-compatible LLM backend client.
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatClient {
    /// Create a client pointed at a local Ollama/LM-Studio-style endpoint.
    #[must_use]
    pub fn local() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }

    /// Create a client against an arbitrary OpenAI-compatible `base_url`,
    /// with an optional bearer `api_key`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base_url.trim_end_matches('/'))
    }
}

fn convert_message(message: &Message) -> Value {
    let role = match message.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    serde_json::json!({ "role": role, "content": message.content })
}

fn build_request_body(request: &ChatRequest) -> Value {
    let messages: Vec<Value> = request.messages.iter().map(convert_message).collect();
    let mut body = serde_json::json!({
        "model": request.model,
        "messages": messages,
        "temperature": request.temperature,
        "stream": true,
    });
    if let Some(obj) = body.as_object_mut() {
        for (key, value) in &request.options {
            obj.insert(key.clone(), value.clone());
        }
    }
    body
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
    #[serde(default)]
    usage: Option<UsageChunk>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageChunk {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    async fn health(&self) -> LlmResult<()> {
        self.auth(self.client.get(self.models_url()))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn list_models(&self) -> LlmResult<Vec<String>> {
        let response = self
            .auth(self.client.get(self.models_url()))
            .send()
            .await?
            .error_for_status()?;
        let parsed: ModelsResponse = response.json().await?;
        Ok(parsed.data.into_iter().map(|entry| entry.id).collect())
    }

    async fn stream_chat(&self, request: ChatRequest) -> LlmResult<ChatStream> {
        let body = build_request_body(&request);
        debug!(model = %request.model, base_url = %self.base_url, "starting chat stream");

        let response = self
            .auth(self.client.post(self.chat_url()))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(LlmError::ModelNotFound(format!(
                    "model {} not found: {text}",
                    request.model
                )));
            }
            return Err(LlmError::Other(format!("HTTP {status}: {text}")));
        }

        let stream = try_stream! {
            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(LlmError::from)?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(boundary) = buffer.find("\n\n") {
                    let event = buffer[..boundary].to_string();
                    buffer.drain(..boundary + 2);

                    for line in event.lines() {
                        let Some(data) = line.strip_prefix("data: ") else { continue };
                        if data.trim() == "[DONE]" {
                            yield StreamEvent::Done;
                            return;
                        }
                        match serde_json::from_str::<StreamChunk>(data) {
                            Ok(parsed) => {
                                if let Some(usage) = parsed.usage {
                                    yield StreamEvent::Usage {
                                        input_tokens: usage.prompt_tokens,
                                        output_tokens: usage.completion_tokens,
                                    };
                                }
                                if let Some(choice) = parsed.choices.first() {
                                    if let Some(content) = &choice.delta.content {
                                        if !content.is_empty() {
                                            yield StreamEvent::TextDelta(content.clone());
                                        }
                                    }
                                }
                            }
                            Err(error) => {
                                warn!(%error, payload = %data, "skipping malformed stream chunk");
                            }
                        }
                    }
                }
            }
            yield StreamEvent::Done;
        };

        Ok(Box::pin(stream))
    }
}
