//! LLM backend client contract and implementations for the monologue agent runtime.
//!
//! [`LlmClient`] is the only interface the runtime depends on; [`http::OpenAiCompatClient`]
//! is a real implementation against LM Studio/Ollama/OpenAI-compatible endpoints, and
//! [`fake::FakeLlmClient`] is a scriptable double for tests.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod client;
mod error;
mod fake;
mod http;
mod types;

pub use client::{ChatStream, LlmClient};
pub use error::{LlmError, LlmResult};
pub use fake::{FakeError, FakeLlmClient, ScriptedReply};
pub use http::OpenAiCompatClient;
pub use types::{ChatRequest, StreamEvent};
