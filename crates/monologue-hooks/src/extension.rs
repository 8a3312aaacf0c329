//! The [`Extension`] trait: the lifecycle hooks a registered extension may
//! implement.

use async_trait::async_trait;

use monologue_core::{Message, ToolCall, ToolResponse};

use crate::error::HookResult;

/// A stateful, session-scoped lifecycle extension.
///
/// Every hook has a no-op default, so an extension only overrides the
/// points it cares about. Extensions register in a fixed order and are
/// dispatched sequentially in that order for every hook.
#[async_trait]
pub trait Extension: Send + Sync {
    /// Name used in logs when a handler errors.
    fn name(&self) -> &str;

    /// Fired once at the start of a monologue turn.
    async fn message_loop_start(&self) -> HookResult<()> {
        Ok(())
    }

    /// Fired before the system prompt is assembled.
    async fn message_loop_prompts_before(&self) -> HookResult<()> {
        Ok(())
    }

    /// Fired immediately before the LLM call. Returning `Some(messages)`
    /// proposes a replacement for the outgoing message list; the
    /// dispatcher keeps the *last* non-`None` value across all extensions.
    async fn before_llm_call(&self, _messages: &[Message]) -> HookResult<Option<Vec<Message>>> {
        Ok(None)
    }

    /// Fired after the LLM call completes, with the full concatenated response text.
    async fn after_llm_call(&self, _response_text: &str) -> HookResult<()> {
        Ok(())
    }

    /// Fired before a tool call executes.
    async fn tool_execute_before(&self, _call: &ToolCall) -> HookResult<()> {
        Ok(())
    }

    /// Fired after a tool call executes, with its response.
    async fn tool_execute_after(
        &self,
        _call: &ToolCall,
        _response: &ToolResponse,
    ) -> HookResult<()> {
        Ok(())
    }

    /// Fired once when the monologue ends, with its terminal text.
    async fn monologue_end(&self, _terminal_text: &str) -> HookResult<()> {
        Ok(())
    }
}
