//! Sequential hook dispatch in fixed registration order.

use std::sync::Arc;

use tracing::warn;

use monologue_core::{Message, ToolCall, ToolResponse};

use crate::extension::Extension;

/// Dispatches lifecycle events to registered [`Extension`]s in the order
/// they were registered. Handler errors are caught, logged, and never
/// abort the dispatch of remaining extensions.
#[derive(Default)]
pub struct HookManager {
    extensions: Vec<Arc<dyn Extension>>,
}

impl HookManager {
    /// An empty manager with no extensions registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension; it runs after any already-registered one.
    pub fn register(&mut self, extension: Arc<dyn Extension>) {
        self.extensions.push(extension);
    }

    /// Dispatch `message_loop_start` to every extension.
    pub async fn dispatch_message_loop_start(&self) {
        for extension in &self.extensions {
            if let Err(error) = extension.message_loop_start().await {
                warn!(extension = extension.name(), %error, hook = "message_loop_start", "hook handler failed");
            }
        }
    }

    /// Dispatch `message_loop_prompts_before` to every extension.
    pub async fn dispatch_message_loop_prompts_before(&self) {
        for extension in &self.extensions {
            if let Err(error) = extension.message_loop_prompts_before().await {
                warn!(extension = extension.name(), %error, hook = "message_loop_prompts_before", "hook handler failed");
            }
        }
    }

    /// Dispatch `before_llm_call` to every extension, returning the last
    /// non-`None` override in registration order, if any.
    pub async fn dispatch_before_llm_call(&self, messages: &[Message]) -> Option<Vec<Message>> {
        let mut override_messages = None;
        for extension in &self.extensions {
            match extension.before_llm_call(messages).await {
                Ok(Some(replacement)) => override_messages = Some(replacement),
                Ok(None) => {}
                Err(error) => {
                    warn!(extension = extension.name(), %error, hook = "before_llm_call", "hook handler failed");
                }
            }
        }
        override_messages
    }

    /// Dispatch `after_llm_call` to every extension.
    pub async fn dispatch_after_llm_call(&self, response_text: &str) {
        for extension in &self.extensions {
            if let Err(error) = extension.after_llm_call(response_text).await {
                warn!(extension = extension.name(), %error, hook = "after_llm_call", "hook handler failed");
            }
        }
    }

    /// Dispatch `tool_execute_before` to every extension.
    pub async fn dispatch_tool_execute_before(&self, call: &ToolCall) {
        for extension in &self.extensions {
            if let Err(error) = extension.tool_execute_before(call).await {
                warn!(extension = extension.name(), %error, hook = "tool_execute_before", "hook handler failed");
            }
        }
    }

    /// Dispatch `tool_execute_after` to every extension.
    pub async fn dispatch_tool_execute_after(&self, call: &ToolCall, response: &ToolResponse) {
        for extension in &self.extensions {
            if let Err(error) = extension.tool_execute_after(call, response).await {
                warn!(extension = extension.name(), %error, hook = "tool_execute_after", "hook handler failed");
            }
        }
    }

    /// Dispatch `monologue_end` to every extension.
    pub async fn dispatch_monologue_end(&self, terminal_text: &str) {
        for extension in &self.extensions {
            if let Err(error) = extension.monologue_end(terminal_text).await {
                warn!(extension = extension.name(), %error, hook = "monologue_end", "hook handler failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HookError, HookResult};
    use async_trait::async_trait;
    use monologue_core::Message;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingExtension {
        name: &'static str,
        order: Arc<std::sync::Mutex<Vec<&'static str>>>,
        fails: bool,
    }

    #[async_trait]
    impl Extension for RecordingExtension {
        fn name(&self) -> &str {
            self.name
        }

        async fn message_loop_start(&self) -> HookResult<()> {
            self.order.lock().unwrap().push(self.name);
            if self.fails {
                return Err(HookError("boom".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatches_in_registration_order_and_survives_errors() {
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut manager = HookManager::new();
        manager.register(Arc::new(RecordingExtension {
            name: "a",
            order: order.clone(),
            fails: true,
        }));
        manager.register(Arc::new(RecordingExtension {
            name: "b",
            order: order.clone(),
            fails: false,
        }));
        manager.dispatch_message_loop_start().await;
        assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    }

    struct OverridingExtension {
        override_with: Option<Vec<Message>>,
    }

    #[async_trait]
    impl Extension for OverridingExtension {
        fn name(&self) -> &str {
            "overrider"
        }

        async fn before_llm_call(&self, _messages: &[Message]) -> HookResult<Option<Vec<Message>>> {
            Ok(self.override_with.clone())
        }
    }

    #[tokio::test]
    async fn before_llm_call_keeps_last_non_null_override() {
        let mut manager = HookManager::new();
        manager.register(Arc::new(OverridingExtension {
            override_with: Some(vec![Message::user("first")]),
        }));
        manager.register(Arc::new(OverridingExtension {
            override_with: None,
        }));
        manager.register(Arc::new(OverridingExtension {
            override_with: Some(vec![Message::user("last")]),
        }));
        let result = manager.dispatch_before_llm_call(&[]).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].content, "last");
    }

    #[tokio::test]
    async fn empty_manager_is_harmless() {
        let manager = HookManager::new();
        let counter = AtomicUsize::new(0);
        manager.dispatch_message_loop_start().await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
