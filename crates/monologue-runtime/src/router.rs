//! Model routing: picks a backend model name for the next turn from tool
//! affinity, message content heuristics, and a last-observed availability
//! list (C3 in the design doc this crate implements).

use std::sync::Mutex;

use tracing::debug;

use monologue_config::ModelRouterConfig;
use monologue_core::Message;
use monologue_llm::LlmClient;

/// Fixed keyword/fence heuristics used to classify the most recent user
/// message into a route key.
const CODING_KEYWORDS: &[&str] = &["```", "fn ", "def ", "class ", "import ", "function "];
const SUMMARIZATION_KEYWORDS: &[&str] = &[
    "summarize",
    "summary",
    "tl;dr",
    "condense",
    "brief",
    "overview",
    "high-level",
    "key points",
];

/// Caches the last-observed model list and picks a model per turn.
///
/// Availability is refreshed lazily on first use; a stale list just causes
/// one extra fallback hop rather than a hard failure.
pub struct ModelRouter {
    available_models: Mutex<Option<Vec<String>>>,
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRouter {
    /// A router with no cached model list yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available_models: Mutex::new(None),
        }
    }

    /// Populate the cached model list if it hasn't been fetched yet.
    pub async fn ensure_models(&self, client: &dyn LlmClient) {
        let needs_refresh = self
            .available_models
            .lock()
            .map(|guard| guard.is_none())
            .unwrap_or(true);
        if !needs_refresh {
            return;
        }
        match client.list_models().await {
            Ok(models) => {
                if let Ok(mut guard) = self.available_models.lock() {
                    *guard = Some(models);
                }
            }
            Err(error) => {
                debug!(%error, "failed to refresh model list, routing will fall back freely");
            }
        }
    }

    /// Select a model for the next turn.
    ///
    /// `messages` is the turn's in-progress message list (the most recent
    /// user message drives the content heuristic); `last_tool_name` is the
    /// terminal tool name from the previous iteration, if any.
    #[must_use]
    pub fn select(
        &self,
        messages: &[Message],
        last_tool_name: Option<&str>,
        config: &ModelRouterConfig,
        chat_model: &str,
    ) -> String {
        if !config.enabled {
            return chat_model.to_string();
        }

        let route_key = last_tool_name
            .and_then(|tool| config.tool_affinity.get(tool))
            .cloned()
            .unwrap_or_else(|| classify_content(messages));

        let candidate = config
            .routes
            .get(&route_key)
            .or_else(|| config.routes.get("default"))
            .cloned()
            .unwrap_or_else(|| chat_model.to_string());

        self.filter_available(candidate, config, chat_model)
    }

    fn filter_available(
        &self,
        candidate: String,
        config: &ModelRouterConfig,
        chat_model: &str,
    ) -> String {
        let available = match self.available_models.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        let Some(available) = available else {
            return candidate;
        };
        if is_available(&candidate, &available) {
            return candidate;
        }
        if let Some(default_model) = config.routes.get("default") {
            if is_available(default_model, &available) {
                return default_model.clone();
            }
        }
        chat_model.to_string()
    }
}

fn is_available(candidate: &str, available: &[String]) -> bool {
    available
        .iter()
        .any(|model| model == candidate || model.starts_with(&format!("{candidate}:")))
}

fn classify_content(messages: &[Message]) -> String {
    let last_user_text = messages
        .iter()
        .rev()
        .find(|m| m.role == monologue_core::Role::User)
        .map(|m| m.content.to_lowercase())
        .unwrap_or_default();

    if CODING_KEYWORDS.iter().any(|kw| last_user_text.contains(kw)) {
        return "coding".to_string();
    }
    if SUMMARIZATION_KEYWORDS
        .iter()
        .any(|kw| last_user_text.contains(kw))
    {
        return "summarization".to_string();
    }
    "reasoning".to_string()
}
