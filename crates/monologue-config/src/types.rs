//! Typed configuration shapes. Every struct implements [`Default`] with
//! values that let a fresh checkout run against a local backend unconfigured.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Top-level runtime configuration, loaded once at startup and shared
/// read-only for the lifetime of an [`monologue_core`][core]-backed process.
///
/// [core]: ../monologue_core/index.html
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Hard cap on iterations within a single monologue turn.
    pub max_monologue_iterations: u32,
    /// Consecutive no-tool-call iterations before the reminder is injected.
    pub no_tool_reminder_threshold: u32,
    /// Default per-call tool timeout, in seconds, used when a tool declares none.
    pub tool_timeout_default_secs: f64,
    /// Per-tool timeout overrides, in seconds, keyed by tool name. Takes
    /// precedence over both the tool's own `timeout_seconds` and the default.
    pub tool_timeout_overrides: HashMap<String, f64>,
    /// Whether the tool cache is consulted/populated at all.
    pub cache_enabled: bool,
    /// LLM backend connection settings.
    pub llm: LlmConfig,
    /// Model-routing settings.
    pub router: ModelRouterConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_monologue_iterations: 25,
            no_tool_reminder_threshold: 5,
            tool_timeout_default_secs: 30.0,
            tool_timeout_overrides: HashMap::new(),
            cache_enabled: true,
            llm: LlmConfig::default(),
            router: ModelRouterConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Resolve the effective timeout for `tool_name`, honoring the
    /// override → tool-declared → default precedence chain.
    #[must_use]
    pub fn resolve_timeout_secs(&self, tool_name: &str, tool_declared: Option<f64>) -> f64 {
        self.tool_timeout_overrides
            .get(tool_name)
            .copied()
            .or(tool_declared)
            .unwrap_or(self.tool_timeout_default_secs)
    }
}

/// Connection settings for the LLM backend.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI/Ollama-compatible HTTP endpoint.
    pub base_url: String,
    /// Bearer API key, if the backend requires one. Never logged.
    pub api_key: Option<String>,
    /// Model name used when routing is disabled or falls through entirely.
    pub chat_model: String,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("chat_model", &self.chat_model)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            api_key: None,
            chat_model: "llama3".to_string(),
        }
    }
}

/// Model-routing table and toggles consumed by the model router.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelRouterConfig {
    /// When `false`, the router always returns `chat_model` unconditionally.
    pub enabled: bool,
    /// Tool name → route key (e.g. `"code_interpreter" -> "coding"`).
    pub tool_affinity: HashMap<String, String>,
    /// Route key → model name; must contain a `"default"` entry to be useful.
    pub routes: HashMap<String, String>,
}

impl Default for ModelRouterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tool_affinity: HashMap::new(),
            routes: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_precedence_prefers_override_then_declared_then_default() {
        let mut config = RuntimeConfig::default();
        config
            .tool_timeout_overrides
            .insert("sleep".to_string(), 1.0);
        assert_eq!(config.resolve_timeout_secs("sleep", Some(5.0)), 1.0);
        assert_eq!(config.resolve_timeout_secs("other", Some(5.0)), 5.0);
        assert_eq!(config.resolve_timeout_secs("other", None), 30.0);
    }

    #[test]
    fn llm_config_debug_redacts_api_key() {
        let config = LlmConfig {
            api_key: Some("sk-secret".to_string()),
            ..LlmConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
