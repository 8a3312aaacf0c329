//! Config file loading: embedded defaults, optional file overlay, then
//! environment-variable fallbacks for secrets.

use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::types::RuntimeConfig;

/// Environment variable carrying the LLM backend's base URL.
pub const ENV_BASE_URL: &str = "MONOLOGUE_LLM_BASE_URL";
/// Environment variable carrying the LLM backend's API key.
pub const ENV_API_KEY: &str = "MONOLOGUE_LLM_API_KEY";
/// Environment variable naming the chat-fallback model.
pub const ENV_CHAT_MODEL: &str = "MONOLOGUE_CHAT_MODEL";

/// Load [`RuntimeConfig`] starting from built-in defaults, optionally
/// overlaid by a TOML file at `path`, then env-var fallbacks for secrets
/// that are still unset.
///
/// # Errors
///
/// Returns [`ConfigError`] if `path` is given but unreadable, or its
/// contents do not parse as a `RuntimeConfig` TOML document.
pub fn load(path: Option<&Path>) -> ConfigResult<RuntimeConfig> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => RuntimeConfig::default(),
    };
    apply_env_fallbacks(&mut config);
    validate(&config)?;
    Ok(config)
}

fn load_file(path: &Path) -> ConfigResult<RuntimeConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn apply_env_fallbacks(config: &mut RuntimeConfig) {
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        config.llm.base_url = base_url;
    }
    if config.llm.api_key.is_none() {
        if let Ok(api_key) = std::env::var(ENV_API_KEY) {
            config.llm.api_key = Some(api_key);
        }
    }
    if let Ok(chat_model) = std::env::var(ENV_CHAT_MODEL) {
        config.llm.chat_model = chat_model;
    }
}

fn validate(config: &RuntimeConfig) -> ConfigResult<()> {
    if config.max_monologue_iterations == 0 {
        return Err(ConfigError::Invalid(
            "max_monologue_iterations must be at least 1".to_string(),
        ));
    }
    if config.no_tool_reminder_threshold == 0 {
        return Err(ConfigError::Invalid(
            "no_tool_reminder_threshold must be at least 1".to_string(),
        ));
    }
    if config.tool_timeout_default_secs <= 0.0 {
        return Err(ConfigError::Invalid(
            "tool_timeout_default_secs must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_with_no_path_returns_defaults() {
        let config = load(None).expect("defaults always validate");
        assert_eq!(config.max_monologue_iterations, 25);
    }

    #[test]
    fn load_overlays_file_contents() {
        let mut file = tempfile();
        writeln!(file.1, "max_monologue_iterations = 7").unwrap();
        let config = load(Some(&file.0)).expect("valid overlay");
        assert_eq!(config.max_monologue_iterations, 7);
        assert_eq!(config.no_tool_reminder_threshold, 5);
    }

    #[test]
    fn rejects_zero_iteration_cap() {
        let mut file = tempfile();
        writeln!(file.1, "max_monologue_iterations = 0").unwrap();
        let err = load(Some(&file.0)).expect_err("zero cap is invalid");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    fn tempfile() -> (std::path::PathBuf, std::fs::File) {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "monologue-config-test-{}-{id}.toml",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        (path, file)
    }
}
