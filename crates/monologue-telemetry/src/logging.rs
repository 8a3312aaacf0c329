//! Logging setup: a small builder over `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

use crate::error::{TelemetryError, TelemetryResult};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, colorized when stdout is a tty.
    #[default]
    Pretty,
    /// Compact single-line-per-event.
    Compact,
    /// Newline-delimited JSON, for machine consumption.
    Json,
}

/// Configuration for [`setup_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    default_level: String,
    format: LogFormat,
    directives: Vec<String>,
}

impl LogConfig {
    /// Start from a base level (e.g. `"info"`, `"debug"`).
    #[must_use]
    pub fn new(default_level: impl Into<String>) -> Self {
        Self {
            default_level: default_level.into(),
            format: LogFormat::default(),
            directives: Vec::new(),
        }
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Add an extra `target=level` directive (e.g. `"monologue_runtime=trace"`).
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.default_level).map_err(|source| {
            TelemetryError::InvalidDirective {
                directive: self.default_level.clone(),
                source,
            }
        })?;
        for directive in &self.directives {
            let parsed = directive
                .parse()
                .map_err(|source| TelemetryError::InvalidDirective {
                    directive: directive.clone(),
                    source,
                })?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// Install a global tracing subscriber per `config`.
///
/// # Errors
///
/// Returns [`TelemetryError`] if a directive fails to parse or a global
/// subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;
    let registry = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Pretty => registry.pretty().try_init(),
        LogFormat::Compact => registry.compact().try_init(),
        LogFormat::Json => registry.json().try_init(),
    };
    result.map_err(|err| TelemetryError::SubscriberInit(err.to_string()))
}

/// Install logging with sensible defaults (`info`, pretty format).
///
/// # Errors
///
/// See [`setup_logging`].
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}
