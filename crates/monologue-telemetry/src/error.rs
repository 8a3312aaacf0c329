//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur configuring telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The supplied log level directive could not be parsed.
    #[error("invalid log directive {directive:?}: {source}")]
    InvalidDirective {
        /// The directive string that failed to parse.
        directive: String,
        /// Underlying parse error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
