//! Runtime-level errors.
//!
//! This is the one error kind the scheduler never absorbs: configuration
//! failures abort startup before any agent is created. Everything else
//! (LLM failures, tool timeouts/errors, parse failures) is handled inside
//! the loop and folded into a returned string instead.

use thiserror::Error;

/// Errors that can occur assembling a runtime before it ever begins a monologue.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] monologue_config::ConfigError),
}

/// Result type for runtime construction.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
