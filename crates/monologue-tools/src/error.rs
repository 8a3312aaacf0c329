//! Tool execution errors.

use thiserror::Error;

/// Errors a [`crate::Tool`] can raise from `before`/`execute`/`after`.
///
/// The executor converts any of these into a bracketed `ToolResponse`
/// (`"[Tool '<name>' error: <e>]"`); they never propagate out of the loop.
#[derive(Debug, Error)]
pub enum ToolError {
    /// I/O error (subprocess spawn, file access, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Arguments did not satisfy the tool's own preconditions.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Execution failed for a tool-specific reason.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

/// Result type for a single tool operation.
pub type ToolExecResult<T> = Result<T, ToolError>;
