//! Hook error types.

use thiserror::Error;

/// An error raised by an extension's hook handler.
///
/// Dispatch catches and logs these; they never abort the dispatch of
/// remaining extensions or propagate into the monologue loop.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(pub String);

/// Result type for a single hook invocation.
pub type HookResult<T> = Result<T, HookError>;
