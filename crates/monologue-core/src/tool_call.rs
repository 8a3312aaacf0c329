//! The [`ToolCall`]/[`ToolResponse`] pair produced by the parser and consumed
//! by the tool executor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured action the model asked the runtime to perform.
///
/// Produced by the output parser (one per recognized tool-call payload) and
/// consumed by the tool executor. `name` is always the canonical, registry
/// form — alias resolution and case-folding happen before this type exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Canonical registry name.
    pub name: String,
    /// Arguments, already alias-normalized and schema-coerced.
    pub args: Map<String, Value>,
}

impl ToolCall {
    /// Build a tool call from a name and an argument map.
    pub fn new(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Fetch an argument as a plain string, if present and string-typed.
    #[must_use]
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

/// What a tool call produced.
///
/// `message` folds back into history as a system message; `break_loop`
/// tells the scheduler whether this was a terminal action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Text to append to history (or return to the caller, if terminal).
    pub message: String,
    /// If true, the monologue ends and `message` is returned to the caller.
    pub break_loop: bool,
}

impl ToolResponse {
    /// A non-terminal response that simply folds `message` back into history.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            break_loop: false,
        }
    }

    /// A terminal response: ends the monologue and returns `message`.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            break_loop: true,
        }
    }
}
