//! Per-tool argument aliasing and output truncation.
//!
//! The parser (in `monologue-runtime`) applies [`normalize_args`] after key
//! aliasing but before schema coercion, so a model that writes
//! `{"message": "hi"}` for the `response` tool still produces a valid call.

use serde_json::{Map, Value};

/// Maximum output size in characters before truncation.
pub const MAX_OUTPUT_CHARS: usize = 30_000;

/// Fixed table of `(tool_name, wrong_key, correct_key)` aliases for common
/// model mistakes. Never invents a value for a missing required argument;
/// it only renames keys that are already present.
const ALIASES: &[(&str, &str, &str)] = &[
    ("response", "message", "text"),
    ("response", "content", "text"),
    ("response", "answer", "text"),
    ("task_done", "message", "text"),
    ("task_done", "content", "text"),
    ("task_done", "answer", "text"),
    ("shell", "script", "code"),
    ("shell", "command", "code"),
];

/// Rewrite known wrong-key mistakes for `tool_name` in place.
pub fn normalize_args(tool_name: &str, args: &mut Map<String, Value>) {
    for (tool, wrong_key, correct_key) in ALIASES {
        if *tool != tool_name {
            continue;
        }
        if args.contains_key(*correct_key) {
            continue;
        }
        if let Some(value) = args.remove(*wrong_key) {
            args.insert((*correct_key).to_string(), value);
        }
    }
}

/// Truncate `output` to [`MAX_OUTPUT_CHARS`], appending a notice if it was cut.
#[must_use]
pub fn truncate_output(output: String) -> String {
    if output.chars().count() <= MAX_OUTPUT_CHARS {
        return output;
    }
    let mut truncated: String = output.chars().take(MAX_OUTPUT_CHARS).collect();
    truncated.push_str("\n\n... (output truncated — exceeded 30000 character limit)");
    truncated
}
