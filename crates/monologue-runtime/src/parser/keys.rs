//! Key aliasing for the wire shape `{"tool_name": "...", "tool_args": {...}}`.

use serde_json::{Map, Value};

/// Keys that, when present, mark an object as a candidate tool call.
const TOOL_KEY_ALIASES: &[&str] = &["tool_name", "tool", "name"];

/// Rewrite `tool`/`name` → `tool_name` and `args`/`arguments` → `tool_args`
/// in place, without overwriting a canonical key that is already present.
pub(super) fn canonicalize_call_keys(obj: &mut Map<String, Value>) {
    for (alias, canonical) in [("tool", "tool_name"), ("name", "tool_name")] {
        if !obj.contains_key(canonical) {
            if let Some(value) = obj.remove(alias) {
                obj.insert(canonical.to_string(), value);
            }
        }
    }
    for (alias, canonical) in [("args", "tool_args"), ("arguments", "tool_args")] {
        if !obj.contains_key(canonical) {
            if let Some(value) = obj.remove(alias) {
                obj.insert(canonical.to_string(), value);
            }
        }
    }
}

/// Whether `obj` mentions any of the recognized tool-name keys, pre-aliasing.
#[must_use]
pub(super) fn mentions_tool_key(obj: &Map<String, Value>) -> bool {
    TOOL_KEY_ALIASES.iter().any(|key| obj.contains_key(*key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonicalizes_tool_and_args_aliases() {
        let mut obj = json!({"tool": "response", "args": {"text": "hi"}})
            .as_object()
            .unwrap()
            .clone();
        canonicalize_call_keys(&mut obj);
        assert!(obj.contains_key("tool_name"));
        assert!(obj.contains_key("tool_args"));
        assert!(!obj.contains_key("tool"));
        assert!(!obj.contains_key("args"));
    }

    #[test]
    fn does_not_overwrite_existing_canonical_key() {
        let mut obj = json!({"tool_name": "response", "name": "wrong"})
            .as_object()
            .unwrap()
            .clone();
        canonicalize_call_keys(&mut obj);
        assert_eq!(obj.get("tool_name").unwrap(), "response");
    }
}
