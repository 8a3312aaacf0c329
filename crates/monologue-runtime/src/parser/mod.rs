//! Lenient tool-call extraction from raw model output.
//!
//! Four strategies run in a fixed order; the first to produce at least one
//! valid call wins outright — later strategies never merge in, and a
//! strategy that finds candidate objects but rejects all of them (bad
//! schema, unknown tool) still counts as "tried", not "succeeded".
//!
//! 1. Fenced code blocks, parsed as strict JSON.
//! 2. Spans anchored at a tool-key occurrence, parsed as strict JSON.
//! 3. Every top-level balanced-brace span in the text, parsed as strict JSON.
//! 4. The same spans as (3), with the repair pipeline applied first.

mod coerce;
mod fences;
mod keys;
mod repair;
mod scan;

use serde_json::Value;
use tracing::debug;

use monologue_core::ToolCall;
use monologue_tools::ToolRegistry;

use coerce::coerce_and_validate;
use keys::{canonicalize_call_keys, mentions_tool_key};
use repair::{rewrite_single_quotes, strip_trailing_commas};
use scan::find_balanced_spans;

/// Extract every tool call recognized in `text`, trying strategies in order
/// and returning the first non-empty result.
#[must_use]
pub fn parse_tool_calls(text: &str, registry: &ToolRegistry) -> Vec<ToolCall> {
    let strategies: [fn(&str, &ToolRegistry) -> Vec<ToolCall>; 4] = [
        from_fenced_blocks,
        from_keyed_spans,
        from_all_spans,
        from_repaired_spans,
    ];

    for strategy in strategies {
        let calls = strategy(text, registry);
        if !calls.is_empty() {
            return calls;
        }
    }
    debug!("no tool calls recognized in model output");
    Vec::new()
}

fn from_fenced_blocks(text: &str, registry: &ToolRegistry) -> Vec<ToolCall> {
    fences::fenced_blocks(text)
        .iter()
        .filter_map(|block| serde_json::from_str::<Value>(block).ok())
        .filter_map(|value| build_call(value, registry))
        .collect()
}

fn from_keyed_spans(text: &str, registry: &ToolRegistry) -> Vec<ToolCall> {
    let spans = find_balanced_spans(text);
    spans
        .into_iter()
        .filter(|(start, end)| {
            serde_json::from_str::<Value>(&text[*start..*end])
                .ok()
                .and_then(|v| v.as_object().cloned())
                .is_some_and(|obj| mentions_tool_key(&obj))
        })
        .filter_map(|(start, end)| serde_json::from_str::<Value>(&text[start..end]).ok())
        .filter_map(|value| build_call(value, registry))
        .collect()
}

fn from_all_spans(text: &str, registry: &ToolRegistry) -> Vec<ToolCall> {
    find_balanced_spans(text)
        .into_iter()
        .filter_map(|(start, end)| serde_json::from_str::<Value>(&text[start..end]).ok())
        .filter(|value| value.as_object().is_some_and(mentions_tool_key))
        .filter_map(|value| build_call(value, registry))
        .collect()
}

fn from_repaired_spans(text: &str, registry: &ToolRegistry) -> Vec<ToolCall> {
    find_balanced_spans(text)
        .into_iter()
        .filter_map(|(start, end)| {
            let repaired = strip_trailing_commas(&rewrite_single_quotes(&text[start..end]));
            serde_json::from_str::<Value>(&repaired).ok()
        })
        .filter(|value| value.as_object().is_some_and(mentions_tool_key))
        .filter_map(|value| build_call(value, registry))
        .collect()
}

/// Canonicalize keys, resolve the tool name against the registry, normalize
/// per-tool argument aliases, and coerce/validate against its schema.
/// Returns `None` if the object isn't a recognizable, valid call — the
/// caller drops it and keeps any valid siblings.
fn build_call(value: Value, registry: &ToolRegistry) -> Option<ToolCall> {
    let mut obj = value.as_object()?.clone();
    canonicalize_call_keys(&mut obj);

    let raw_name = obj.get("tool_name")?.as_str()?.to_string();
    let canonical_name = resolve_tool_name(&raw_name, registry)?;
    let tool = registry.get(&canonical_name)?;

    let mut args = obj
        .get("tool_args")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    monologue_tools::normalize_args(&canonical_name, &mut args);

    if let Err(reason) = coerce_and_validate(&mut args, &tool.arg_schema(), &tool.required_args()) {
        debug!(tool = %canonical_name, reason, "dropping tool call that failed schema validation");
        return None;
    }

    Some(ToolCall::new(canonical_name, args))
}

fn resolve_tool_name(raw_name: &str, registry: &ToolRegistry) -> Option<String> {
    if registry.get(raw_name).is_some() {
        return Some(raw_name.to_string());
    }
    registry
        .names()
        .into_iter()
        .find(|name| name.eq_ignore_ascii_case(raw_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use monologue_tools::default_registry;

    #[test]
    fn parses_fenced_json_call() {
        let registry = default_registry();
        let text = "```json\n{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"hi\"}}\n```";
        let calls = parse_tool_calls(text, &registry);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "response");
        assert_eq!(calls[0].arg_str("text"), Some("hi"));
    }

    #[test]
    fn parses_inline_object_with_surrounding_prose() {
        let registry = default_registry();
        let text =
            "Sure, here you go: {\"tool\": \"response\", \"args\": {\"message\": \"done\"}} thanks";
        let calls = parse_tool_calls(text, &registry);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "response");
        assert_eq!(calls[0].arg_str("text"), Some("done"));
    }

    #[test]
    fn parses_single_quoted_trailing_comma_call() {
        let registry = default_registry();
        let text = "{'tool_name':'response','tool_args':{'text':'hello',}}";
        let calls = parse_tool_calls(text, &registry);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].arg_str("text"), Some("hello"));
    }

    #[test]
    fn drops_calls_for_unknown_tool_names() {
        let registry = default_registry();
        let text = "{\"tool_name\": \"does_not_exist\", \"tool_args\": {}}";
        assert!(parse_tool_calls(text, &registry).is_empty());
    }

    #[test]
    fn drops_calls_missing_required_arguments() {
        let registry = default_registry();
        let text = "{\"tool_name\": \"response\", \"tool_args\": {}}";
        assert!(parse_tool_calls(text, &registry).is_empty());
    }

    #[test]
    fn text_with_no_candidate_objects_yields_no_calls() {
        let registry = default_registry();
        assert!(parse_tool_calls("just plain prose, no calls here", &registry).is_empty());
    }

    #[test]
    fn case_insensitive_tool_name_resolves_to_canonical() {
        let registry = default_registry();
        let text = "{\"tool_name\": \"RESPONSE\", \"tool_args\": {\"text\": \"hi\"}}";
        let calls = parse_tool_calls(text, &registry);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "response");
    }
}
