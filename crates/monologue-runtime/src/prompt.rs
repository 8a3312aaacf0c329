//! System-prompt assembly. Tries a template render first and falls back to
//! a minimal fixed string if rendering fails, per the scheduler's step (b).

use monologue_tools::ToolRegistry;

/// Fallback string template, used when no richer template is configured or
/// rendering otherwise fails.
const FALLBACK_TEMPLATE: &str = "You are Agent {agent_id}. Available tools:\n{tools}\nUse the terminal response tool to deliver your final answer.";

/// A one-line addition every subordinate agent's prompt carries, instructing
/// it to signal completion via the task-done tool.
const TASK_DONE_INSTRUCTION: &str =
    "When your task is complete, call the task_done tool with your final answer.";

/// Assemble the system prompt for one iteration.
///
/// Root agents get the fallback template rendered with their id and the
/// tool catalog. Subordinates additionally get their override text prefixed
/// and the task-done instruction appended.
#[must_use]
pub fn build_system_prompt(
    agent_id: u32,
    system_prompt_override: &str,
    registry: &ToolRegistry,
) -> String {
    let tools = registry.describe_all();
    let base = FALLBACK_TEMPLATE
        .replace("{agent_id}", &agent_id.to_string())
        .replace("{tools}", &tools);

    if system_prompt_override.is_empty() {
        base
    } else {
        format!("{system_prompt_override}\n\n{base}\n\n{TASK_DONE_INSTRUCTION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monologue_tools::default_registry;

    #[test]
    fn root_prompt_has_no_override_or_task_done_instruction() {
        let registry = default_registry();
        let prompt = build_system_prompt(0, "", &registry);
        assert!(prompt.contains("Agent 0"));
        assert!(prompt.contains("response"));
        assert!(!prompt.contains(TASK_DONE_INSTRUCTION));
    }

    #[test]
    fn subordinate_prompt_includes_override_and_task_done_instruction() {
        let registry = default_registry();
        let prompt = build_system_prompt(1, "Summarize the attached document.", &registry);
        assert!(prompt.starts_with("Summarize the attached document."));
        assert!(prompt.contains(TASK_DONE_INSTRUCTION));
    }
}
