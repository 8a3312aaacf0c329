//! End-to-end scenarios driving the scheduler, executor, parser, and
//! router together against a scriptable fake backend, without a live
//! network dependency.

use std::sync::Arc;
use std::time::{Duration, Instant};

use monologue_config::RuntimeConfig;
use monologue_hooks::HookManager;
use monologue_llm::{FakeLlmClient, ScriptedReply};
use monologue_runtime::{AgentContext, Scheduler};
use monologue_tools::testing::{CounterTool, EchoTool, SleepTool};
use monologue_tools::ToolRegistry;

fn context(
    replies: Vec<ScriptedReply>,
    registry: ToolRegistry,
    config: RuntimeConfig,
) -> Arc<AgentContext> {
    Arc::new(AgentContext::new(
        "scenario-session",
        std::env::temp_dir(),
        Arc::new(config),
        Arc::new(FakeLlmClient::new(replies, vec!["llama3".to_string()])),
        Arc::new(registry),
        Arc::new(HookManager::new()),
        None,
    ))
}

fn registry_with_builtins() -> ToolRegistry {
    monologue_tools::default_registry()
}

/// S1: a well-formed tool call on the first iteration ends the monologue
/// with the terminal tool's message.
#[tokio::test]
async fn s1_happy_path_single_tool_call_ends_the_turn() {
    let ctx = context(
        vec![ScriptedReply::Text(
            "{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"the answer is 4\"}}"
                .to_string(),
        )],
        registry_with_builtins(),
        RuntimeConfig::default(),
    );
    let result = Scheduler::new(ctx).run_turn("what is 2+2?").await;
    assert_eq!(result, "the answer is 4");
}

/// S2: five consecutive tool-call-free replies trigger a reminder message,
/// after which the monologue can still terminate normally.
#[tokio::test]
async fn s2_reminder_fires_after_five_empty_iterations_then_recovers() {
    let mut replies: Vec<ScriptedReply> = (0..5)
        .map(|_| ScriptedReply::Text("rambling without a tool call".to_string()))
        .collect();
    replies.push(ScriptedReply::Text(
        "{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"done\"}}".to_string(),
    ));
    let ctx = context(replies, registry_with_builtins(), RuntimeConfig::default());
    let agent = ctx.root_agent();
    agent.push_history(monologue_core::Message::user("go"));
    let result = Scheduler::new(ctx.clone()).run_monologue(&agent).await;
    assert_eq!(result, "done");
    assert!(agent
        .history_snapshot()
        .iter()
        .any(|m| m.content.contains("Reminder:")));
}

/// S3: a batch of parallel-safe read-only calls finishes close to the
/// slowest single call, not the sum of all of them.
#[tokio::test]
async fn s3_parallel_safe_batch_runs_concurrently() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(SleepTool::new(
        "lookup_a",
        Duration::from_millis(80),
        true,
    )));
    registry.register(Box::new(SleepTool::new(
        "lookup_b",
        Duration::from_millis(80),
        true,
    )));
    registry.register(Box::new(monologue_tools::ResponseTool));

    let ctx = context(
        vec![
            ScriptedReply::Text(
                "{\"tool_name\": \"lookup_a\", \"tool_args\": {}}\n{\"tool_name\": \"lookup_b\", \"tool_args\": {}}".to_string(),
            ),
            ScriptedReply::Text("{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"both found\"}}".to_string()),
        ],
        registry,
        RuntimeConfig::default(),
    );

    let started = Instant::now();
    let result = Scheduler::new(ctx).run_turn("look both up").await;
    assert_eq!(result, "both found");
    assert!(started.elapsed() < Duration::from_millis(150));
}

/// S4: a call that exceeds its timeout produces the fixed bracketed
/// message shape and the monologue continues rather than failing outright.
#[tokio::test]
async fn s4_timed_out_call_surfaces_a_bracketed_message_and_continues() {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(SleepTool::new(
        "slow_lookup",
        Duration::from_millis(50),
        false,
    )));
    registry.register(Box::new(monologue_tools::ResponseTool));

    let mut config = RuntimeConfig::default();
    config
        .tool_timeout_overrides
        .insert("slow_lookup".to_string(), 0.01);

    let ctx = context(
        vec![
            ScriptedReply::Text("{\"tool_name\": \"slow_lookup\", \"tool_args\": {}}".to_string()),
            ScriptedReply::Text(
                "{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"gave up waiting\"}}"
                    .to_string(),
            ),
        ],
        registry,
        config,
    );
    let agent = ctx.root_agent();
    agent.push_history(monologue_core::Message::user("look it up"));
    let result = Scheduler::new(ctx.clone()).run_monologue(&agent).await;
    assert_eq!(result, "gave up waiting");
    assert!(agent
        .history_snapshot()
        .iter()
        .any(|m| m.content.contains("timed out after 0.01s")));
}

/// S5: a cacheable call repeated across iterations only executes the
/// underlying tool once.
#[tokio::test]
async fn s5_cacheable_call_executes_underlying_tool_once_across_iterations() {
    let counter = CounterTool::new();
    let count_handle = counter.count_handle();
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(counter));
    registry.register(Box::new(EchoTool));
    registry.register(Box::new(monologue_tools::ResponseTool));

    let ctx = context(
        vec![
            ScriptedReply::Text(
                "{\"tool_name\": \"counter\", \"tool_args\": {\"x\": 1}}".to_string(),
            ),
            ScriptedReply::Text(
                "{\"tool_name\": \"counter\", \"tool_args\": {\"x\": 1}}".to_string(),
            ),
            ScriptedReply::Text(
                "{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"cached twice\"}}"
                    .to_string(),
            ),
        ],
        registry,
        RuntimeConfig::default(),
    );

    let result = Scheduler::new(ctx).run_turn("count it").await;
    assert_eq!(result, "cached twice");
    assert_eq!(count_handle.load(std::sync::atomic::Ordering::SeqCst), 1);
}

/// S6: single-quoted keys and a trailing comma still parse and execute,
/// exercising the parser's repair strategy end to end.
#[tokio::test]
async fn s6_lenient_single_quoted_call_with_trailing_comma_still_executes() {
    let ctx = context(
        vec![ScriptedReply::Text(
            "Sure, let me respond: {'tool_name': 'response', 'tool_args': {'text': 'lenient win',}}".to_string(),
        )],
        registry_with_builtins(),
        RuntimeConfig::default(),
    );
    let result = Scheduler::new(ctx).run_turn("hello").await;
    assert_eq!(result, "lenient win");
}

/// S7: routing picks a model based on tool affinity ahead of content
/// heuristics, and the scheduler's selected model actually reaches the
/// backend's chat request.
#[tokio::test]
async fn s7_router_prefers_tool_affinity_over_content_heuristics() {
    let mut config = RuntimeConfig::default();
    config.router.enabled = true;
    config
        .router
        .tool_affinity
        .insert("shell".to_string(), "coding".to_string());
    config
        .router
        .routes
        .insert("coding".to_string(), "codellama".to_string());

    let ctx = context(
        vec![ScriptedReply::Text(
            "{\"tool_name\": \"response\", \"tool_args\": {\"text\": \"summarize this please\"}}"
                .to_string(),
        )],
        registry_with_builtins(),
        config,
    );
    let agent = ctx.root_agent();
    agent.set_last_tool_name(Some("shell".to_string()));
    agent.push_history(monologue_core::Message::user("summarize this please"));

    let model = ctx.router.select(
        &agent.history_snapshot(),
        agent.last_tool_name().as_deref(),
        &ctx.config.router,
        &ctx.config.llm.chat_model,
    );
    assert_eq!(model, "codellama");
}
