//! The top-level monologue state machine: assemble prompt, stream the
//! model, parse tool calls, execute them, and decide whether to continue
//! or terminate (C6 in the design doc this crate implements).

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use monologue_core::{AgentId, Message};
use monologue_llm::{ChatRequest, StreamEvent};
use monologue_telemetry::{LlmCallMetric, LoopIterationMetric};
use monologue_tools::{SubAgentRequest, SubAgentResult, SubAgentSpawner};

use crate::context::{Agent, AgentContext};
use crate::parser::parse_tool_calls;
use crate::prompt::build_system_prompt;

/// Fixed reminder text injected after `no_tool_reminder_threshold`
/// consecutive iterations produce no recognizable tool call.
const REMINDER_TEXT: &str = "Reminder: You must use a tool call JSON to proceed. Example: {\"tool_name\": \"response\", \"tool_args\": {\"text\": \"your final answer\"}}";

/// Fixed fallback text returned when a monologue exhausts its iteration cap
/// without reaching a terminal tool call.
const MAX_ITERATIONS_FALLBACK: &str =
    "[Monologue ended: maximum iterations reached without a terminal tool call]";

/// Drives one monologue turn to completion for a given agent.
pub struct Scheduler {
    context: Arc<AgentContext>,
}

impl Scheduler {
    /// Bind a scheduler to a session's shared context.
    #[must_use]
    pub fn new(context: Arc<AgentContext>) -> Self {
        Self { context }
    }

    /// Run the root agent's monologue for one incoming user message.
    pub async fn run_turn(&self, user_message: impl Into<String>) -> String {
        let agent = self.context.root_agent();
        agent.push_history(Message::user(user_message));
        self.run_monologue(&agent).await
    }

    /// Run an agent's monologue loop until a terminal tool call or the
    /// iteration cap is reached.
    pub async fn run_monologue(&self, agent: &Arc<Agent>) -> String {
        let ctx = &self.context;
        self.context.hooks.dispatch_message_loop_start().await;

        let mut no_tool_count: u32 = 0;

        for iteration in 1..=ctx.config.max_monologue_iterations {
            ctx.hooks.dispatch_message_loop_prompts_before().await;

            let system_prompt =
                build_system_prompt(agent.agent_id, &agent.system_prompt_override, &ctx.registry);
            let mut messages = vec![Message::system(system_prompt)];
            messages.extend(agent.history_snapshot());

            if let Some(overridden) = ctx.hooks.dispatch_before_llm_call(&messages).await {
                messages = overridden;
            }

            ctx.router.ensure_models(ctx.llm.as_ref()).await;
            let model = ctx.router.select(
                &messages,
                agent.last_tool_name().as_deref(),
                &ctx.config.router,
                &ctx.config.llm.chat_model,
            );

            let full_response = match self.stream_turn(&model, messages, agent.agent_id).await {
                Ok(text) => text,
                Err(bracketed) => return bracketed,
            };

            ctx.hooks.dispatch_after_llm_call(&full_response).await;
            agent.push_history(Message::assistant(full_response.clone()));

            let tool_calls = parse_tool_calls(&full_response, &ctx.registry);

            if tool_calls.is_empty() {
                ctx.telemetry.record_iteration(LoopIterationMetric {
                    iteration,
                    had_tool_calls: false,
                });
                no_tool_count += 1;
                if no_tool_count >= ctx.config.no_tool_reminder_threshold {
                    agent.push_history(Message::system(REMINDER_TEXT));
                    no_tool_count = 0;
                }
                continue;
            }

            ctx.telemetry.record_iteration(LoopIterationMetric {
                iteration,
                had_tool_calls: true,
            });
            no_tool_count = 0;

            let results = ctx
                .executor
                .execute_batch(
                    tool_calls,
                    &ctx.registry,
                    &agent.tool_context,
                    &ctx.config,
                    &ctx.hooks,
                    &ctx.telemetry,
                )
                .await;

            let mut terminal: Option<(String, String)> = None;
            for (call, response, _cached) in results {
                agent.push_history(Message::system(format!(
                    "[Tool '{}' result]:\n{}",
                    call.name, response.message
                )));
                agent.set_last_tool_name(Some(call.name.clone()));
                if response.break_loop && terminal.is_none() {
                    terminal = Some((call.name.clone(), response.message));
                }
            }

            if let Some((tool_name, text)) = terminal {
                ctx.hooks.dispatch_monologue_end(&text).await;
                ctx.telemetry.finalize(&tool_name);
                return text;
            }
        }

        ctx.hooks
            .dispatch_monologue_end(MAX_ITERATIONS_FALLBACK)
            .await;
        ctx.telemetry.finalize("max_iterations");
        MAX_ITERATIONS_FALLBACK.to_string()
    }

    /// Stream one LLM call to completion, forwarding chunks to the context's
    /// stream sink. `Ok` carries the concatenated text; `Err` carries the
    /// bracketed failure string the caller should return immediately.
    async fn stream_turn(
        &self,
        model: &str,
        messages: Vec<Message>,
        agent_id: AgentId,
    ) -> Result<String, String> {
        let ctx = &self.context;
        let request = ChatRequest::new(model, messages);

        let mut stream = match ctx.llm.stream_chat(request).await {
            Ok(stream) => stream,
            Err(error) => {
                let bracketed = error.as_bracketed();
                ctx.telemetry.record_llm_call(LlmCallMetric {
                    model: model.to_string(),
                    input_tokens: 0,
                    output_tokens: 0,
                    duration_ms: 0,
                    error: Some(bracketed.clone()),
                });
                return Err(bracketed);
            }
        };

        let started = std::time::Instant::now();
        let mut full_response = String::new();
        let mut input_tokens = 0usize;
        let mut output_tokens = 0usize;

        while let Some(event) = stream.next().await {
            match event {
                Ok(StreamEvent::TextDelta(delta)) => {
                    if let Some(sink) = &ctx.on_stream {
                        sink.on_chunk(agent_id, &delta);
                    }
                    full_response.push_str(&delta);
                }
                Ok(StreamEvent::Usage {
                    input_tokens: input,
                    output_tokens: output,
                }) => {
                    input_tokens = input;
                    output_tokens = output;
                }
                Ok(StreamEvent::Done) => break,
                Err(error) => {
                    let bracketed = error.as_bracketed();
                    ctx.telemetry.record_llm_call(LlmCallMetric {
                        model: model.to_string(),
                        input_tokens,
                        output_tokens: 0,
                        duration_ms: u64::try_from(started.elapsed().as_millis())
                            .unwrap_or(u64::MAX),
                        error: Some(bracketed.clone()),
                    });
                    return Err(bracketed);
                }
            }
        }

        ctx.telemetry.record_llm_call(LlmCallMetric {
            model: model.to_string(),
            input_tokens,
            output_tokens,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            error: None,
        });

        Ok(full_response)
    }
}

/// Implements the tools crate's [`SubAgentSpawner`] contract by spawning a
/// subordinate agent in the same context and driving its monologue to
/// completion, without the tools crate depending on the scheduler.
pub struct RuntimeSpawner {
    context: Arc<AgentContext>,
}

impl RuntimeSpawner {
    /// Bind a spawner to a session's shared context.
    #[must_use]
    pub fn new(context: Arc<AgentContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl SubAgentSpawner for RuntimeSpawner {
    async fn spawn(&self, request: SubAgentRequest) -> SubAgentResult {
        let parent_id = self.context.root_agent().agent_id;
        let Some(subordinate) = self.context.spawn_subordinate(parent_id, request.task) else {
            return SubAgentResult {
                text: "[Tool 'task' error: parent agent no longer exists]".to_string(),
            };
        };
        let scheduler = Scheduler::new(self.context.clone());
        let text = scheduler.run_monologue(&subordinate).await;
        SubAgentResult { text }
    }
}
