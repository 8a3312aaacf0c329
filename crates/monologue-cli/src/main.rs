//! Command-line front end for the monologue agent runtime: a thin client
//! that loads configuration, wires up the shared agent context, and drives
//! a monologue per user turn.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use monologue_core::AgentId;
use monologue_hooks::HookManager;
use monologue_llm::OpenAiCompatClient;
use monologue_runtime::{AgentContext, RuntimeSpawner, Scheduler, StreamSink};
use monologue_telemetry::{setup_logging, LogConfig, LogFormat};
use monologue_tools::default_registry;

/// monologue - a local, tool-using conversational agent runtime
#[derive(Parser)]
#[command(name = "monologue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file overlaying the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log lines as newline-delimited JSON instead of pretty text
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session, reading turns from stdin
    Chat,

    /// Run a single turn non-interactively and print the final answer
    Run {
        /// The user message to send
        message: String,
    },
}

struct StdoutSink;

impl StreamSink for StdoutSink {
    fn on_chunk(&self, _agent_id: AgentId, chunk: &str) {
        print!("{chunk}");
        let _ = std::io::stdout().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    let _ = setup_logging(&LogConfig::new(level).with_format(format));

    let config = monologue_config::load(cli.config.as_deref()).context("loading configuration")?;
    let workspace_root = std::env::current_dir().context("resolving workspace root")?;

    let llm = OpenAiCompatClient::new(config.llm.base_url.clone(), config.llm.api_key.clone());

    let context = Arc::new(AgentContext::new(
        uuid::Uuid::new_v4().to_string(),
        workspace_root,
        Arc::new(config),
        Arc::new(llm),
        Arc::new(default_registry()),
        Arc::new(HookManager::new()),
        Some(Arc::new(StdoutSink)),
    ));

    context
        .root_agent()
        .tool_context
        .set_subagent_spawner(Some(Arc::new(RuntimeSpawner::new(context.clone()))))
        .await;

    let scheduler = Scheduler::new(context);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Run { message } => {
            let answer = scheduler.run_turn(message).await;
            println!("\n{answer}");
        }
        Commands::Chat => run_chat(&scheduler).await?,
    }

    Ok(())
}

async fn run_chat(scheduler: &Scheduler) -> Result<()> {
    println!("monologue chat — type your message and press enter, Ctrl-D to quit.");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();
        let mut line = String::new();
        let read = stdin.read_line(&mut line).context("reading from stdin")?;
        if read == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let answer = scheduler.run_turn(line.to_string()).await;
        println!("\n{answer}\n");
    }
    Ok(())
}
