//! The monologue scheduler: prompt assembly, lenient tool-call parsing,
//! model routing, concurrent tool execution, and hook dispatch tied
//! together into the bounded agent loop.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod context;
mod error;
mod executor;
mod parser;
mod prompt;
mod router;
mod scheduler;

pub use context::{Agent, AgentContext, StreamSink};
pub use error::{RuntimeError, RuntimeResult};
pub use executor::{ExecutedCall, ToolExecutor};
pub use parser::parse_tool_calls;
pub use prompt::build_system_prompt;
pub use router::ModelRouter;
pub use scheduler::{RuntimeSpawner, Scheduler};
