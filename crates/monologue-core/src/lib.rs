#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Core data model shared across the monologue agent runtime.
//!
//! This crate has no async runtime or I/O dependency: it defines the
//! entities every other crate in the workspace builds on — [`Message`]s,
//! the [`History`] they accumulate in, and the [`ToolCall`]/[`ToolResponse`]
//! pair that the parser produces and the tool executor consumes.

mod canonical;
mod message;
mod tool_call;

pub use canonical::canonical_json;
pub use message::{History, Message, Role};
pub use tool_call::{ToolCall, ToolResponse};

/// Opaque identifier for one user-facing conversation.
///
/// Distinct from [`AgentId`] — a session may contain several agents
/// (the root agent plus any subordinates it spawns).
pub type SessionId = String;

/// Identifier for one agent within a session. The root agent is always `0`.
pub type AgentId = u32;

/// The root agent's id, fixed by convention.
pub const ROOT_AGENT_ID: AgentId = 0;
