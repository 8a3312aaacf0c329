//! Conversation messages and the append-only history they live in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role a [`Message`] was authored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions — the assembled prompt, reminders, tool results.
    System,
    /// The human on the other end of the conversation.
    User,
    /// The model's own output.
    Assistant,
}

/// One entry in a conversation.
///
/// Immutable after construction: a [`History`] is only ever appended to,
/// never edited in place, so that replaying it always reproduces the same
/// prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who said this.
    pub role: Role,
    /// What was said.
    pub content: String,
    /// When it was appended.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Build a message with the given role, stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Convenience constructor for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Convenience constructor for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// An ordered, append-only sequence of [`Message`]s bound to one agent.
///
/// `History` IS the conversation: prompt assembly reads it front to back
/// and concatenates it after the system prompt every iteration. There is
/// no in-place mutation — only [`History::push`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    /// An empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Returns the new length.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len()
    }

    /// Number of messages currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no messages have been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// A read-only view over the messages in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// A snapshot copy, used for prompt assembly so the scheduler can keep
    /// writing to the live history while a previous snapshot is still being
    /// rendered into a prompt.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }
}
