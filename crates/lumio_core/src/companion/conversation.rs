//! Chat transcript with a simulated "Novi is typing" pause.
//!
//! Sending a message appends it immediately and schedules one companion
//! reply after a short random delay. A new message sent while a reply is
//! pending replaces the pending reply, so only the latest message gets
//! answered.

use crate::companion::novi::generate_novi_response_with;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Suggested openers shown on the empty chat screen.
pub const PROMPT_CHIPS: [&str; 3] = ["I feel overwhelmed", "I need clarity", "Help me reflect"];

/// Empty-state copy.
pub const EMPTY_STATE_TITLE: &str = "I'm here with you.";
pub const EMPTY_STATE_SUBTITLE: &str = "We can take this one thought at a time.";

/// Range of the simulated thinking pause in milliseconds.
pub const THINKING_DELAY_MS: Range<i64> = 600..900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Companion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingReply {
    prompt: String,
    due_at: i64,
}

/// In-memory transcript for one chat screen session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: Option<PendingReply>,
    next_seq: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the companion reply is still being "typed".
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the empty state (with prompt chips) should be shown.
    pub fn shows_empty_state(&self) -> bool {
        self.messages.is_empty() && !self.is_typing()
    }

    /// Due time of the pending reply, if any.
    pub fn reply_due_at(&self) -> Option<i64> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    /// Appends a user message and schedules the reply.
    ///
    /// Blank input is ignored and returns `false`.
    pub fn send<R: Rng + ?Sized>(&mut self, text: &str, now_ms: i64, rng: &mut R) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        self.push(ChatRole::User, text.to_string(), now_ms);
        self.pending = Some(PendingReply {
            prompt: text.to_string(),
            due_at: now_ms + rng.gen_range(THINKING_DELAY_MS),
        });
        true
    }

    /// Delivers the pending reply once its delay has elapsed.
    ///
    /// Returns the appended companion message, if one was delivered.
    pub fn poll<R: Rng + ?Sized>(&mut self, now_ms: i64, rng: &mut R) -> Option<&ChatMessage> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.due_at <= now_ms);
        if !due {
            return None;
        }

        let pending = self.pending.take()?;
        let reply = generate_novi_response_with(&pending.prompt, rng);
        self.push(ChatRole::Companion, reply, now_ms);
        self.messages.last()
    }

    fn push(&mut self, role: ChatRole, content: String, now_ms: i64) {
        self.next_seq += 1;
        let prefix = match role {
            ChatRole::User => "user",
            ChatRole::Companion => "assistant",
        };
        self.messages.push(ChatMessage {
            id: format!("{prefix}_{now_ms}_{}", self.next_seq),
            role,
            content,
            created_at: now_ms,
        });
    }
}
