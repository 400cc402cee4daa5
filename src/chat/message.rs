use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Bot => write!(f, "bot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(id: u64, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self::new(id, Role::User, content)
    }

    pub fn bot(id: u64, content: impl Into<String>) -> Self {
        Self::new(id, Role::Bot, content)
    }

    /// Wall-clock time of creation in the local timezone, e.g. `14:03:27`.
    pub fn display_time(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Ordered, append-only record of a conversation.
///
/// The log is never modified in place: [`MessageLog::append`] returns a new
/// log and leaves the receiver untouched, so earlier snapshots stay valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    entries: Arc<Vec<ChatMessage>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, message: ChatMessage) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(message);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Next message id: the current time in milliseconds, bumped past the
    /// last entry so ids stay strictly increasing within the log. Saturates at
    /// `u64::MAX`.
    pub fn next_id(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        match self.entries.last() {
            Some(last) if last.id >= now => last.id.saturating_add(1),
            _ => now,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }

    pub fn last_bot(&self) -> Option<&ChatMessage> {
        self.entries.iter().rev().find(|m| m.role == Role::Bot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.entries
    }
}
