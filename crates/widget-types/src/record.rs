use std::fmt;

use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Maximum number of messages retained per conversation
pub const MAX_MESSAGES: usize = 50;

/// Conversation lifetime after the last append: 30 days
pub const CONVERSATION_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// The persisted conversation for one bot identity.
///
/// Serialized as `{ "messages": [...], "expiresAt": <epoch-ms> }`; the bot id
/// is carried by the storage key, not the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    #[serde(skip)]
    pub bot_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Records written without an expiry never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl ConversationRecord {
    pub fn new(bot_id: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            messages: Vec::new(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self.expires_at, Some(at) if now_ms > at)
    }

    /// Append a message, drop the oldest entries beyond [`MAX_MESSAGES`]
    /// and push the expiry out to `now + CONVERSATION_TTL_MS`.
    pub fn push(&mut self, message: Message, now_ms: i64) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
        self.expires_at = Some(now_ms + CONVERSATION_TTL_MS);
    }
}

/// Anonymous token identifying one browser instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form user data supplied by the host page (name, email, ...)
pub type UserProfile = serde_json::Map<String, serde_json::Value>;
