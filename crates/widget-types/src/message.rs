use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A predefined answer attached to a bot message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl QuickReply {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    /// ISO-8601, UTC, millisecond precision
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quick_replies: Option<Vec<QuickReply>>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::at(Sender::User, text, now_iso8601())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::at(Sender::Bot, text, now_iso8601())
    }

    pub fn bot_with_replies(text: impl Into<String>, replies: Vec<QuickReply>) -> Self {
        Self::bot(text).with_quick_replies(replies)
    }

    /// Attach quick replies; an empty list leaves the message without any.
    pub fn with_quick_replies(mut self, replies: Vec<QuickReply>) -> Self {
        self.quick_replies = (!replies.is_empty()).then_some(replies);
        self
    }

    /// Build a message with an explicit timestamp.
    pub fn at(sender: Sender, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: timestamp.into(),
            quick_replies: None,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        self.quick_replies.as_deref().unwrap_or(&[])
    }
}

/// Current instant in the `Date.prototype.toISOString` format.
pub fn now_iso8601() -> String {
    iso8601_from_millis(Utc::now().timestamp_millis())
}

/// Epoch milliseconds in the `Date.prototype.toISOString` format.
/// Out-of-range values clamp to the epoch.
pub fn iso8601_from_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
