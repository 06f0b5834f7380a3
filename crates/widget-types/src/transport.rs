//! Wire types for the outbound webhook.

use serde::{Deserialize, Serialize};

use crate::message::QuickReply;
use crate::record::UserProfile;

/// Value of `metadata.source` on every outbound request
pub const MESSAGE_SOURCE: &str = "web_widget";

const SESSION_ID_FIELD: &str = "sessionId";

/// Body POSTed to the configured webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub message: OutboundMessage,
    pub user: UserRef,
    pub context: RequestContext,
    pub metadata: RequestMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub session_id: String,
    /// Host-supplied profile fields, sent alongside the session id
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl UserRef {
    /// Profile fields named like the session id are dropped so the
    /// serialized object carries exactly one `sessionId`.
    pub fn new(session_id: impl Into<String>, mut profile: UserProfile) -> Self {
        profile.remove(SESSION_ID_FIELD);
        Self {
            session_id: session_id.into(),
            profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub conversation_id: String,
    pub current_page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    pub bot_id: String,
    pub source: String,
}

/// Webhook reply: `{ "success": true, "data": { "message": { "text": .. }, "quickReplies": [..] } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<WebhookReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookReply {
    pub message: ReplyText,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyText {
    pub text: String,
}

impl WebhookResponse {
    /// The bot reply, if the webhook reported success and sent one.
    pub fn into_reply(self) -> Option<WebhookReply> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}
