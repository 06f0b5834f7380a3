use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Events emitted by the widget controller.
/// The host renderer drains these to update the DOM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WidgetEvent {
    /// Configuration resolved and history loaded
    Ready { history_len: usize },

    /// Chat window opened
    Opened,

    /// Chat window closed
    Closed,

    /// Message list collapsed or restored
    Minimized { minimized: bool },

    /// A message was added to the transcript
    MessageAdded { message: Message },

    /// Waiting on the webhook
    TypingStarted,

    /// Webhook answered (or failed)
    TypingStopped,

    /// Unread counter changed; `badge` is the label to render, if any
    UnreadChanged { count: u32, badge: Option<String> },

    /// Quick replies of the message at `index` were used and should be removed
    QuickRepliesConsumed { index: usize },

    /// History was cleared
    HistoryCleared,

    /// The webhook call failed
    SendFailed { message: String },
}
