//! Durable conversation log, one record per bot.
//!
//! Records are trimmed to the last [`MAX_MESSAGES`] entries and expire
//! thirty days after the last append. No failure escapes the
//! store: reads degrade to an empty conversation and every path is reported
//! through [`LoadOutcome`] / [`AppendOutcome`].

use std::rc::Rc;

use widget_types::{
    WidgetError,
    message::Message,
    record::{ConversationRecord, MAX_MESSAGES},
};

use crate::keys::StorageKeys;
use crate::ports::{Clock, StoragePort};

/// Result of reading a conversation
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A live record with at least one message
    Loaded(Vec<Message>),
    /// Nothing stored (or a live record with no messages)
    Empty,
    /// The record had passed its expiry and was deleted
    Expired,
    /// The stored payload could not be decoded; treated as empty
    CorruptionRecovered,
    /// The storage backend failed the read; treated as empty
    Unavailable,
}

impl LoadOutcome {
    pub fn messages(&self) -> &[Message] {
        match self {
            LoadOutcome::Loaded(messages) => messages,
            _ => &[],
        }
    }

    pub fn into_messages(self) -> Vec<Message> {
        match self {
            LoadOutcome::Loaded(messages) => messages,
            _ => Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOutcome::CorruptionRecovered | LoadOutcome::Unavailable)
    }
}

/// Result of appending a message
#[derive(Debug, Clone)]
pub enum AppendOutcome {
    /// The record was written; `retained` messages are now stored
    Persisted { retained: usize },
    /// The write failed (quota, storage disabled); nothing changed on disk
    NotPersisted(WidgetError),
}

impl AppendOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, AppendOutcome::Persisted { .. })
    }
}

pub struct ConversationStore {
    storage: Rc<dyn StoragePort>,
    clock: Rc<dyn Clock>,
    keys: StorageKeys,
}

impl ConversationStore {
    pub fn new(storage: Rc<dyn StoragePort>, clock: Rc<dyn Clock>, keys: StorageKeys) -> Self {
        Self { storage, clock, keys }
    }

    /// Storage key holding the record for `bot_id`.
    pub fn key_for(&self, bot_id: &str) -> String {
        self.keys.conversation(bot_id)
    }

    pub fn load(&self, bot_id: &str) -> LoadOutcome {
        self.read(bot_id).0
    }

    /// Append one message: read (degrading to empty), push, trim, refresh
    /// expiry and write the whole record back in a single call.
    pub fn append(&self, bot_id: &str, message: Message) -> AppendOutcome {
        let (_, mut record) = self.read(bot_id);
        record.push(message, self.clock.now_millis());

        let payload = match serde_json::to_string(&record) {
            Ok(payload) => payload,
            Err(e) => return AppendOutcome::NotPersisted(e.into()),
        };

        match self.storage.set(&self.key_for(bot_id), &payload) {
            Ok(()) => AppendOutcome::Persisted {
                retained: record.messages.len(),
            },
            Err(e) => {
                log::warn!("Conversation for {} not saved: {}", bot_id, e);
                AppendOutcome::NotPersisted(e)
            }
        }
    }

    /// Delete the record for `bot_id` unconditionally.
    pub fn clear(&self, bot_id: &str) {
        if let Err(e) = self.storage.remove(&self.key_for(bot_id)) {
            log::warn!("Conversation for {} not cleared: {}", bot_id, e);
        }
    }

    fn read(&self, bot_id: &str) -> (LoadOutcome, ConversationRecord) {
        let key = self.key_for(bot_id);
        let empty = ConversationRecord::new(bot_id);

        let raw = match self.storage.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (LoadOutcome::Empty, empty),
            Err(e) => {
                log::warn!("Conversation for {} unreadable: {}", bot_id, e);
                return (LoadOutcome::Unavailable, empty);
            }
        };

        let mut record = match serde_json::from_str::<ConversationRecord>(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Discarding corrupt conversation for {}: {}", bot_id, e);
                return (LoadOutcome::CorruptionRecovered, empty);
            }
        };
        record.bot_id = bot_id.to_string();

        if record.is_expired(self.clock.now_millis()) {
            log::info!("Conversation for {} expired", bot_id);
            self.clear(bot_id);
            return (LoadOutcome::Expired, empty);
        }

        // Records written by older builds may exceed the bound.
        if record.messages.len() > MAX_MESSAGES {
            let excess = record.messages.len() - MAX_MESSAGES;
            record.messages.drain(..excess);
        }

        if record.messages.is_empty() {
            (LoadOutcome::Empty, record)
        } else {
            (LoadOutcome::Loaded(record.messages.clone()), record)
        }
    }
}
