//! Namespaced storage keys.
//!
//!   <prefix>_chat_<botId>       → conversation record
//!   <prefix>_chat_<botId>_user  → user profile
//!   <prefix>_session            → session token (shared by every bot on the origin)

pub const DEFAULT_KEY_PREFIX: &str = "khipu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    prefix: String,
}

impl StorageKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn conversation(&self, bot_id: &str) -> String {
        format!("{}_chat_{}", self.prefix, bot_id)
    }

    pub fn profile(&self, bot_id: &str) -> String {
        format!("{}_user", self.conversation(bot_id))
    }

    pub fn session(&self) -> String {
        format!("{}_session", self.prefix)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}
