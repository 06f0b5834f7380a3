//! Free-form user profile persisted per bot (`<prefix>_chat_<botId>_user`).

use std::rc::Rc;

use widget_types::{Result, record::UserProfile};

use crate::keys::StorageKeys;
use crate::ports::StoragePort;

pub struct ProfileStore {
    storage: Rc<dyn StoragePort>,
    keys: StorageKeys,
}

impl ProfileStore {
    pub fn new(storage: Rc<dyn StoragePort>, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// The stored profile; missing, unreadable or non-object payloads read as empty.
    pub fn load(&self, bot_id: &str) -> UserProfile {
        let raw = match self.storage.get(&self.keys.profile(bot_id)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserProfile::new(),
            Err(e) => {
                log::warn!("User profile for {} unreadable: {}", bot_id, e);
                return UserProfile::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Discarding corrupt user profile for {}: {}", bot_id, e);
            UserProfile::new()
        })
    }

    pub fn save(&self, bot_id: &str, profile: &UserProfile) -> Result<()> {
        let payload = serde_json::to_string(profile)?;
        self.storage.set(&self.keys.profile(bot_id), &payload)
    }

    /// Shallow-merge `update` into the stored profile and persist the result.
    /// Returns the merged profile even when the write fails.
    pub fn update(&self, bot_id: &str, update: UserProfile) -> UserProfile {
        let mut profile = self.load(bot_id);
        profile.extend(update);
        if let Err(e) = self.save(bot_id, &profile) {
            log::warn!("User profile for {} not saved: {}", bot_id, e);
        }
        profile
    }
}
