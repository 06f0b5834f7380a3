//! Anonymous session identity, one per browser origin.
//!
//! The token lives under a single global key, so every bot widget embedded
//! on the same origin shares it.

use std::rc::Rc;

use widget_types::record::SessionToken;

use crate::ids::IdGenerator;
use crate::keys::StorageKeys;
use crate::ports::StoragePort;

const SESSION_ID_PREFIX: &str = "sess";

pub struct SessionIdentity {
    storage: Rc<dyn StoragePort>,
    ids: IdGenerator,
    key: String,
}

impl SessionIdentity {
    pub fn new(storage: Rc<dyn StoragePort>, ids: IdGenerator, keys: &StorageKeys) -> Self {
        Self {
            storage,
            ids,
            key: keys.session(),
        }
    }

    /// Return the persisted token, creating and persisting one on first use.
    ///
    /// If storage cannot be read or written the token is still returned but
    /// only lives as long as the caller keeps it.
    pub fn get_or_create(&self) -> SessionToken {
        match self.storage.get(&self.key) {
            Ok(Some(existing)) if !existing.is_empty() => return SessionToken::new(existing),
            Ok(_) => {}
            Err(e) => log::warn!("Session token unreadable ({}), issuing a new one", e),
        }

        let token = self.ids.generate(SESSION_ID_PREFIX);
        if let Err(e) = self.storage.set(&self.key, &token) {
            log::warn!("Session token not persisted: {}", e);
        } else {
            log::debug!("Created session token {}", token);
        }
        SessionToken::new(token)
    }
}
