//! `window.localStorage` backend.
//! Persistent per origin; synchronous; throws on quota or when disabled.

use web_sys::Storage;

use widget_core::ports::StoragePort;
use widget_types::{Result, WidgetError};

/// Key written and removed to check that storage accepts writes
const PROBE_KEY: &str = "__widget_storage_probe__";

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open `localStorage` and verify it accepts writes.
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| WidgetError::Storage("localStorage not available".to_string()))?;

        let local = Self { storage };
        local.set(PROBE_KEY, "1")?;
        local.remove(PROBE_KEY)?;
        Ok(local)
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| WidgetError::Storage(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
