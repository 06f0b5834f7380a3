//! Port traits: the boundary between the widget core and the browser.
//!
//! These traits are defined here in `widget-core` (pure Rust).
//! Implementations live in `widget-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use serde_json::Value;
use widget_types::{
    Result,
    transport::{WebhookRequest, WebhookResponse},
};

// ─── Storage Port ────────────────────────────────────────────

/// Synchronous string key/value storage (`localStorage` semantics).
pub trait StoragePort {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, replacing any previous one in a single write
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Check if a key exists
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Clock Port ──────────────────────────────────────────────

pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

// ─── Webhook Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait WebhookPort {
    /// Deliver one user message and return the decoded reply.
    /// Non-2xx responses are errors.
    async fn send(&self, req: &WebhookRequest) -> Result<WebhookResponse>;
}

// ─── Remote Config Port ──────────────────────────────────────

#[async_trait(?Send)]
pub trait RemoteConfigPort {
    /// Fetch the per-bot configuration layer.
    /// `Ok(None)` means the bot has no remote configuration.
    async fn fetch(&self, bot_id: &str) -> Result<Option<Value>>;
}
