//! Widget core: persistence, identity, configuration and the chat controller.
//!
//! Everything here is platform-agnostic. Browser adapters implement the
//! traits in [`ports`] and live in `widget-platform`.

pub mod ports;
pub mod clock;
pub mod ids;
pub mod keys;
pub mod session;
pub mod store;
pub mod profile;
pub mod config;
pub mod event_bus;
pub mod widget;
