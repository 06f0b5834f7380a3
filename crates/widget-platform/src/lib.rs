//! Browser adapters for the widget core.
//!
//! - [`storage`]: `localStorage` and in-memory implementations of `StoragePort`
//! - [`http`]: webhook transport and remote config fetch over `fetch()`
//! - [`page`]: facts about the hosting page

pub mod storage;
pub mod http;
pub mod page;
