pub mod message;
pub mod event;
pub mod record;
pub mod config;
pub mod error;
pub mod transport;


pub use error::WidgetError;
pub type Result<T> = std::result::Result<T, WidgetError>;
