use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum WidgetError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Transport error: HTTP {status}: {message}")]
    Transport { status: u16, message: String },

    #[error("Webhook rejected the message")]
    RemoteRejected,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl From<serde_json::Error> for WidgetError {
    fn from(e: serde_json::Error) -> Self {
        WidgetError::Serialization(e.to_string())
    }
}
