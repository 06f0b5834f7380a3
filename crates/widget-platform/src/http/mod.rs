pub mod webhook;
pub mod remote_config;

pub use webhook::WebhookClient;
pub use remote_config::RemoteConfigClient;
