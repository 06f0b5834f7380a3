//! Webhook transport.
//!
//! POSTs each user message as JSON with the bot's `X-Client-Token` header.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;

use widget_core::ports::WebhookPort;
use widget_types::{
    Result, WidgetError,
    config::WidgetConfig,
    transport::{WebhookRequest, WebhookResponse},
};

pub const CLIENT_TOKEN_HEADER: &str = "X-Client-Token";

pub struct WebhookClient {
    url: String,
    client_token: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, client_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_token: client_token.into(),
        }
    }

    /// Endpoint and token from `integration.webhookUrl` (or `apiUrl`) and `integration.clientToken`.
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.webhook_url(), config.client_token())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl WebhookPort for WebhookClient {
    async fn send(&self, req: &WebhookRequest) -> Result<WebhookResponse> {
        let response = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .header(CLIENT_TOKEN_HEADER, &self.client_token)
            .json(req)
            .map_err(|e| WidgetError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(WidgetError::Transport {
                status: response.status(),
                message: response.status_text(),
            });
        }

        response
            .json::<WebhookResponse>()
            .await
            .map_err(|e| WidgetError::Serialization(e.to_string()))
    }
}
