//! Per-bot remote configuration: `GET <base>/<botId>.json`.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use widget_core::ports::RemoteConfigPort;
use widget_types::{Result, WidgetError};

pub struct RemoteConfigClient {
    base_url: String,
}

impl RemoteConfigClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, bot_id: &str) -> String {
        format!("{}/{}.json", self.base_url, bot_id)
    }
}

#[async_trait(?Send)]
impl RemoteConfigPort for RemoteConfigClient {
    async fn fetch(&self, bot_id: &str) -> Result<Option<Value>> {
        let url = self.url_for(bot_id);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        if response.status() == 404 {
            return Ok(None);
        }
        if !response.ok() {
            return Err(WidgetError::Transport {
                status: response.status(),
                message: format!("Config not found: {}", bot_id),
            });
        }

        let layer: Value = response
            .json()
            .await
            .map_err(|e| WidgetError::Config(e.to_string()))?;

        if layer.is_object() {
            Ok(Some(layer))
        } else {
            Err(WidgetError::Config(format!("{} is not a JSON object", url)))
        }
    }
}
