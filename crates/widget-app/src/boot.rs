//! Widget assembly: storage, clock, remote config, webhook.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use serde_json::Value;

use widget_core::clock::SystemClock;
use widget_core::config::resolve;
use widget_core::keys::StorageKeys;
use widget_core::widget::{ChatWidget, WidgetDeps};
use widget_platform::http::{RemoteConfigClient, WebhookClient};
use widget_platform::storage::auto_detect_storage;
use widget_types::Result;

use crate::handle::WidgetHandle;

/// Delay before `behavior.autoOpen` opens the window
const AUTO_OPEN_DELAY_MS: u32 = 1_000;

/// Resolve configuration from the host's inline layer, start the widget and
/// schedule auto-open if configured.
pub async fn boot(inline: Value) -> Result<WidgetHandle> {
    let storage = auto_detect_storage();
    let deps = WidgetDeps {
        storage,
        clock: Rc::new(SystemClock),
        keys: StorageKeys::default(),
    };

    let config_base = resolve(None, &inline)?.config().config_base_url().to_string();
    let remote = RemoteConfigClient::new(config_base);

    let widget = ChatWidget::bootstrap(inline, deps, &remote).await?;
    let webhook = WebhookClient::from_config(widget.config());
    let auto_open = widget.config().behavior.auto_open;

    let handle = WidgetHandle::new(widget, webhook);
    if auto_open {
        let opener = handle.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(AUTO_OPEN_DELAY_MS).await;
            opener.open();
        });
    }
    Ok(handle)
}
