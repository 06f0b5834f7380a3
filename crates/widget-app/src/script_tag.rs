//! Auto-initialisation from `<script src=".." data-bot-id="acme" data-color="#0EA5E9">`.
//!
//! The attributes form the host inline configuration layer. Once booted the
//! handle is published as `window.KhipuChat`.

use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::handle::WidgetHandle;
use crate::GLOBAL_NAME;

const SCRIPT_SELECTOR: &str = "script[data-bot-id]";

/// Boot from the script tag if present, waiting for the DOM when still loading.
pub fn auto_init() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::debug!("No document; skipping auto-init");
        return;
    };

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        let on_ready = Closure::once(move || start_from(&ready_document));
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            log::error!("Could not wait for DOMContentLoaded: {:?}", e);
        }
        on_ready.forget();
    } else {
        start_from(&document);
    }
}

fn start_from(document: &Document) {
    let Some(inline) = inline_config(document) else {
        log::debug!("No {} tag; waiting for init()", SCRIPT_SELECTOR);
        return;
    };

    wasm_bindgen_futures::spawn_local(async move {
        match crate::boot(inline).await {
            Ok(handle) => publish(handle),
            Err(e) => log::error!("Error initializing widget: {}", e),
        }
    });
}

/// Inline layer read from the script tag's data attributes.
fn inline_config(document: &Document) -> Option<Value> {
    let script = document.query_selector(SCRIPT_SELECTOR).ok().flatten()?;
    let bot_id = script.get_attribute("data-bot-id")?;

    let mut inline = json!({ "botId": bot_id });
    if let Some(color) = script.get_attribute("data-color") {
        inline["appearance"] = json!({ "primaryColor": color });
    }
    Some(inline)
}

fn publish(handle: WidgetHandle) {
    let Some(window) = web_sys::window() else {
        return;
    };
    match js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &JsValue::from(handle)) {
        Ok(_) => log::info!("Chat widget ready with public API (window.{})", GLOBAL_NAME),
        Err(e) => log::error!("Could not publish window.{}: {:?}", GLOBAL_NAME, e),
    }
}
