//! WASM-target tests for widget-types.
//!
//! Mirrors a subset of the native unit tests under wasm32-unknown-unknown
//! via `wasm-pack test --node`, where timestamps come from `Date.now()`.

use wasm_bindgen_test::*;

use serde_json::json;
use widget_types::config::*;
use widget_types::message::*;
use widget_types::record::*;
use widget_types::transport::*;

#[wasm_bindgen_test]
fn message_timestamp_parses() {
    let msg = Message::user("hola");
    assert!(chrono::DateTime::parse_from_rfc3339(&msg.timestamp).is_ok());
}

#[wasm_bindgen_test]
fn message_wire_format() {
    let msg = Message::bot_with_replies("Elige", vec![QuickReply::new("Sí", "yes")]);
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["sender"], "bot");
    assert_eq!(value["quickReplies"][0]["label"], "Sí");
}

#[wasm_bindgen_test]
fn record_trims_to_bound() {
    let mut record = ConversationRecord::new("acme");
    for i in 0..(MAX_MESSAGES + 1) {
        record.push(Message::at(Sender::User, format!("m{}", i), "t"), 0);
    }
    assert_eq!(record.messages.len(), MAX_MESSAGES);
    assert_eq!(record.messages[0].text, "m1");
}

#[wasm_bindgen_test]
fn config_partial_tree() {
    let config = WidgetConfig::from_tree(&json!({"botId": "acme"})).unwrap();
    assert_eq!(config.bot_id, "acme");
    assert_eq!(config.appearance.primary_color, "#6366F1");
}

#[wasm_bindgen_test]
fn webhook_response_reply() {
    let resp: WebhookResponse = serde_json::from_value(json!({
        "success": true,
        "data": { "message": { "text": "ok" } }
    }))
    .unwrap();
    assert_eq!(resp.into_reply().unwrap().message.text, "ok");
}
