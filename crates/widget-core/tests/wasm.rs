//! WASM-target tests for widget-core.
//!
//! Runs the config merge, IdGenerator and EventBus under
//! wasm32-unknown-unknown via `wasm-pack test --node`. The id generator
//! draws its randomness from `crypto.getRandomValues` there.

use wasm_bindgen_test::*;

use std::rc::Rc;

use serde_json::json;
use widget_core::clock::{FixedClock, SystemClock};
use widget_core::config::{merge, resolve};
use widget_core::event_bus::EventBus;
use widget_core::ids::{IdGenerator, SUFFIX_LEN};
use widget_core::ports::Clock;
use widget_types::event::WidgetEvent;

// ─── Config merge ────────────────────────────────────────

#[wasm_bindgen_test]
fn merge_nested_objects() {
    let merged = merge(&json!({"a": 1, "b": {"x": 1}}), &json!({"b": {"y": 2}}));
    assert_eq!(merged, json!({"a": 1, "b": {"x": 1, "y": 2}}));
}

#[wasm_bindgen_test]
fn merge_replaces_arrays() {
    assert_eq!(merge(&json!({"a": [1, 2]}), &json!({"a": [3]})), json!({"a": [3]}));
}

#[wasm_bindgen_test]
fn resolve_layer_precedence() {
    let remote = json!({"appearance": {"primaryColor": "#000"}, "extra": 1});
    let inline = json!({"botId": "acme"});
    let config = resolve(Some(&remote), &inline).unwrap().into_config();
    assert_eq!(config.bot_id, "acme");
    assert_eq!(config.appearance.primary_color, "#000");
    assert_eq!(config.extra["extra"], json!(1));
}

// ─── IdGenerator ─────────────────────────────────────────

#[wasm_bindgen_test]
fn id_generator_format() {
    let ids = IdGenerator::new(Rc::new(FixedClock::new(42)));
    let id = ids.generate("sess");
    assert!(id.starts_with("sess_42_"), "got {}", id);
    assert_eq!(id.len(), "sess_42_".len() + SUFFIX_LEN);
}

#[wasm_bindgen_test]
fn system_clock_is_after_2020() {
    assert!(SystemClock.now_millis() > 1_577_836_800_000);
}

// ─── EventBus ────────────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(WidgetEvent::Opened);
    assert!(bus.has_pending());
    assert_eq!(bus.drain(), vec![WidgetEvent::Opened]);
    assert!(!bus.has_pending());
}
