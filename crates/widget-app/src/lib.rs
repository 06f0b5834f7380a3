//! Chat widget: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer). It assembles the
//! browser adapters, boots the [`ChatWidget`](widget_core::widget::ChatWidget)
//! and hands the host page a [`WidgetHandle`] to render from.

mod boot;
mod handle;
mod script_tag;

use wasm_bindgen::prelude::*;

pub use boot::boot;
pub use handle::WidgetHandle;

/// Global the auto-initialised widget is published under
pub const GLOBAL_NAME: &str = "KhipuChat";

/// WASM entry point, runs when the module is instantiated.
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Chat widget starting...");
    script_tag::auto_init();
}

/// Programmatic start: `const chat = await init({ botId: "acme" })`.
#[wasm_bindgen]
pub async fn init(options: JsValue) -> Result<WidgetHandle, JsValue> {
    let inline = handle::from_js(&options)?;
    boot(inline).await.map_err(handle::to_js_error)
}
