//! JavaScript-facing handle over a running widget.
//!
//! The host renderer calls `drainEvents()` / `messages()` to paint the DOM
//! and forwards user input through `sendMessage` / `selectQuickReply`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use widget_core::ports::WebhookPort;
use widget_core::widget::ChatWidget;
use widget_platform::http::WebhookClient;
use widget_platform::page::current_path;
use widget_types::{record::UserProfile, transport::WebhookRequest, WidgetError};

#[wasm_bindgen]
#[derive(Clone)]
pub struct WidgetHandle {
    widget: Rc<RefCell<ChatWidget>>,
    webhook: Rc<WebhookClient>,
}

impl WidgetHandle {
    pub fn new(widget: ChatWidget, webhook: WebhookClient) -> Self {
        Self {
            widget: Rc::new(RefCell::new(widget)),
            webhook: Rc::new(webhook),
        }
    }

    /// Await the webhook for a request built by the widget, then record the outcome.
    fn round_trip(&self, req: Option<WebhookRequest>) -> Promise {
        let widget = self.widget.clone();
        let webhook = self.webhook.clone();
        future_to_promise(async move {
            let Some(req) = req else {
                return Ok(JsValue::UNDEFINED);
            };
            let result = webhook.send(&req).await;
            widget
                .borrow_mut()
                .finish_send(result)
                .map(|()| JsValue::UNDEFINED)
                .map_err(to_js_error)
        })
    }
}

#[wasm_bindgen]
impl WidgetHandle {
    pub fn open(&self) {
        self.widget.borrow_mut().open();
    }

    pub fn close(&self) {
        self.widget.borrow_mut().close();
    }

    pub fn toggle(&self) {
        self.widget.borrow_mut().toggle();
    }

    pub fn minimize(&self) {
        self.widget.borrow_mut().minimize();
    }

    /// Send `text` as the user. Resolves once the reply (or the error
    /// message) is in the transcript; rejects if the webhook call failed.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, text: String) -> Promise {
        let req = self.widget.borrow_mut().begin_send(&text, &current_path());
        self.round_trip(req)
    }

    #[wasm_bindgen(js_name = selectQuickReply)]
    pub fn select_quick_reply(&self, index: usize, reply: usize) -> Promise {
        let req = self
            .widget
            .borrow_mut()
            .select_quick_reply(index, reply, &current_path());
        self.round_trip(req)
    }

    #[wasm_bindgen(js_name = setUser)]
    pub fn set_user(&self, user: JsValue) -> Result<(), JsValue> {
        let update: UserProfile = from_js(&user)?;
        self.widget.borrow_mut().set_user(update);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&self) {
        self.widget.borrow_mut().clear_history();
    }

    pub fn messages(&self) -> Result<JsValue, JsValue> {
        to_js(self.widget.borrow().messages())
    }

    /// Effective configuration, unknown keys included.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        to_js(self.widget.borrow().config())
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        let events = self.widget.borrow().event_bus.drain();
        to_js(&events)
    }

    #[wasm_bindgen(js_name = unreadBadge)]
    pub fn unread_badge(&self) -> Option<String> {
        self.widget.borrow().unread_badge()
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.widget.borrow().state.is_open
    }

    #[wasm_bindgen(js_name = sessionId)]
    pub fn session_id(&self) -> String {
        self.widget.borrow().session_token().to_string()
    }

    #[wasm_bindgen(js_name = conversationId)]
    pub fn conversation_id(&self) -> String {
        self.widget.borrow().conversation_id().to_string()
    }
}

pub(crate) fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    value
        .into_serde()
        .map_err(|e| to_js_error(WidgetError::JsInterop(e.to_string())))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(|e| to_js_error(WidgetError::JsInterop(e.to_string())))
}

pub(crate) fn to_js_error(e: WidgetError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
