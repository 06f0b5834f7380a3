//! Chat widget controller.
//!
//! Owns the transcript and the open/minimized/unread state, persists every
//! message through the [`ConversationStore`], and drives one webhook round
//! trip per user message:
//! 1. Append the user message and emit `TypingStarted`
//! 2. POST it to the webhook
//! 3. Append the bot reply, or the configured error text if the call failed
//!
//! The send is split into [`ChatWidget::begin_send`] and
//! [`ChatWidget::finish_send`] so callers sharing the widget through
//! `Rc<RefCell<_>>` never hold a borrow across the network await.

use std::rc::Rc;

use serde_json::Value;
use widget_types::{
    Result, WidgetError,
    config::WidgetConfig,
    event::WidgetEvent,
    message::{iso8601_from_millis, Message, Sender},
    record::{SessionToken, UserProfile},
    transport::{
        OutboundMessage, RequestContext, RequestMetadata, UserRef, WebhookRequest,
        WebhookResponse, MESSAGE_SOURCE,
    },
};

use crate::config::resolve;
use crate::event_bus::EventBus;
use crate::ids::IdGenerator;
use crate::keys::StorageKeys;
use crate::ports::{Clock, RemoteConfigPort, StoragePort, WebhookPort};
use crate::profile::ProfileStore;
use crate::session::SessionIdentity;
use crate::store::{ConversationStore, LoadOutcome};

const CONVERSATION_ID_PREFIX: &str = "conv";

/// Unread counts above this render as "9+"
const BADGE_CAP: u32 = 9;

/// Collaborators the widget needs from the platform
#[derive(Clone)]
pub struct WidgetDeps {
    pub storage: Rc<dyn StoragePort>,
    pub clock: Rc<dyn Clock>,
    pub keys: StorageKeys,
}

/// Window state mirrored by the host renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub is_open: bool,
    pub is_minimized: bool,
    pub unread: u32,
    pub awaiting_reply: bool,
}

pub struct ChatWidget {
    pub event_bus: EventBus,
    pub state: WidgetState,
    config: WidgetConfig,
    messages: Vec<Message>,
    session: SessionToken,
    conversation_id: String,
    history: LoadOutcome,
    profile: UserProfile,
    store: ConversationStore,
    profiles: ProfileStore,
    clock: Rc<dyn Clock>,
}

impl ChatWidget {
    /// Resolve configuration (fetching the remote layer for named bots) and start the widget.
    pub async fn bootstrap(
        inline: Value,
        deps: WidgetDeps,
        remote: &dyn RemoteConfigPort,
    ) -> Result<Self> {
        let preliminary = resolve(None, &inline)?;
        let bot_id = preliminary.config().bot_id.clone();

        let remote_layer = if preliminary.config().has_remote_config() {
            match remote.fetch(&bot_id).await {
                Ok(Some(layer)) => {
                    log::info!("Loaded remote config for {}", bot_id);
                    Some(layer)
                }
                Ok(None) => {
                    log::info!("No remote config for {}", bot_id);
                    None
                }
                Err(e) => {
                    log::warn!("Could not load remote config, using defaults: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let resolver = resolve(remote_layer.as_ref(), &inline)?;
        Ok(Self::start(resolver.into_config(), deps))
    }

    /// Start with an already resolved configuration: obtain the session,
    /// load history, and seed the welcome message into an empty transcript.
    pub fn start(config: WidgetConfig, deps: WidgetDeps) -> Self {
        let ids = IdGenerator::new(deps.clock.clone());
        let session = SessionIdentity::new(deps.storage.clone(), ids.clone(), &deps.keys)
            .get_or_create();
        let conversation_id = ids.generate(CONVERSATION_ID_PREFIX);

        let store = ConversationStore::new(
            deps.storage.clone(),
            deps.clock.clone(),
            deps.keys.clone(),
        );
        let profiles = ProfileStore::new(deps.storage, deps.keys);

        let history = store.load(&config.bot_id);
        if history.is_degraded() {
            log::warn!("Conversation history for {} reset ({:?})", config.bot_id, history);
        }
        let profile = profiles.load(&config.bot_id);

        let mut widget = Self {
            event_bus: EventBus::new(),
            state: WidgetState::default(),
            messages: history.messages().to_vec(),
            config,
            session,
            conversation_id,
            history,
            profile,
            store,
            profiles,
            clock: deps.clock,
        };

        if widget.messages.is_empty() {
            let welcome = widget.stamp(Sender::Bot, widget.config.messages.welcome.clone());
            widget.add_message(welcome);
        }

        log::info!(
            "Chat widget ready for {} ({} messages)",
            widget.config.bot_id,
            widget.messages.len()
        );
        widget.event_bus.emit(WidgetEvent::Ready {
            history_len: widget.messages.len(),
        });
        widget
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session_token(&self) -> &SessionToken {
        &self.session
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// How the persisted history was obtained at start
    pub fn history_outcome(&self) -> &LoadOutcome {
        &self.history
    }

    pub fn user(&self) -> &UserProfile {
        &self.profile
    }

    // ─── Window state ────────────────────────────────────────

    pub fn open(&mut self) {
        self.state.is_open = true;
        self.state.is_minimized = false;
        self.event_bus.emit(WidgetEvent::Opened);
        self.set_unread(0);
    }

    pub fn close(&mut self) {
        self.state.is_open = false;
        self.event_bus.emit(WidgetEvent::Closed);
    }

    pub fn toggle(&mut self) {
        if self.state.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn minimize(&mut self) {
        self.state.is_minimized = !self.state.is_minimized;
        self.event_bus.emit(WidgetEvent::Minimized {
            minimized: self.state.is_minimized,
        });
    }

    /// Label for the unread badge, if it should be shown
    pub fn unread_badge(&self) -> Option<String> {
        badge_label(self.state.unread)
    }

    fn set_unread(&mut self, count: u32) {
        if self.state.unread == count {
            return;
        }
        self.state.unread = count;
        self.event_bus.emit(WidgetEvent::UnreadChanged {
            count,
            badge: badge_label(count),
        });
    }

    // ─── Transcript ──────────────────────────────────────────

    /// Append a message to the transcript and persist it.
    pub fn add_message(&mut self, message: Message) {
        let is_bot = message.is_bot();
        self.persist(message.clone());
        self.event_bus.emit(WidgetEvent::MessageAdded { message });

        if !self.state.is_open && is_bot {
            self.set_unread(self.state.unread + 1);
        }
    }

    /// A new message timestamped by the widget's clock.
    pub fn stamp(&self, sender: Sender, text: impl Into<String>) -> Message {
        Message::at(sender, text, iso8601_from_millis(self.clock.now_millis()))
    }

    fn persist(&mut self, message: Message) {
        log::debug!("{:?} message for {}", message.sender, self.config.bot_id);
        let outcome = self.store.append(&self.config.bot_id, message.clone());
        if !outcome.is_persisted() {
            log::debug!("Message kept in memory only: {:?}", outcome);
        }
        self.messages.push(message);
    }

    pub fn clear_history(&mut self) {
        self.store.clear(&self.config.bot_id);
        self.messages.clear();
        self.event_bus.emit(WidgetEvent::HistoryCleared);
    }

    /// Shallow-merge host-supplied user data into the persisted profile.
    pub fn set_user(&mut self, update: UserProfile) {
        self.profile = self.profiles.update(&self.config.bot_id, update);
    }

    // ─── Sending ─────────────────────────────────────────────

    /// Record the user's message and build the webhook request.
    /// Returns `None` for blank input.
    pub fn begin_send(&mut self, text: &str, current_page: &str) -> Option<WebhookRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let message = self.stamp(Sender::User, text);
        let timestamp = message.timestamp.clone();
        self.add_message(message);

        self.state.awaiting_reply = true;
        self.event_bus.emit(WidgetEvent::TypingStarted);

        Some(WebhookRequest {
            message: OutboundMessage {
                text: text.to_string(),
                timestamp,
            },
            user: UserRef::new(self.session.as_str(), self.profile.clone()),
            context: RequestContext {
                conversation_id: self.conversation_id.clone(),
                current_page: current_page.to_string(),
            },
            metadata: RequestMetadata {
                bot_id: self.config.bot_id.clone(),
                source: MESSAGE_SOURCE.to_string(),
            },
        })
    }

    /// Apply the webhook outcome. On failure the configured error text is
    /// added to the transcript and the error is returned; the user message
    /// stays recorded. A reply with `success: false` or without `data` is a
    /// failure too, so the user always sees either a reply or the error text.
    pub fn finish_send(&mut self, result: Result<WebhookResponse>) -> Result<()> {
        self.state.awaiting_reply = false;
        self.event_bus.emit(WidgetEvent::TypingStopped);

        let reply = result.and_then(|resp| resp.into_reply().ok_or(WidgetError::RemoteRejected));
        match reply {
            Ok(reply) => {
                let message = self
                    .stamp(Sender::Bot, reply.message.text)
                    .with_quick_replies(reply.quick_replies);
                self.add_message(message);
                Ok(())
            }
            Err(e) => {
                log::error!("Error sending message: {}", e);
                let message = self.stamp(Sender::Bot, self.config.messages.error.clone());
                self.add_message(message);
                self.event_bus.emit(WidgetEvent::SendFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Full round trip for callers that own the widget outright.
    pub async fn send_message(
        &mut self,
        text: &str,
        current_page: &str,
        webhook: &dyn WebhookPort,
    ) -> Result<()> {
        let Some(req) = self.begin_send(text, current_page) else {
            return Ok(());
        };
        let result = webhook.send(&req).await;
        self.finish_send(result)
    }

    /// Send the label of quick reply `reply` on message `index` as a user message.
    pub fn select_quick_reply(
        &mut self,
        index: usize,
        reply: usize,
        current_page: &str,
    ) -> Option<WebhookRequest> {
        let label = self
            .messages
            .get(index)?
            .quick_replies()
            .get(reply)?
            .label
            .clone();
        self.event_bus.emit(WidgetEvent::QuickRepliesConsumed { index });
        self.begin_send(&label, current_page)
    }
}

fn badge_label(count: u32) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_CAP => Some(format!("{}+", BADGE_CAP)),
        n => Some(n.to_string()),
    }
}
