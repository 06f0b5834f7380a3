use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version of the configuration schema understood by this build
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Bot id used when the host page does not name one; no remote config is fetched for it.
pub const DEFAULT_BOT_ID: &str = "default";

pub const DEFAULT_API_URL: &str = "https://n8n.khipusyntony.com/webhook/chatbot";

/// Base URL for per-bot remote configuration (`<base>/<botId>.json`)
pub const DEFAULT_CONFIG_BASE_URL: &str = "https://khipusyntony.github.io/khipu-chat-widget/config";

const DEFAULT_HEADER_TITLE: &str = "Asistente Virtual";

/// Effective widget configuration.
///
/// Every field has a default so any partial JSON tree can be read back as a
/// full configuration. Keys this build does not know about are kept in
/// `extra` and survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub schema_version: u32,
    pub bot_id: String,
    pub api_url: String,
    pub appearance: AppearanceConfig,
    pub messages: MessagesConfig,
    pub behavior: BehaviorConfig,
    pub integration: IntegrationConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            bot_id: DEFAULT_BOT_ID.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            appearance: AppearanceConfig::default(),
            messages: MessagesConfig::default(),
            behavior: BehaviorConfig::default(),
            integration: IntegrationConfig::default(),
            extra: Map::new(),
        }
    }
}

impl WidgetConfig {
    /// Read a merged configuration tree. Missing keys take their defaults.
    pub fn from_tree(tree: &Value) -> crate::Result<Self> {
        Self::deserialize(tree).map_err(|e| crate::WidgetError::Config(e.to_string()))
    }

    /// The configuration as a JSON tree, suitable as a merge base.
    pub fn to_tree(&self) -> crate::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Endpoint that receives outbound messages.
    pub fn webhook_url(&self) -> &str {
        self.integration
            .webhook_url
            .as_deref()
            .unwrap_or(&self.api_url)
    }

    pub fn client_token(&self) -> &str {
        self.integration.client_token.as_deref().unwrap_or("")
    }

    pub fn config_base_url(&self) -> &str {
        self.integration
            .config_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CONFIG_BASE_URL)
    }

    /// Whether a per-bot remote configuration should be fetched.
    pub fn has_remote_config(&self) -> bool {
        self.bot_id != DEFAULT_BOT_ID
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceConfig {
    pub primary_color: String,
    pub position: Position,
    pub offset: Offset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            primary_color: "#6366F1".to_string(),
            position: Position::BottomRight,
            offset: Offset { x: 20.0, y: 20.0 },
            header_title: None,
            bot_avatar: None,
            extra: Map::new(),
        }
    }
}

impl AppearanceConfig {
    pub fn header_title(&self) -> &str {
        self.header_title.as_deref().unwrap_or(DEFAULT_HEADER_TITLE)
    }
}

/// Screen corner the widget is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Position {
    /// CSS properties (vertical, horizontal) the offset applies to.
    pub fn edges(&self) -> (&'static str, &'static str) {
        match self {
            Position::TopLeft => ("top", "left"),
            Position::TopRight => ("top", "right"),
            Position::BottomLeft => ("bottom", "left"),
            Position::BottomRight => ("bottom", "right"),
        }
    }
}

/// Distance in pixels from the anchored edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Default for Offset {
    fn default() -> Self {
        Self { x: 20.0, y: 20.0 }
    }
}

/// User-visible strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagesConfig {
    pub welcome: String,
    pub placeholder: String,
    /// Shown in the transcript when a send fails
    pub error: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            welcome: "¡Hola! 👋 ¿En qué puedo ayudarte?".to_string(),
            placeholder: "Escribe tu mensaje...".to_string(),
            error: "Lo siento, hubo un error. Intenta de nuevo.".to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorConfig {
    pub auto_open: bool,
    pub show_on_load: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            auto_open: false,
            show_on_load: true,
            extra: Map::new(),
        }
    }
}

/// Backend wiring for one bot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_base_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
