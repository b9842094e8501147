//! Dispatcher-specific data types

use std::fmt;
use std::time::Duration;

/// Default per-call timeout for upstream requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream request shapes known to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// Text completion endpoint, bearer auth, `choices[0].text`
    Completion,
    /// Document summarisation endpoint, `X-API-Key` auth, `summary`
    Summary,
    /// OpenAI chat completions, `choices[0].message.content`
    ChatCompletion,
    /// Anthropic messages, `content[0].text`
    Messages,
}

impl AdapterKind {
    /// Service name used in responses unless overridden
    pub fn default_service_name(&self) -> &'static str {
        match self {
            AdapterKind::Completion => "AI_Service_A",
            AdapterKind::Summary => "AI_Service_B",
            AdapterKind::ChatCompletion => "OpenAI_Chat",
            AdapterKind::Messages => "Anthropic_Messages",
        }
    }

    /// Human-readable label used in configuration messages
    pub fn display_label(&self) -> &'static str {
        match self {
            AdapterKind::Completion => "Service A",
            AdapterKind::Summary => "Service B",
            AdapterKind::ChatCompletion => "OpenAI",
            AdapterKind::Messages => "Anthropic",
        }
    }

    /// Prefix of the environment variables configuring this adapter
    pub fn env_prefix(&self) -> &'static str {
        match self {
            AdapterKind::Completion => "AI_SERVICE_A",
            AdapterKind::Summary => "AI_SERVICE_B",
            AdapterKind::ChatCompletion => "OPENAI",
            AdapterKind::Messages => "ANTHROPIC",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            AdapterKind::Completion => "https://api.example.com/ai_a/v1/generate",
            AdapterKind::Summary => "https://api.another-example.com/ai_b/v2/process",
            AdapterKind::ChatCompletion => "https://api.openai.com/v1/chat/completions",
            AdapterKind::Messages => "https://api.anthropic.com/v1/messages",
        }
    }

    /// Model sent upstream when none is configured; `None` for model-less shapes
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            AdapterKind::Completion => Some("text-davinci-003"),
            AdapterKind::Summary => None,
            AdapterKind::ChatCompletion => Some("gpt-4o-mini"),
            AdapterKind::Messages => Some("claude-3-5-sonnet-20241022"),
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterKind::Completion => write!(f, "service_a"),
            AdapterKind::Summary => write!(f, "service_b"),
            AdapterKind::ChatCompletion => write!(f, "openai"),
            AdapterKind::Messages => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "service_a" | "completion" => Ok(AdapterKind::Completion),
            "service_b" | "summary" => Ok(AdapterKind::Summary),
            "openai" | "chat" => Ok(AdapterKind::ChatCompletion),
            "anthropic" | "messages" => Ok(AdapterKind::Messages),
            _ => Err(format!("Unknown adapter: {s}")),
        }
    }
}

/// Static configuration for one upstream, read-only after startup
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    pub kind: AdapterKind,
    pub service_name: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl AdapterConfig {
    /// Config with the kind's default service name and model and no credential
    pub fn new(kind: AdapterKind, endpoint: impl Into<String>) -> Self {
        Self {
            kind,
            service_name: kind.default_service_name().to_string(),
            endpoint: endpoint.into(),
            api_key: None,
            model: kind.default_model().map(str::to_string),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured credential; an empty key counts as absent
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Model to send upstream
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .or_else(|| self.kind.default_model())
            .unwrap_or_default()
    }
}
