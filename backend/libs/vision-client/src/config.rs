//! Configuration for the vision client
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_SIMPLE_ENDPOINT: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_MODEL: &str = "gpt-4-vision-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Which provider payload shape to speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Multimodal chat completions (`/v1/chat/completions`)
    Chat,
    /// Local single-shot vision endpoint taking raw base64
    Simple,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Chat => "chat",
            ProviderKind::Simple => "simple",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Chat => DEFAULT_CHAT_ENDPOINT,
            ProviderKind::Simple => DEFAULT_SIMPLE_ENDPOINT,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" | "openai" => Ok(ProviderKind::Chat),
            "simple" | "local" => Ok(ProviderKind::Simple),
            other => Err(format!("unknown vision provider '{}'", other)),
        }
    }
}

/// Immutable client configuration, built once at process start
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub provider: ProviderKind,
    /// Full URL the payload is POSTed to
    pub endpoint: String,
    /// Model identifier (chat shape only)
    pub model: String,
    /// Maximum output tokens (chat shape only)
    pub max_tokens: u32,
    /// Bearer token (chat shape only)
    pub api_key: Option<String>,
    /// Upper bound for a single provider call
    pub request_timeout: Duration,
    /// Directory image keys are resolved against
    pub asset_dir: PathBuf,
}

impl VisionConfig {
    pub fn new(provider: ProviderKind, max_tokens: u32, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            endpoint: provider.default_endpoint().to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens,
            api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            asset_dir: asset_dir.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
