//! Error types for the vision client
use std::path::PathBuf;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, VisionError>;

/// Every failure the client can report. Nothing is retried inside the client;
/// callers decide what to do with the error.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("provider returned HTTP {status}")]
    Provider { status: u16, body: String },

    #[error("provider request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider transport error: {0}")]
    Transport(String),

    #[error("provider payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("provider returned no commentary")]
    EmptyResponse,

    #[error("configuration error: {0}")]
    Config(String),
}

impl VisionError {
    /// Failure class used in log entries.
    ///
    /// Timeouts and transport failures are provider failures from the caller's
    /// point of view, so they share the `ProviderError` class with non-2xx
    /// responses.
    pub fn kind(&self) -> &'static str {
        match self {
            VisionError::ImageRead { .. } => "ImageReadError",
            VisionError::Provider { .. } | VisionError::Timeout(_) | VisionError::Transport(_) => {
                "ProviderError"
            }
            VisionError::Serialization(_) | VisionError::InvalidBase64(_) => "DecodeError",
            VisionError::EmptyResponse => "EmptyResponse",
            VisionError::Config(_) => "ConfigError",
        }
    }

    /// HTTP status reported by the provider, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            VisionError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}
