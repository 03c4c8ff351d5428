//! Provider payload shapes
//!
//! A provider only knows how to build its request body and how to pull the
//! commentary text out of a successful response. Transport lives in
//! [`crate::client::VisionClient`].
use crate::config::{ProviderKind, VisionConfig};
use crate::error::{Result, VisionError};
use std::sync::Arc;

pub mod chat;
pub mod simple;

pub use chat::ChatCompletionsProvider;
pub use simple::SimpleVisionProvider;

pub trait VisionProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn endpoint(&self) -> &str;

    /// Request body for a base64-encoded image and a prompt
    fn build_payload(&self, image_base64: &str, prompt: &str) -> Result<serde_json::Value>;

    /// Attach credentials. Unauthenticated providers keep the default.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
    }

    /// Extract commentary from a 2xx response body
    fn decode_response(&self, body: &str) -> Result<String>;
}

/// Build the provider selected by configuration
pub fn from_config(config: &VisionConfig) -> Result<Arc<dyn VisionProvider>> {
    match config.provider {
        ProviderKind::Chat => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    VisionError::Config("chat provider requires an API key".to_string())
                })?;

            Ok(Arc::new(ChatCompletionsProvider::new(
                config.endpoint.clone(),
                config.model.clone(),
                config.max_tokens,
                api_key,
            )))
        }
        ProviderKind::Simple => Ok(Arc::new(SimpleVisionProvider::new(config.endpoint.clone()))),
    }
}
