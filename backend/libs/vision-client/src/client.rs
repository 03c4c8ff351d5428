//! HTTP transport for vision providers
use crate::config::VisionConfig;
use crate::encoding::{encode_image_file, resolve_image_path};
use crate::error::{Result, VisionError};
use crate::providers::{self, VisionProvider};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Produces commentary for a stored image
#[async_trait]
pub trait ImageCommentator: Send + Sync {
    async fn comment_on_image(&self, image_key: &str, prompt: &str) -> Result<String>;
}

/// Vision client bound to one provider
pub struct VisionClient {
    http: reqwest::Client,
    provider: Arc<dyn VisionProvider>,
    asset_dir: PathBuf,
    timeout: Duration,
}

impl VisionClient {
    /// Build a client for the provider selected in `config`
    pub fn new(config: &VisionConfig) -> Result<Self> {
        let provider = providers::from_config(config)?;
        Self::with_provider(provider, config)
    }

    pub fn with_provider(provider: Arc<dyn VisionProvider>, config: &VisionConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| VisionError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            provider,
            asset_dir: config.asset_dir.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    async fn send(&self, payload: serde_json::Value) -> Result<String> {
        let request = self.http.post(self.provider.endpoint()).json(&payload);
        let request = self.provider.authorize(request);

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider.name(),
                status = status.as_u16(),
                body = %body,
                "Vision provider returned an error"
            );
            return Err(VisionError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> VisionError {
        if err.is_timeout() {
            VisionError::Timeout(self.timeout)
        } else {
            VisionError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ImageCommentator for VisionClient {
    async fn comment_on_image(&self, image_key: &str, prompt: &str) -> Result<String> {
        let path = resolve_image_path(&self.asset_dir, image_key)?;
        let image_base64 = encode_image_file(&path).await?;

        let payload = self.provider.build_payload(&image_base64, prompt)?;
        debug!(
            provider = self.provider.name(),
            image = %image_key,
            encoded_len = image_base64.len(),
            "Sending image to vision provider"
        );

        let body = self.send(payload).await?;
        self.provider.decode_response(&body)
    }
}
