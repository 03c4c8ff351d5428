//! Local single-shot vision endpoint
//!
//! Takes `{image, text, history}` with raw base64 and answers with the
//! commentary as the whole response body.
use super::VisionProvider;
use crate::error::{Result, VisionError};
use serde::Serialize;

pub struct SimpleVisionProvider {
    endpoint: String,
}

impl SimpleVisionProvider {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

#[derive(Debug, Serialize)]
struct SimpleVisionRequest<'a> {
    image: &'a str,
    text: &'a str,
    history: Vec<serde_json::Value>,
}

impl VisionProvider for SimpleVisionProvider {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_payload(&self, image_base64: &str, prompt: &str) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(SimpleVisionRequest {
            image: image_base64,
            text: prompt,
            history: Vec::new(),
        })?)
    }

    fn decode_response(&self, body: &str) -> Result<String> {
        if body.trim().is_empty() {
            return Err(VisionError::EmptyResponse);
        }
        Ok(body.to_string())
    }
}
