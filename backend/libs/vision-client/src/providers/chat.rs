//! Multimodal chat completions provider
//!
//! One user message carrying the prompt text and the image as a JPEG data URI.
//! Commentary is the content of the first choice.
use super::VisionProvider;
use crate::encoding::jpeg_data_uri;
use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};

pub struct ChatCompletionsProvider {
    endpoint: String,
    model: String,
    max_tokens: u32,
    api_key: String,
}

impl ChatCompletionsProvider {
    pub fn new(endpoint: String, model: String, max_tokens: u32, api_key: String) -> Self {
        Self {
            endpoint,
            model,
            max_tokens,
            api_key,
        }
    }
}

impl VisionProvider for ChatCompletionsProvider {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_payload(&self, image_base64: &str, prompt: &str) -> Result<serde_json::Value> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: jpeg_data_uri(image_base64),
                        },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        };

        Ok(serde_json::to_value(request)?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    fn decode_response(&self, body: &str) -> Result<String> {
        let response: ChatCompletionResponse = serde_json::from_str(body)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(VisionError::EmptyResponse);
        }

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
