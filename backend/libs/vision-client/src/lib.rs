//! Vision commentary client
//!
//! Bridges a locally stored image plus a prompt to an external vision-language
//! provider and returns plain commentary text.
//!
//! - `encoding`: image file to base64 payload
//! - `providers`: per-provider request/response shaping (chat completions, simple vision)
//! - `client`: HTTP transport with a bounded request timeout
//! - `config`: immutable provider configuration injected at construction

pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod providers;

pub use client::{ImageCommentator, VisionClient};
pub use config::{ProviderKind, VisionConfig};
pub use error::{Result, VisionError};
pub use providers::{ChatCompletionsProvider, SimpleVisionProvider, VisionProvider};
