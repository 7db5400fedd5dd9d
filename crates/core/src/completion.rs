//! Completion backend trait — the abstraction over the remote LLM API.
//!
//! A backend knows how to send a composed system prompt plus the raw user
//! message to a hosted completion endpoint and return a single text answer.
//! One attempt per call, no internal retry: failure handling (fallback
//! substitution, prompt-size recomposition) is the caller's decision, made
//! by pattern-matching on the returned error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The composed context (identity + summary + selected sections).
    pub system_prompt: String,

    /// The raw user message, passed through unmodified.
    pub user_message: String,

    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.7
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            max_tokens: None,
            temperature: default_temperature(),
        }
    }
}

/// A completed answer from the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// The generated answer text.
    pub text: String,

    /// Which model actually responded.
    pub model: String,
}

/// The completion backend seam.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai-compat").
    /// Used as the reply `source` tag.
    fn name(&self) -> &str;

    /// Send a request and get a complete response. Exactly one attempt.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<Completion, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_constructor_defaults() {
        let req = CompletionRequest::new("system", "hello");
        assert_eq!(req.system_prompt, "system");
        assert_eq!(req.user_message, "hello");
        assert!(req.max_tokens.is_none());
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn request_deserializes_without_temperature() {
        let req: CompletionRequest =
            serde_json::from_str(r#"{"system_prompt":"s","user_message":"u"}"#).unwrap();
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
    }
}
