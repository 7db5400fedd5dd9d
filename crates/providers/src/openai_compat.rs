//! OpenAI-compatible completion backend.
//!
//! Works with any endpoint exposing the `/chat/completions` shape: OpenAI,
//! Groq, OpenRouter, Together, local vLLM, etc. Sends the composed system
//! prompt plus the raw user message as a two-message conversation and
//! returns the first choice. One attempt per call; the caller decides what
//! a failure means.

use async_trait::async_trait;
use foliochat_core::error::CompletionError;
use foliochat_core::{Completion, CompletionBackend, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_TOKENS: u32 = 512;

/// An OpenAI-compatible completion backend.
pub struct OpenAiCompatBackend {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiCompatBackend {
    /// Create a new backend.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let timeout = DEFAULT_TIMEOUT;
        Self {
            name: "openai-compat".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout,
            client: build_client(timeout),
        }
    }

    /// Replace the request timeout (builder style).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_client(timeout);
        self
    }

    /// Replace the default generation cap (builder style).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

/// Recognize a context-length rejection hidden in a 400 body. Providers
/// phrase it differently; these markers cover the OpenAI-compatible family.
fn is_context_length_error(body: &str) -> bool {
    let body = body.to_lowercase();
    body.contains("context_length")
        || body.contains("context length")
        || body.contains("maximum context")
        || body.contains("prompt is too long")
        || body.contains("too many tokens")
}

#[async_trait]
impl CompletionBackend for OpenAiCompatBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<Completion, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_message },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens.unwrap_or(self.max_tokens),
            "stream": false,
        });

        debug!(backend = %self.name, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(e.to_string())
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(CompletionError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status == 413 {
            return Err(CompletionError::PromptTooLarge(
                "Payload rejected by the completion API".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            if status == 400 && is_context_length_error(&error_body) {
                return Err(CompletionError::PromptTooLarge(error_body));
            }
            warn!(status, body = %error_body, "Completion API returned error");
            return Err(CompletionError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| CompletionError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            model: api_response.model,
        })
    }
}

// --- OpenAI-compatible API types ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
