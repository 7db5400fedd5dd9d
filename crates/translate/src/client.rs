//! HTTP machine-translation client (LibreTranslate-compatible API).

use async_trait::async_trait;
use foliochat_core::error::TranslationError;
use foliochat_core::{Language, Translator};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A translator backed by a LibreTranslate-compatible `/translate` endpoint.
pub struct HttpTranslator {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpTranslator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "libretranslate".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[async_trait]
impl Translator for HttpTranslator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<String, TranslationError> {
        let url = format!("{}/translate", self.base_url);
        let body = serde_json::json!({
            "q": text,
            "source": "auto",
            "target": target.tag(),
            "format": "text",
        });

        debug!(target = %target, chars = text.len(), "Sending translation request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout(e.to_string())
                } else {
                    TranslationError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::ApiError {
                status_code: status,
                message: body,
            });
        }

        let parsed: TranslateResponse =
            response.json().await.map_err(|e| TranslationError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Ok(parsed.translated_text)
    }
}
