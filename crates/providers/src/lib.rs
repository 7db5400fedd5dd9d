//! Completion backend implementations for Foliochat.
//!
//! All backends implement the `foliochat_core::CompletionBackend` trait.
//! Backend construction is driven by configuration: without an API key the
//! assistant runs in local-only mode and never attempts a remote call.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatBackend;

use std::sync::Arc;

use foliochat_config::AppConfig;
use foliochat_core::CompletionBackend;

/// Build the completion backend from configuration.
///
/// Returns `None` when no API key is configured — the caller then answers
/// exclusively through the local fallback responder.
pub fn build_from_config(config: &AppConfig) -> Option<Arc<dyn CompletionBackend>> {
    let api_key = config.completion.api_key.as_ref()?;

    let backend = OpenAiCompatBackend::new(
        &config.completion.api_url,
        api_key,
        &config.completion.model,
    )
    .with_timeout(std::time::Duration::from_secs(config.completion.timeout_secs))
    .with_max_tokens(config.completion.max_tokens);

    Some(Arc::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_key_means_no_backend() {
        let config = AppConfig::default();
        assert!(build_from_config(&config).is_none());
    }

    #[test]
    fn key_enables_backend() {
        let mut config = AppConfig::default();
        config.completion.api_key = Some("sk-test".into());
        let backend = build_from_config(&config).unwrap();
        assert_eq!(backend.name(), "openai-compat");
    }
}
