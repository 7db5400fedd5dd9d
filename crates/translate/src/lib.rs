//! Machine-translation layer for Foliochat.
//!
//! A thin wrapper over a hosted MT endpoint with a memoizing cache in
//! front. The cache is injected by the caller (constructed once per
//! process), never a module-level singleton. Failures are absorbed: the
//! service returns the original text unchanged rather than surfacing a
//! translation error to the user.

pub mod cache;
pub mod client;

pub use cache::InMemoryCache;
pub use client::HttpTranslator;

use std::sync::Arc;

use foliochat_core::{Language, TranslationCache, Translator};
use tracing::warn;

/// Cache-or-fetch translation service.
///
/// Consults the cache before any outbound call and populates it only after
/// a successful one. One network attempt; on failure the original text
/// comes back unchanged.
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    cache: Arc<dyn TranslationCache>,
}

impl TranslationService {
    pub fn new(translator: Arc<dyn Translator>, cache: Arc<dyn TranslationCache>) -> Self {
        Self { translator, cache }
    }

    /// Translate `text` into `target`, falling back to the original text on
    /// any failure.
    pub async fn translate_or_original(&self, text: &str, target: Language) -> String {
        if let Some(hit) = self.cache.get(text, target).await {
            return hit;
        }

        match self.translator.translate(text, target).await {
            Ok(translated) => {
                self.cache.set(text, target, translated.clone()).await;
                translated
            }
            Err(e) => {
                warn!(translator = %self.translator.name(), error = %e,
                    "Translation failed, returning original text");
                text.to_string()
            }
        }
    }
}
