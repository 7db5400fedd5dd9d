//! Translation seams: the translator trait and its memoizing cache.
//!
//! The cache is an explicit object passed by dependency injection, not a
//! module-level singleton. It is a pure memo keyed by `(text, target)`:
//! duplicate inserts under concurrent sessions are harmless because
//! overwrites are idempotent.

use async_trait::async_trait;

use crate::error::TranslationError;
use crate::language::Language;

/// A memo table for translated strings.
#[async_trait]
pub trait TranslationCache: Send + Sync {
    async fn get(&self, text: &str, target: Language) -> Option<String>;

    async fn set(&self, text: &str, target: Language, translated: String);
}

/// The machine-translation seam. One attempt per call; callers absorb
/// failure by keeping the original text.
#[async_trait]
pub trait Translator: Send + Sync {
    /// The translator name (e.g., "libretranslate").
    fn name(&self) -> &str;

    async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> std::result::Result<String, TranslationError>;
}
