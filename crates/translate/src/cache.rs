//! In-memory translation memo — the default cache implementation.

use async_trait::async_trait;
use foliochat_core::{Language, TranslationCache};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A memo table backed by a `RwLock<HashMap>`.
///
/// Keys are `(text, target)`. Overwrites are idempotent, so duplicate
/// inserts under concurrent sessions are harmless.
pub struct InMemoryCache {
    entries: RwLock<HashMap<(String, Language), String>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of memoized entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationCache for InMemoryCache {
    async fn get(&self, text: &str, target: Language) -> Option<String> {
        self.entries
            .read()
            .await
            .get(&(text.to_string(), target))
            .cloned()
    }

    async fn set(&self, text: &str, target: Language, translated: String) {
        self.entries
            .write()
            .await
            .insert((text.to_string(), target), translated);
    }
}
