//! Token estimation for the budget math.
//!
//! Uses a character-based heuristic: 1 token ≈ 4 characters, rounded by
//! truncation. The truncating division is load-bearing: the downstream
//! completion API's limits were tuned against exactly this proxy, so both
//! the "used budget" measurement and the per-section item cap must apply it
//! consistently.

use foliochat_config::ComposerConfig;
use serde::{Deserialize, Serialize};

/// The empirical budget constants, injected at construction time instead of
/// hardcoded at call sites. Defaults reproduce the reference behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerLimits {
    /// Characters per token.
    pub chars_per_token: usize,

    /// Estimated token cost of one formatted item.
    pub tokens_per_item: usize,

    /// Tokens held back before allocating to categories.
    pub safety_margin_tokens: usize,
}

impl ComposerLimits {
    /// Estimate the token count for a string. Truncating division.
    pub fn estimate_tokens(&self, text: &str) -> usize {
        text.len() / self.chars_per_token
    }

    /// Convert a character budget into a token budget. Truncating division.
    pub fn tokens_for_chars(&self, chars: usize) -> usize {
        chars / self.chars_per_token
    }

    /// How many items a section budget pays for, before the minimum-items
    /// floor is applied by the formatter.
    pub fn items_for_tokens(&self, tokens: usize) -> usize {
        tokens / self.tokens_per_item
    }
}

impl Default for ComposerLimits {
    fn default() -> Self {
        Self {
            chars_per_token: 4,
            tokens_per_item: 200,
            safety_margin_tokens: 500,
        }
    }
}

impl From<&ComposerConfig> for ComposerLimits {
    fn from(config: &ComposerConfig) -> Self {
        Self {
            chars_per_token: config.chars_per_token,
            tokens_per_item: config.tokens_per_item,
            safety_margin_tokens: config.safety_margin_tokens,
        }
    }
}
