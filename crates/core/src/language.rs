//! Supported reply languages.
//!
//! The deployment serves an English/French portfolio. Unknown tags fall
//! back to English rather than erroring — the assistant never surfaces a
//! language problem to the end user.

use serde::{Deserialize, Serialize};

/// A language the assistant can answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    /// Parse a BCP-47-ish tag ("fr", "fr-FR", "en_US"). Unknown tags
    /// resolve to English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match primary.as_str() {
            "fr" => Language::Fr,
            _ => Language::En,
        }
    }

    /// The two-letter tag used by translation endpoints.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
