//! Configuration loading, validation, and management for Foliochat.
//!
//! Loads configuration from `~/.foliochat/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.foliochat/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default reply language for the assistant.
    #[serde(default = "default_language_tag")]
    pub default_language: String,

    /// Remote completion API configuration.
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Hosted profile store configuration.
    #[serde(default)]
    pub profile_store: ProfileStoreConfig,

    /// Context composer budget tuning.
    #[serde(default)]
    pub composer: ComposerConfig,

    /// Machine-translation configuration.
    #[serde(default)]
    pub translation: TranslationConfig,

    /// HTTP gateway configuration.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_language_tag() -> String {
    "en".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("default_language", &self.default_language)
            .field("completion", &self.completion)
            .field("profile_store", &self.profile_store)
            .field("composer", &self.composer)
            .field("translation", &self.translation)
            .field("gateway", &self.gateway)
            .finish()
    }
}

/// Remote completion API settings. The presence of `api_key` toggles
/// remote-vs-local mode: with no key the assistant answers exclusively via
/// the local fallback responder.
#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_completion_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_completion_url() -> String {
    "https://api.groq.com/openai/v1".into()
}
fn default_model() -> String {
    "llama-3.1-8b-instant".into()
}
fn default_max_tokens() -> u32 {
    512
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_secs() -> u64 {
    10
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_completion_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Hosted profile store (BaaS REST API) settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProfileStoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many recent experience entries to fetch alongside current ones.
    #[serde(default = "default_recent_experiences")]
    pub recent_experiences: usize,
}

fn default_recent_experiences() -> usize {
    5
}

impl std::fmt::Debug for ProfileStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStoreConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("timeout_secs", &self.timeout_secs)
            .field("recent_experiences", &self.recent_experiences)
            .finish()
    }
}

impl Default for ProfileStoreConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            recent_experiences: default_recent_experiences(),
        }
    }
}

/// Context composer budget tuning.
///
/// The token-approximation constants are empirical values tuned against the
/// deployed completion model. The defaults reproduce the reference behavior
/// exactly; change them only together with the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Total prompt budget in characters.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,

    /// Reduced budgets tried, in order, when the completion API rejects a
    /// prompt as too large.
    #[serde(default = "default_retry_prompt_chars")]
    pub retry_prompt_chars: Vec<usize>,

    /// Characters per token for the budget math.
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,

    /// Estimated token cost of one formatted item.
    #[serde(default = "default_tokens_per_item")]
    pub tokens_per_item: usize,

    /// Tokens held back from the category budget as a safety margin.
    #[serde(default = "default_safety_margin_tokens")]
    pub safety_margin_tokens: usize,
}

fn default_max_prompt_chars() -> usize {
    4000
}
fn default_retry_prompt_chars() -> Vec<usize> {
    vec![2000, 1000]
}
fn default_chars_per_token() -> usize {
    4
}
fn default_tokens_per_item() -> usize {
    200
}
fn default_safety_margin_tokens() -> usize {
    500
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: default_max_prompt_chars(),
            retry_prompt_chars: default_retry_prompt_chars(),
            chars_per_token: default_chars_per_token(),
            tokens_per_item: default_tokens_per_item(),
            safety_margin_tokens: default_safety_margin_tokens(),
        }
    }
}

/// Machine-translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_translation_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_translation_url() -> String {
    "https://libretranslate.com".into()
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_translation_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// HTTP gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Origins allowed to call the chat endpoint. Empty = same-origin only.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    42810
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: vec![],
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.foliochat/config.toml).
    ///
    /// Also checks environment variables for secrets and overrides:
    /// - `FOLIOCHAT_COMPLETION_API_KEY` (highest priority)
    /// - `GROQ_API_KEY` / `OPENAI_API_KEY`
    /// - `FOLIOCHAT_MODEL`
    /// - `FOLIOCHAT_PROFILE_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.completion.api_key.is_none() {
            config.completion.api_key = std::env::var("FOLIOCHAT_COMPLETION_API_KEY")
                .ok()
                .or_else(|| std::env::var("GROQ_API_KEY").ok())
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("FOLIOCHAT_MODEL") {
            config.completion.model = model;
        }

        if config.profile_store.api_key.is_none() {
            config.profile_store.api_key = std::env::var("FOLIOCHAT_PROFILE_API_KEY").ok();
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".foliochat")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.completion.temperature < 0.0 || self.completion.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "completion.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.composer.chars_per_token == 0 {
            return Err(ConfigError::ValidationError(
                "composer.chars_per_token must be at least 1".into(),
            ));
        }

        if self.composer.tokens_per_item == 0 {
            return Err(ConfigError::ValidationError(
                "composer.tokens_per_item must be at least 1".into(),
            ));
        }

        if self.composer.max_prompt_chars == 0 {
            return Err(ConfigError::ValidationError(
                "composer.max_prompt_chars must be greater than 0".into(),
            ));
        }

        let mut previous = self.composer.max_prompt_chars;
        for &budget in &self.composer.retry_prompt_chars {
            if budget == 0 || budget >= previous {
                return Err(ConfigError::ValidationError(
                    "composer.retry_prompt_chars must be strictly decreasing and non-zero".into(),
                ));
            }
            previous = budget;
        }

        if self.completion.timeout_secs == 0 || self.profile_store.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if a completion API key is available (from config or env).
    pub fn has_completion_key(&self) -> bool {
        self.completion.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: default_language_tag(),
            completion: CompletionConfig::default(),
            profile_store: ProfileStoreConfig::default(),
            composer: ComposerConfig::default(),
            translation: TranslationConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
