//! Error types for the Foliochat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Foliochat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Profile store errors ---
    #[error("Profile store error: {0}")]
    Profile(#[from] ProfileError),

    // --- Completion errors ---
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    // --- Translation errors ---
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Contract violations ---
    #[error("Invalid user message: {0}")]
    InvalidMessage(String),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("Store request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Store unreachable: {0}")]
    Network(String),

    #[error("Store request timed out: {0}")]
    Timeout(String),

    #[error("Malformed store payload: {0}")]
    MalformedPayload(String),

    #[error("Profile store not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by completion API, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Prompt too large for the completion model: {0}")]
    PromptTooLarge(String),

    #[error("Completion backend not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("Translation request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Translation endpoint unreachable: {0}")]
    Network(String),

    #[error("Translation request timed out: {0}")]
    Timeout(String),

    #[error("Unsupported language pair: {src} -> {target}")]
    UnsupportedPair { src: String, target: String },
}
