//! HTTP API gateway for Foliochat.
//!
//! Exposes the chat endpoint the portfolio frontend talks to, plus a
//! health check. Built on Axum.
//!
//! The gateway never surfaces composer or backend errors: an unusable
//! message maps to 400, everything else resolves to a (possibly
//! local-fallback) reply — the end user never sees a raw error.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use foliochat_assistant::ChatEngine;
use foliochat_config::AppConfig;
use foliochat_core::{AssistantReply, Error, Language};
use foliochat_translate::TranslationService;

/// Request body size cap: chat messages are short.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub engine: ChatEngine,
    pub default_language: Language,
    /// Site-content translation, when enabled in config.
    pub translation: Option<TranslationService>,
}

type SharedState = Arc<GatewayState>;

/// The chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,

    /// Language tag ("en", "fr", "fr-FR", ...). Falls back to the
    /// configured default when absent.
    #[serde(default)]
    pub language: Option<String>,
}

/// The translation request body.
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
struct TranslateBody {
    text: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState, config: &AppConfig) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);
    let origins: Vec<axum::http::HeaderValue> = config
        .gateway
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    if !origins.is_empty() {
        cors = cors.allow_origin(tower_http::cors::AllowOrigin::list(origins));
    }

    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/chat", post(chat_handler))
        .route("/v1/translate", post(translate_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server: wire the profile store, the completion
/// backend, and the chat engine from config, then serve until shutdown.
pub async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store = foliochat_profile::build_from_config(&config);
    let backend = foliochat_providers::build_from_config(&config);
    let engine = ChatEngine::new(store, backend, &config.composer);

    let translation = config.translation.enabled.then(|| {
        TranslationService::new(
            Arc::new(foliochat_translate::HttpTranslator::with_timeout(
                &config.translation.api_url,
                std::time::Duration::from_secs(config.translation.timeout_secs),
            )),
            Arc::new(foliochat_translate::InMemoryCache::new()),
        )
    });

    let state = Arc::new(GatewayState {
        engine,
        default_language: Language::from_tag(&config.default_language),
        translation,
    });

    let router = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Gateway listening");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AssistantReply>, (StatusCode, Json<ErrorBody>)> {
    let language = request
        .language
        .as_deref()
        .map(Language::from_tag)
        .unwrap_or(state.default_language);

    match state.engine.process_message(&request.message, language).await {
        Ok(reply) => Ok(Json(reply)),
        Err(Error::InvalidMessage(reason)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody { error: reason }),
        )),
        Err(e) => {
            // Should be unreachable — the engine absorbs everything else.
            tracing::error!(error = %e, "Unexpected engine error");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "internal error".into(),
                }),
            ))
        }
    }
}

/// Translate site content. With translation disabled, or on any upstream
/// failure, the original text comes back unchanged — never an error.
async fn translate_handler(
    State(state): State<SharedState>,
    Json(request): Json<TranslateRequest>,
) -> Json<TranslateBody> {
    let target = Language::from_tag(&request.target);
    let text = match &state.translation {
        Some(service) => service.translate_or_original(&request.text, target).await,
        None => request.text,
    };
    Json(TranslateBody { text })
}
