//! CLI subcommand implementations.

pub mod chat;
pub mod compose;
pub mod doctor;
pub mod gateway;
pub mod onboard;

use std::sync::Arc;

use foliochat_assistant::ChatEngine;
use foliochat_config::AppConfig;

/// Wire a chat engine from loaded configuration.
pub fn build_engine(config: &AppConfig) -> ChatEngine {
    let store: Arc<dyn foliochat_core::ProfileStore> = foliochat_profile::build_from_config(config);
    let backend = foliochat_providers::build_from_config(config);
    ChatEngine::new(store, backend, &config.composer)
}
