//! Profile store implementations for Foliochat.
//!
//! All stores implement the `foliochat_core::ProfileStore` trait.

pub mod fixture;
pub mod rest;

pub use fixture::FixtureStore;
pub use rest::RestProfileStore;

use std::sync::Arc;

use foliochat_config::AppConfig;
use foliochat_core::ProfileStore;

/// Build the profile store from configuration: the REST accessor when an
/// API URL is configured, the sample fixture otherwise (demo mode).
pub fn build_from_config(config: &AppConfig) -> Arc<dyn ProfileStore> {
    match &config.profile_store.api_url {
        Some(url) => {
            let mut store = RestProfileStore::new(
                url,
                config.profile_store.api_key.clone().unwrap_or_default(),
            )
            .with_timeout(std::time::Duration::from_secs(config.profile_store.timeout_secs));
            store = store.with_recent_experiences(config.profile_store.recent_experiences);
            Arc::new(store)
        }
        None => {
            tracing::info!("No profile store configured, serving the bundled sample profile");
            Arc::new(FixtureStore::sample())
        }
    }
}
