//! Hosted profile store accessor.
//!
//! Talks to the BaaS REST API (PostgREST conventions: `select`, `order`,
//! `eq.` filters as query parameters) with api-key header auth. One GET per
//! collection, single attempt, no retry — a failed fetch surfaces as a
//! `ProfileError` and the caller substitutes the placeholder bundle.

use async_trait::async_trait;
use foliochat_core::error::ProfileError;
use foliochat_core::{ExperienceItem, Profile, ProfileStore, ProjectItem, SkillItem};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// REST accessor for the hosted profile store.
pub struct RestProfileStore {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    recent_experiences: usize,
}

impl RestProfileStore {
    /// Create a new store accessor.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create with a custom request timeout.
    pub fn with_client_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "rest".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
            recent_experiences: 5,
        }
    }

    /// Replace the request timeout (builder style).
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self::with_client_timeout(self.base_url, self.api_key, timeout)
            .with_recent_experiences(self.recent_experiences)
    }

    /// How many recent experience rows to fetch beyond current ones.
    pub fn with_recent_experiences(mut self, count: usize) -> Self {
        self.recent_experiences = count;
        self
    }

    /// The query string for each collection. Kept in one place so the
    /// filters stay reviewable next to each other.
    fn collection_query(&self, table: &str) -> String {
        match table {
            "profiles" => "select=*&limit=1".into(),
            "skills" => "select=*&is_primary=eq.true&order=level.desc".into(),
            "experiences" => format!(
                "select=*&order=is_current.desc,start_date.desc&limit={}",
                self.recent_experiences + 1
            ),
            "projects" => {
                "select=*&is_public=eq.true&status=in.(completed,in_progress)\
                 &order=ai_priority.asc,impact_score.desc"
                    .into()
            }
            _ => "select=*".into(),
        }
    }

    /// Issue one GET and deserialize the row set.
    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
    ) -> Result<Vec<T>, ProfileError> {
        let url = format!("{}/{}?{}", self.base_url, table, self.collection_query(table));
        debug!(table, "Fetching profile collection");

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProfileError::Timeout(e.to_string())
                } else {
                    ProfileError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(table, status, body = %body, "Profile store error");
            return Err(ProfileError::ApiError {
                status_code: status,
                message: body,
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| ProfileError::MalformedPayload(e.to_string()))
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_profile(&self) -> Result<Profile, ProfileError> {
        let rows: Vec<Profile> = self.fetch_rows("profiles").await?;
        rows.into_iter().next().ok_or_else(|| {
            ProfileError::MalformedPayload("profiles table returned no rows".into())
        })
    }

    async fn fetch_skills(&self) -> Result<Vec<SkillItem>, ProfileError> {
        self.fetch_rows("skills").await
    }

    async fn fetch_experiences(&self) -> Result<Vec<ExperienceItem>, ProfileError> {
        self.fetch_rows("experiences").await
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectItem>, ProfileError> {
        self.fetch_rows("projects").await
    }
}
