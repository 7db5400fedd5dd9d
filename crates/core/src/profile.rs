//! Profile domain types and the store trait.
//!
//! These are the read-only inputs to context composition: the person's
//! identity record plus the skill, experience, and project collections.
//! Ownership of the data lies with the hosted profile store; this crate
//! only defines the shapes and the sorting conventions consumers rely on.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// The identity record. Singleton — one per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub email: String,
    pub location: String,
    pub experience_years: u32,
    pub availability: String,
    pub bio: String,
}

/// A single skill entry. Consumers sort by `level` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillItem {
    pub name: String,

    /// Grouping attribute (e.g. "frontend", "backend", "devops").
    pub category: String,

    /// Proficiency on a 1–5 scale.
    pub level: u8,

    pub years_experience: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single position. Collections are ordered current-first, then by
/// descending start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub start_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_current: bool,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,
}

impl ExperienceItem {
    /// Render the period string: `"Jan 2022 - Present"` for a current
    /// position, `"Jan 2022 - Jun 2023"` when an end date exists, and the
    /// bare start otherwise.
    pub fn period(&self) -> String {
        let start = self.start_date.format("%b %Y");
        if self.is_current {
            format!("{start} - Present")
        } else if let Some(end) = self.end_date {
            format!("{start} - {}", end.format("%b %Y"))
        } else {
            start.to_string()
        }
    }
}

/// Publication status of a project on the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectStatus::Completed => "completed",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Planned => "planned",
        };
        write!(f, "{s}")
    }
}

/// A portfolio project. Consumers order by `ai_priority` ascending, then
/// `impact_score` descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub status: ProjectStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,

    /// Rough build complexity on a 1–5 scale.
    pub complexity_level: u8,

    /// Editorial importance on the portfolio (higher = more impressive).
    pub impact_score: u32,

    /// Manual ranking for assistant context (lower = mentioned first).
    pub ai_priority: u32,
}

impl ProjectItem {
    /// The text used when summarizing this project: the short description
    /// when present, otherwise the full one.
    pub fn summary_text(&self) -> &str {
        self.short_description.as_deref().unwrap_or(&self.description)
    }
}

/// Everything the composer needs for one invocation: an immutable snapshot
/// of the profile store, fetched fresh per request and discarded after the
/// prompt is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBundle {
    pub profile: Profile,
    pub skills: Vec<SkillItem>,
    pub experiences: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
}

impl ProfileBundle {
    /// Apply the consumer sorting conventions in place: skills by level
    /// descending, experiences current-first then newest-first, projects by
    /// `ai_priority` ascending then `impact_score` descending.
    pub fn sort_for_composition(&mut self) {
        self.skills.sort_by(|a, b| b.level.cmp(&a.level));
        self.experiences.sort_by(|a, b| {
            b.is_current
                .cmp(&a.is_current)
                .then(b.start_date.cmp(&a.start_date))
        });
        self.projects.sort_by(|a, b| {
            a.ai_priority
                .cmp(&b.ai_priority)
                .then(b.impact_score.cmp(&a.impact_score))
        });
    }

    /// Minimal static bundle substituted when the profile store is
    /// unreachable, so a conversation can proceed with degraded
    /// personalization instead of aborting.
    pub fn placeholder() -> Self {
        Self {
            profile: Profile {
                name: "The developer".into(),
                role: "Software developer".into(),
                email: "contact@example.com".into(),
                location: "Remote".into(),
                experience_years: 0,
                availability: "unknown".into(),
                bio: "Profile details are temporarily unavailable.".into(),
            },
            skills: Vec::new(),
            experiences: Vec::new(),
            projects: Vec::new(),
        }
    }
}

/// The profile store seam.
///
/// Implementations: hosted BaaS REST accessor, in-memory fixture store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The store name (e.g., "rest", "fixture").
    fn name(&self) -> &str;

    async fn fetch_profile(&self) -> std::result::Result<Profile, ProfileError>;

    async fn fetch_skills(&self) -> std::result::Result<Vec<SkillItem>, ProfileError>;

    async fn fetch_experiences(&self) -> std::result::Result<Vec<ExperienceItem>, ProfileError>;

    async fn fetch_projects(&self) -> std::result::Result<Vec<ProjectItem>, ProfileError>;

    /// Fetch all four collections and apply the composition sort order.
    async fn fetch_bundle(&self) -> std::result::Result<ProfileBundle, ProfileError> {
        let mut bundle = ProfileBundle {
            profile: self.fetch_profile().await?,
            skills: self.fetch_skills().await?,
            experiences: self.fetch_experiences().await?,
            projects: self.fetch_projects().await?,
        };
        bundle.sort_for_composition();
        Ok(bundle)
    }
}
