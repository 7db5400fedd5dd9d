//! In-memory fixture store — deterministic data for tests, demos, and the
//! `compose` CLI command.

use async_trait::async_trait;
use chrono::NaiveDate;
use foliochat_core::error::ProfileError;
use foliochat_core::{
    ExperienceItem, Profile, ProfileBundle, ProfileStore, ProjectItem, ProjectStatus, SkillItem,
};

/// A store that serves a fixed bundle.
pub struct FixtureStore {
    bundle: ProfileBundle,
}

impl FixtureStore {
    /// Serve an arbitrary bundle.
    pub fn new(bundle: ProfileBundle) -> Self {
        Self { bundle }
    }

    /// The bundled sample profile used when no store is configured.
    pub fn sample() -> Self {
        let date = |y: i32, m: u32| NaiveDate::from_ymd_opt(y, m, 1).unwrap();

        let profile = Profile {
            name: "Alex Martin".into(),
            role: "Full-stack developer".into(),
            email: "alex@foliochat.dev".into(),
            location: "Lyon, France".into(),
            experience_years: 6,
            availability: "open to freelance".into(),
            bio: "Full-stack developer building web platforms, dashboards, and \
                  conversational interfaces."
                .into(),
        };

        let skills = vec![
            skill("React", "frontend", 5, 4),
            skill("TypeScript", "frontend", 5, 4),
            skill("Node", "backend", 4, 4),
            skill("PostgreSQL", "backend", 4, 3),
            skill("Python", "backend", 3, 2),
            skill("Docker", "devops", 3, 3),
        ];

        let experiences = vec![
            ExperienceItem {
                title: "Lead Developer".into(),
                company: "Brightline".into(),
                location: Some("Lyon".into()),
                start_date: date(2022, 3),
                end_date: None,
                is_current: true,
                description: "Leads a team of four on a B2B analytics platform".into(),
                technologies: vec!["React".into(), "Node".into(), "PostgreSQL".into()],
            },
            ExperienceItem {
                title: "Full-stack Developer".into(),
                company: "Webforge".into(),
                location: Some("Remote".into()),
                start_date: date(2019, 9),
                end_date: Some(date(2022, 2)),
                is_current: false,
                description: "Built client e-commerce sites and internal tooling".into(),
                technologies: vec!["Vue".into(), "Laravel".into(), "MySQL".into()],
            },
        ];

        let projects = vec![
            ProjectItem {
                id: "shopsmith".into(),
                title: "Shopsmith".into(),
                short_description: Some(
                    "Headless e-commerce storefront with real-time inventory".into(),
                ),
                description: "A headless e-commerce storefront".into(),
                technologies: vec!["React".into(), "Node".into(), "PostgreSQL".into()],
                tags: vec!["ecommerce".into()],
                status: ProjectStatus::Completed,
                live_url: Some("https://shopsmith.example.com".into()),
                complexity_level: 4,
                impact_score: 90,
                ai_priority: 1,
            },
            ProjectItem {
                id: "pulseboard".into(),
                title: "Pulseboard".into(),
                short_description: Some("Analytics dashboard with live charts".into()),
                description: "An analytics dashboard".into(),
                technologies: vec!["React".into(), "TypeScript".into()],
                tags: vec!["dashboard".into()],
                status: ProjectStatus::Completed,
                live_url: None,
                complexity_level: 3,
                impact_score: 70,
                ai_priority: 2,
            },
            ProjectItem {
                id: "helpdeskbot".into(),
                title: "Helpdesk Bot".into(),
                short_description: Some("Support chatbot with intent routing".into()),
                description: "A support chatbot".into(),
                technologies: vec!["Python".into(), "FastAPI".into()],
                tags: vec!["chatbot".into()],
                status: ProjectStatus::InProgress,
                live_url: None,
                complexity_level: 3,
                impact_score: 60,
                ai_priority: 3,
            },
        ];

        let mut bundle = ProfileBundle {
            profile,
            skills,
            experiences,
            projects,
        };
        bundle.sort_for_composition();
        Self::new(bundle)
    }
}

fn skill(name: &str, category: &str, level: u8, years: u32) -> SkillItem {
    SkillItem {
        name: name.into(),
        category: category.into(),
        level,
        years_experience: years,
        description: None,
    }
}

#[async_trait]
impl ProfileStore for FixtureStore {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_profile(&self) -> Result<Profile, ProfileError> {
        Ok(self.bundle.profile.clone())
    }

    async fn fetch_skills(&self) -> Result<Vec<SkillItem>, ProfileError> {
        Ok(self.bundle.skills.clone())
    }

    async fn fetch_experiences(&self) -> Result<Vec<ExperienceItem>, ProfileError> {
        Ok(self.bundle.experiences.clone())
    }

    async fn fetch_projects(&self) -> Result<Vec<ProjectItem>, ProfileError> {
        Ok(self.bundle.projects.clone())
    }
}
