//! Budget Allocator — walks categories in priority order and assembles the
//! final context.
//!
//! # Algorithm
//!
//! 1. Render the fixed `personal` and `summary` blocks first; they always
//!    ship and claim their tokens before anything else
//! 2. Subtract the safety margin from the remaining budget
//! 3. Walk the prioritized categories, handing each the *remaining* budget
//!    (no equal split — earlier categories get first claim)
//! 4. Stop once the budget is exhausted
//! 5. Omit categories that produce no text (empty source collections)

use foliochat_core::{Category, Profile, ProfileBundle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::SectionFormatter;
use crate::relevance::{CategoryScore, RelevanceSelector};
use crate::token::ComposerLimits;

/// Section keys for the fixed blocks.
pub const PERSONAL_SECTION: &str = "personal";
pub const SUMMARY_SECTION: &str = "summary";

/// One named slice of the composed context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedSection {
    pub key: String,
    pub text: String,
    pub tokens: usize,
}

/// Accounting metadata for one composition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeStats {
    /// The character budget this run was given.
    pub budget_chars: usize,
    /// The same budget as tokens.
    pub budget_tokens: usize,
    /// Tokens consumed by all emitted sections.
    pub used_tokens: usize,
    /// Categories dropped because the budget ran out before their turn.
    pub skipped: Vec<Category>,
}

/// The composed context: ordered sections plus accounting. Ephemeral —
/// rebuilt per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedContext {
    pub sections: Vec<ComposedSection>,
    pub stats: ComposeStats,
}

impl ComposedContext {
    /// Look up a section blob by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.text.as_str())
    }

    /// Render the system prompt: fixed instruction line plus every section
    /// under a bracketed header, in composition order.
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::with_capacity(2048);
        prompt.push_str(
            "You are the AI assistant embedded in this developer's portfolio site. \
             Answer visitor questions using only the profile context below. \
             Be concise, factual, and never invent details.",
        );
        for section in &self.sections {
            prompt.push_str("\n\n[");
            prompt.push_str(&section.key.to_uppercase());
            prompt.push_str("]\n");
            prompt.push_str(&section.text);
        }
        prompt
    }
}

/// The composer. Stateless — create one and reuse it across requests.
#[derive(Debug, Clone)]
pub struct ContextComposer {
    limits: ComposerLimits,
    selector: RelevanceSelector,
    formatter: SectionFormatter,
}

impl ContextComposer {
    pub fn new(limits: ComposerLimits) -> Self {
        Self {
            formatter: SectionFormatter::new(limits.clone()),
            selector: RelevanceSelector::new(),
            limits,
        }
    }

    /// Create a composer with the default limits.
    pub fn with_default_limits() -> Self {
        Self::new(ComposerLimits::default())
    }

    /// Run the full pipeline for a user message: relevance triage, then
    /// budgeted composition.
    pub fn compose_for_message(
        &self,
        bundle: &ProfileBundle,
        user_message: &str,
        total_budget_chars: usize,
    ) -> ComposedContext {
        let report = self.selector.select_priorities(user_message);
        self.compose(
            bundle,
            &report.priorities,
            &report.mentioned_technologies,
            total_budget_chars,
        )
    }

    /// Compose from pre-computed priorities.
    pub fn compose(
        &self,
        bundle: &ProfileBundle,
        priorities: &[CategoryScore],
        mentioned_technologies: &[String],
        total_budget_chars: usize,
    ) -> ComposedContext {
        let budget_tokens = self.limits.tokens_for_chars(total_budget_chars);
        let mut sections: Vec<ComposedSection> = Vec::with_capacity(priorities.len() + 2);

        // Fixed blocks first: always present, first claim on the budget.
        let personal = render_personal(&bundle.profile);
        let summary = render_summary(&bundle.profile);
        let personal_tokens = self.limits.estimate_tokens(&personal);
        let summary_tokens = self.limits.estimate_tokens(&summary);
        sections.push(ComposedSection {
            key: PERSONAL_SECTION.into(),
            text: personal,
            tokens: personal_tokens,
        });
        sections.push(ComposedSection {
            key: SUMMARY_SECTION.into(),
            text: summary,
            tokens: summary_tokens,
        });

        let mut remaining = budget_tokens
            .saturating_sub(personal_tokens + summary_tokens)
            .saturating_sub(self.limits.safety_margin_tokens);

        let mut skipped: Vec<Category> = Vec::new();
        for score in priorities {
            if remaining == 0 {
                skipped.push(score.category);
                continue;
            }

            let Some(text) = self.formatter.format(
                score.category,
                bundle,
                remaining,
                mentioned_technologies,
            ) else {
                // Empty source collection: omitted, not an empty string.
                continue;
            };

            let tokens = self.limits.estimate_tokens(&text);
            debug!(
                category = %score.category,
                tokens,
                remaining,
                "Composed section"
            );
            sections.push(ComposedSection {
                key: score.category.section_key().into(),
                text,
                tokens,
            });
            remaining = remaining.saturating_sub(tokens);
        }

        let used_tokens = sections.iter().map(|s| s.tokens).sum();
        ComposedContext {
            sections,
            stats: ComposeStats {
                budget_chars: total_budget_chars,
                budget_tokens,
                used_tokens,
                skipped,
            },
        }
    }
}

fn render_personal(profile: &Profile) -> String {
    format!(
        "Name: {}\nRole: {}\nEmail: {}\nLocation: {}\nAvailability: {}",
        profile.name, profile.role, profile.email, profile.location, profile.availability
    )
}

fn render_summary(profile: &Profile) -> String {
    format!(
        "{} years of professional experience. {}",
        profile.experience_years, profile.bio
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use foliochat_core::{ExperienceItem, ProjectItem, ProjectStatus, SkillItem};

    fn skill(name: &str, category: &str, level: u8, years: u32) -> SkillItem {
        SkillItem {
            name: name.into(),
            category: category.into(),
            level,
            years_experience: years,
            description: None,
        }
    }

    fn project(title: &str, techs: &[&str], priority: u32) -> ProjectItem {
        ProjectItem {
            id: title.to_lowercase(),
            title: title.into(),
            short_description: Some(format!("{title} in a sentence")),
            description: format!("{title} long description"),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            tags: vec![],
            status: ProjectStatus::Completed,
            live_url: None,
            complexity_level: 3,
            impact_score: 50,
            ai_priority: priority,
        }
    }

    fn experience(title: &str) -> ExperienceItem {
        ExperienceItem {
            title: title.into(),
            company: "Acme".into(),
            location: None,
            start_date: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
            end_date: None,
            is_current: true,
            description: "Owned the product platform end to end".into(),
            technologies: vec!["React".into(), "Node".into()],
        }
    }

    fn bundle() -> ProfileBundle {
        ProfileBundle {
            profile: foliochat_core::Profile {
                name: "Alex Martin".into(),
                role: "Full-stack developer".into(),
                email: "alex@example.com".into(),
                location: "Lyon, France".into(),
                experience_years: 6,
                availability: "open to freelance".into(),
                bio: "Builds web platforms with a focus on DX.".into(),
            },
            skills: vec![
                skill("React", "frontend", 5, 4),
                skill("Node", "backend", 4, 3),
                skill("Docker", "devops", 3, 2),
            ],
            experiences: vec![experience("Lead Developer")],
            projects: vec![
                project("Shop", &["React", "Node"], 1),
                project("Dashboard", &["Vue"], 2),
                project("Chatbot", &["Python"], 3),
            ],
        }
    }

    fn composer() -> ContextComposer {
        ContextComposer::with_default_limits()
    }

    #[test]
    fn personal_and_summary_always_present_and_first() {
        let ctx = composer().compose_for_message(&bundle(), "hello", 4000);
        assert_eq!(ctx.sections[0].key, PERSONAL_SECTION);
        assert_eq!(ctx.sections[1].key, SUMMARY_SECTION);
        assert!(ctx.get("personal").unwrap().contains("Alex Martin"));
        assert!(ctx.get("summary").unwrap().contains("6 years"));
    }

    #[test]
    fn fixed_blocks_survive_zero_budget() {
        let ctx = composer().compose_for_message(&bundle(), "hello", 0);
        assert!(ctx.get("personal").is_some());
        assert!(ctx.get("summary").is_some());
        // All categories skipped: budget exhausted before any of them.
        assert_eq!(ctx.stats.skipped.len(), 3);
    }

    #[test]
    fn default_ordering_without_keywords() {
        let ctx = composer().compose_for_message(&bundle(), "Tell me more", 4000);
        let keys: Vec<&str> = ctx.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["personal", "summary", "projects", "skills", "experiences"]
        );
    }

    #[test]
    fn react_question_filters_skills_section() {
        let ctx =
            composer().compose_for_message(&bundle(), "What React skills does he have?", 4000);
        let skills = ctx.get("skills").unwrap();
        assert_eq!(skills, "FRONTEND: React (5/5, 4years)");
    }

    #[test]
    fn budget_monotonicity() {
        let b = bundle();
        let small = composer().compose_for_message(&b, "Tell me everything", 1000);
        let large = composer().compose_for_message(&b, "Tell me everything", 8000);

        assert!(large.sections.len() >= small.sections.len());
        let small_len: usize = small.sections.iter().map(|s| s.text.len()).sum();
        let large_len: usize = large.sections.iter().map(|s| s.text.len()).sum();
        assert!(large_len >= small_len);
    }

    #[test]
    fn empty_collections_are_omitted_not_empty() {
        let mut b = bundle();
        b.projects.clear();
        let ctx = composer().compose_for_message(&b, "projects and skills", 4000);
        assert!(ctx.get("projects").is_none());
        assert!(ctx.get("skills").is_some());
        assert!(ctx.sections.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn used_tokens_accounted() {
        let ctx = composer().compose_for_message(&bundle(), "skills?", 4000);
        let sum: usize = ctx.sections.iter().map(|s| s.tokens).sum();
        assert_eq!(ctx.stats.used_tokens, sum);
        assert_eq!(ctx.stats.budget_tokens, 1000);
        assert_eq!(ctx.stats.budget_chars, 4000);
    }

    #[test]
    fn composition_is_deterministic() {
        let b = bundle();
        let a = composer().compose_for_message(&b, "react projects", 4000);
        let c = composer().compose_for_message(&b, "react projects", 4000);
        assert_eq!(a.system_prompt(), c.system_prompt());
        assert_eq!(a.stats.used_tokens, c.stats.used_tokens);
    }

    #[test]
    fn system_prompt_carries_headers_in_order() {
        let ctx = composer().compose_for_message(&bundle(), "hello there", 4000);
        let prompt = ctx.system_prompt();
        let personal_pos = prompt.find("[PERSONAL]").unwrap();
        let summary_pos = prompt.find("[SUMMARY]").unwrap();
        let projects_pos = prompt.find("[PROJECTS]").unwrap();
        assert!(personal_pos < summary_pos);
        assert!(summary_pos < projects_pos);
    }

    #[test]
    fn placeholder_bundle_composes_fixed_blocks_only() {
        let ctx = composer().compose_for_message(&ProfileBundle::placeholder(), "skills?", 4000);
        assert_eq!(ctx.sections.len(), 2);
        assert!(ctx.get("personal").unwrap().contains("The developer"));
    }
}
