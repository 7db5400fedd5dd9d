//! Relevance Selector — heuristic triage of profile categories.
//!
//! Scores each category against keyword sets found in the user message and
//! records any named technologies for downstream filtering. This is a
//! triage, not a classifier: no ML, no mutual exclusivity — a message
//! matching several keyword sets scores all of them.

use foliochat_core::Category;
use serde::{Deserialize, Serialize};

/// Score a category keyword match contributes. Existence-based: a category
/// is scored at most once per call, however many of its keywords appear.
const CATEGORY_MATCH_SCORE: u32 = 10;

/// Score a named-technology mention boosts `projects` and `skills` to,
/// unless already scored higher.
const TECHNOLOGY_BOOST_SCORE: u32 = 8;

/// Keywords that select the `projects` category.
const PROJECT_KEYWORDS: &[&str] = &[
    "project",
    "projet",
    "portfolio",
    "realization",
    "realisation",
    "réalisation",
    "built",
    "application",
    "app",
    "demo",
    "showcase",
];

/// Keywords that select the `skills` category.
const SKILL_KEYWORDS: &[&str] = &[
    "skill",
    "compétence",
    "competence",
    "technology",
    "technologie",
    "technologies",
    "stack",
    "framework",
    "language",
    "langage",
    "tool",
    "outil",
];

/// Keywords that select the `experience` category.
const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "expérience",
    "career",
    "carrière",
    "job",
    "company",
    "entreprise",
    "position",
    "poste",
    "background",
    "parcours",
    "employer",
];

/// Named technologies scanned for in every message.
const KNOWN_TECHNOLOGIES: &[&str] = &[
    "react",
    "next",
    "vue",
    "angular",
    "node",
    "nodejs",
    "typescript",
    "javascript",
    "python",
    "django",
    "php",
    "laravel",
    "symfony",
    "rust",
    "java",
    "flutter",
    "tailwind",
    "docker",
    "kubernetes",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "aws",
    "firebase",
    "supabase",
    "graphql",
];

/// A category with its relevance score for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: u32,
}

/// The full triage result for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Scored categories, highest first. Ties broken by the fixed default
    /// ordering (projects > skills > experience). Never empty.
    pub priorities: Vec<CategoryScore>,

    /// Technology tokens found in the message, lowercase, in scan order.
    pub mentioned_technologies: Vec<String>,
}

/// The selector itself. Stateless — create one and reuse it.
#[derive(Debug, Clone, Default)]
pub struct RelevanceSelector;

impl RelevanceSelector {
    pub fn new() -> Self {
        Self
    }

    /// Score categories for a user message.
    pub fn select_priorities(&self, user_message: &str) -> RelevanceReport {
        let message = user_message.to_lowercase();

        let mut scores: [(Category, u32); 3] = [
            (Category::Projects, 0),
            (Category::Skills, 0),
            (Category::Experience, 0),
        ];

        for (category, score) in scores.iter_mut() {
            let keywords = match category {
                Category::Projects => PROJECT_KEYWORDS,
                Category::Skills => SKILL_KEYWORDS,
                Category::Experience => EXPERIENCE_KEYWORDS,
            };
            if keywords.iter().any(|k| message.contains(k)) {
                *score = CATEGORY_MATCH_SCORE;
            }
        }

        let mentioned_technologies: Vec<String> = KNOWN_TECHNOLOGIES
            .iter()
            .filter(|t| message.contains(*t))
            .map(|t| t.to_string())
            .collect();

        if !mentioned_technologies.is_empty() {
            for (category, score) in scores.iter_mut() {
                if matches!(category, Category::Projects | Category::Skills)
                    && *score < TECHNOLOGY_BOOST_SCORE
                {
                    *score = TECHNOLOGY_BOOST_SCORE;
                }
            }
        }

        let mut priorities: Vec<CategoryScore> = scores
            .iter()
            .filter(|(_, score)| *score > 0)
            .map(|&(category, score)| CategoryScore { category, score })
            .collect();

        // No keyword matched anything: fall back to the default ordering so
        // the composer always has something to include.
        if priorities.is_empty() {
            priorities = Category::ALL
                .iter()
                .map(|&category| CategoryScore {
                    category,
                    score: category.default_score(),
                })
                .collect();
        }

        priorities.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.category.tie_break_rank().cmp(&b.category.tie_break_rank()))
        });

        RelevanceReport {
            priorities,
            mentioned_technologies,
        }
    }
}
