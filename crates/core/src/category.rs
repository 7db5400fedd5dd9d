//! Profile content categories.
//!
//! The composer selects and formats content per category. Using an enum
//! (instead of stringly-typed dispatch) makes adding a category a
//! compile-time-checked extension point: every `match` over `Category`
//! is exhaustive.

use serde::{Deserialize, Serialize};

/// A category of profile content that can be selected into the chat context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Projects,
    Skills,
    Experience,
}

impl Category {
    /// All categories in default priority order (highest first).
    pub const ALL: [Category; 3] = [Category::Projects, Category::Skills, Category::Experience];

    /// The section key under which this category's text appears in the
    /// composed context.
    pub fn section_key(&self) -> &'static str {
        match self {
            Category::Projects => "projects",
            Category::Skills => "skills",
            Category::Experience => "experiences",
        }
    }

    /// Default priority score used when a message matches no category
    /// keywords at all. Guarantees the composer always has an ordering.
    pub fn default_score(&self) -> u32 {
        match self {
            Category::Projects => 5,
            Category::Skills => 4,
            Category::Experience => 3,
        }
    }

    /// Tie-break rank: lower wins. Follows the fixed default ordering
    /// (projects > skills > experience).
    pub fn tie_break_rank(&self) -> u32 {
        match self {
            Category::Projects => 0,
            Category::Skills => 1,
            Category::Experience => 2,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.section_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_keys_are_stable() {
        assert_eq!(Category::Projects.section_key(), "projects");
        assert_eq!(Category::Skills.section_key(), "skills");
        assert_eq!(Category::Experience.section_key(), "experiences");
    }

    #[test]
    fn default_scores_follow_fixed_ordering() {
        assert!(Category::Projects.default_score() > Category::Skills.default_score());
        assert!(Category::Skills.default_score() > Category::Experience.default_score());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::Experience).unwrap();
        assert_eq!(json, "\"experience\"");
    }
}
