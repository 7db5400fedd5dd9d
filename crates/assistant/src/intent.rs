//! Intent classification — an ordered rule table, not a state machine.
//!
//! Rules are data (`{intent, patterns}`) so the table can be unit-tested
//! and extended without touching control flow. Classification is stateless
//! and single-shot: the first intent whose pattern set matches wins; no
//! match resolves to `Default`.

use foliochat_core::Intent;
use regex::Regex;

/// Confidence floor for any classification.
const BASE_CONFIDENCE: f32 = 0.3;

/// Confidence added per distinct matching pattern of the winning intent.
const CONFIDENCE_PER_MATCH: f32 = 0.2;

/// Technologies recognized as entities in a message.
const KNOWN_TECHNOLOGIES: &[&str] = &[
    "react",
    "vue",
    "angular",
    "next",
    "node",
    "typescript",
    "javascript",
    "python",
    "django",
    "php",
    "laravel",
    "symfony",
    "rust",
    "flutter",
    "docker",
    "postgresql",
    "mysql",
    "mongodb",
    "aws",
    "firebase",
    "supabase",
    "tailwind",
];

/// Project types recognized as entities in a message.
const PROJECT_TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    ("ecommerce", &["ecommerce", "e-commerce", "shop", "boutique", "store"]),
    ("dashboard", &["dashboard", "tableau de bord", "analytics"]),
    ("portfolio", &["portfolio"]),
    ("chatbot", &["chatbot", "bot", "assistant"]),
];

/// One row of the rule table.
#[derive(Debug)]
pub struct IntentRule {
    pub intent: Intent,
    pub patterns: Vec<Regex>,
}

/// The classification result for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,

    /// `min(0.3 + 0.2 × match_count, 1.0)` where `match_count` is the
    /// number of distinct patterns of the winning intent that matched.
    pub confidence: f32,

    /// Technologies mentioned in the message, lowercase.
    pub technologies: Vec<String>,

    /// Project types mentioned in the message.
    pub project_types: Vec<String>,
}

/// The classifier. Compiles its rule table once at construction.
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Build the default rule table. Order matters: the first matching
    /// intent wins.
    pub fn new() -> Self {
        let rule = |intent: Intent, patterns: &[&str]| IntentRule {
            intent,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("invalid intent pattern"))
                .collect(),
        };

        Self {
            rules: vec![
                rule(
                    Intent::Skills,
                    &[
                        r"skills?",
                        r"comp[ée]tences?",
                        r"technolog",
                        r"\bstack\b",
                        r"ma[îi]trise",
                    ],
                ),
                rule(
                    Intent::Projects,
                    &[
                        r"projects?",
                        r"projets?",
                        r"portfolio",
                        r"r[ée]alisations?",
                        r"\bbuilt\b|\bbuild\b",
                    ],
                ),
                rule(
                    Intent::Experience,
                    &[
                        r"exp[ée]riences?",
                        r"career|carri[èe]re",
                        r"\bjob\b|company|entreprise",
                        r"background|parcours",
                    ],
                ),
                rule(
                    Intent::Contact,
                    &[
                        r"contact",
                        r"e-?mail",
                        r"\breach\b|joindre",
                        r"\bhire\b|recruter|embaucher",
                    ],
                ),
                rule(
                    Intent::Cv,
                    &[r"\bcv\b", r"r[ée]sum[ée]", r"download|t[ée]l[ée]charger"],
                ),
                rule(
                    Intent::Greeting,
                    &[
                        r"\b(hi|hello|hey)\b",
                        r"bonjour|salut|coucou",
                        r"good (morning|afternoon|evening)",
                    ],
                ),
                rule(
                    Intent::Help,
                    &[r"\bhelp\b", r"\baide\b|aidez", r"what can you|que (peux|sais)-tu"],
                ),
            ],
        }
    }

    /// Access the rule table (for tests and extensions).
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classify a message. Never fails; an unrecognized message yields the
    /// `Default` intent at the confidence floor.
    pub fn classify(&self, message: &str) -> Classification {
        let message = message.to_lowercase();

        let winner = self.rules.iter().find_map(|rule| {
            let match_count = rule
                .patterns
                .iter()
                .filter(|p| p.is_match(&message))
                .count();
            (match_count > 0).then_some((rule.intent, match_count))
        });

        let (intent, match_count) = winner.unwrap_or((Intent::Default, 0));
        let confidence =
            (BASE_CONFIDENCE + CONFIDENCE_PER_MATCH * match_count as f32).min(1.0);

        let technologies = KNOWN_TECHNOLOGIES
            .iter()
            .filter(|t| message.contains(*t))
            .map(|t| t.to_string())
            .collect();

        let project_types = PROJECT_TYPE_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
            .map(|(name, _)| name.to_string())
            .collect();

        Classification {
            intent,
            confidence,
            technologies,
            project_types,
        }
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new()
    }

    #[test]
    fn skills_question_classified() {
        let c = classifier().classify("What are your main skills?");
        assert_eq!(c.intent, Intent::Skills);
    }

    #[test]
    fn french_greeting_classified() {
        let c = classifier().classify("Bonjour !");
        assert_eq!(c.intent, Intent::Greeting);
    }

    #[test]
    fn first_matching_rule_wins() {
        // Matches both skills and projects keyword sets; skills is earlier.
        let c = classifier().classify("What skills did these projects need?");
        assert_eq!(c.intent, Intent::Skills);
    }

    #[test]
    fn unknown_message_is_default_at_floor() {
        let c = classifier().classify("xyzzy plugh");
        assert_eq!(c.intent, Intent::Default);
        assert!((c.confidence - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn confidence_grows_with_matches_and_is_capped() {
        let one = classifier().classify("your skills?");
        assert!((one.confidence - 0.5).abs() < f32::EPSILON);

        // Four skill patterns match: skill, compétence, technolog, stack.
        let many =
            classifier().classify("skills, compétences, technologies, and the whole stack");
        assert!(many.confidence <= 1.0);
        assert!(many.confidence > one.confidence);
    }

    #[test]
    fn confidence_always_in_bounds() {
        for message in [
            "",
            "hello",
            "cv please",
            "skills compétences technologies stack maîtrise",
            "completely unrelated gibberish",
        ] {
            let c = classifier().classify(message);
            assert!(c.confidence >= 0.3, "confidence below floor for {message:?}");
            assert!(c.confidence <= 1.0, "confidence above cap for {message:?}");
        }
    }

    #[test]
    fn technology_entities_extracted() {
        let c = classifier().classify("Any React or Docker experience?");
        assert_eq!(c.technologies, vec!["react".to_string(), "docker".to_string()]);
    }

    #[test]
    fn project_type_entities_extracted() {
        let c = classifier().classify("Show me an e-commerce dashboard project");
        assert!(c.project_types.contains(&"ecommerce".to_string()));
        assert!(c.project_types.contains(&"dashboard".to_string()));
    }

    #[test]
    fn cv_word_boundary_respected() {
        let c = classifier().classify("I need your cv");
        assert_eq!(c.intent, Intent::Cv);
        // "cvs" inside another word must not match the \bcv\b pattern
        let c2 = classifier().classify("canvas painting");
        assert_ne!(c2.intent, Intent::Cv);
    }

    #[test]
    fn rule_table_is_inspectable() {
        let classifier = classifier();
        assert_eq!(classifier.rules().len(), 7);
        assert_eq!(classifier.rules()[0].intent, Intent::Skills);
    }
}
