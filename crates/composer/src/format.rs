//! Section Formatter — renders one category into compact text.
//!
//! Selection happens before formatting: the section budget pays for
//! `max(3, tokens / tokens_per_item)` items, and a non-empty technology
//! filter re-slices to `max(2, max_items / 2)` items *of the filtered set* —
//! never re-adding unfiltered items. Missing optional fields degrade to
//! empty substitutions; this component never errors.

use foliochat_core::{Category, ExperienceItem, ProfileBundle, ProjectItem, SkillItem};

use crate::token::ComposerLimits;

/// Minimum items per selected category with any data at all.
const MIN_ITEMS: usize = 3;

/// Minimum items kept from a non-empty technology-filtered set.
const MIN_FILTERED_ITEMS: usize = 2;

/// Character cap for a project description.
const PROJECT_DESC_CHARS: usize = 120;

/// Character cap for an experience description.
const EXPERIENCE_DESC_CHARS: usize = 80;

/// Technologies listed per project line.
const PROJECT_TECH_COUNT: usize = 4;

/// Technologies listed per experience line.
const EXPERIENCE_TECH_COUNT: usize = 3;

/// Formats one category of profile data into a bounded text section.
#[derive(Debug, Clone)]
pub struct SectionFormatter {
    limits: ComposerLimits,
}

impl SectionFormatter {
    pub fn new(limits: ComposerLimits) -> Self {
        Self { limits }
    }

    /// Render a category. Returns `None` when the (possibly filtered)
    /// source collection is empty — the allocator omits the section
    /// entirely rather than emitting an empty string.
    pub fn format(
        &self,
        category: Category,
        bundle: &ProfileBundle,
        max_tokens_for_section: usize,
        mentioned_technologies: &[String],
    ) -> Option<String> {
        let max_items = self
            .limits
            .items_for_tokens(max_tokens_for_section)
            .max(MIN_ITEMS);

        match category {
            Category::Projects => {
                let selected = select(
                    &bundle.projects,
                    max_items,
                    mentioned_technologies,
                    project_mentions,
                );
                format_projects(&selected)
            }
            Category::Skills => {
                let selected = select(
                    &bundle.skills,
                    max_items,
                    mentioned_technologies,
                    skill_mentions,
                );
                format_skills(&selected)
            }
            Category::Experience => {
                // Experience is never technology-filtered.
                let selected: Vec<&ExperienceItem> =
                    bundle.experiences.iter().take(max_items).collect();
                format_experiences(&selected)
            }
        }
    }
}

/// Slice a pre-sorted collection to the item budget, applying the
/// technology filter when one is active. A non-empty filtered set wins and
/// is re-sliced to `max(2, max_items / 2)`; an empty one falls back to the
/// unfiltered slice.
fn select<'a, T>(
    items: &'a [T],
    max_items: usize,
    mentioned: &[String],
    matches: fn(&T, &str) -> bool,
) -> Vec<&'a T> {
    if !mentioned.is_empty() {
        let filtered: Vec<&T> = items
            .iter()
            .filter(|item| mentioned.iter().any(|tech| matches(item, tech)))
            .collect();
        if !filtered.is_empty() {
            let cap = (max_items / 2).max(MIN_FILTERED_ITEMS);
            return filtered.into_iter().take(cap).collect();
        }
    }
    items.iter().take(max_items).collect()
}

/// Does a project mention a technology (technologies, tags, or title)?
fn project_mentions(project: &ProjectItem, tech: &str) -> bool {
    project
        .technologies
        .iter()
        .chain(project.tags.iter())
        .any(|t| t.to_lowercase().contains(tech))
        || project.title.to_lowercase().contains(tech)
}

/// Does a skill mention a technology (by name)?
fn skill_mentions(skill: &SkillItem, tech: &str) -> bool {
    skill.name.to_lowercase().contains(tech)
}

fn format_projects(projects: &[&ProjectItem]) -> Option<String> {
    if projects.is_empty() {
        return None;
    }

    let lines: Vec<String> = projects
        .iter()
        .map(|p| {
            let mut line = format!(
                "{} ({}): {}",
                p.title,
                p.status,
                truncate(p.summary_text(), PROJECT_DESC_CHARS)
            );
            if !p.technologies.is_empty() {
                let techs: Vec<&str> = p
                    .technologies
                    .iter()
                    .take(PROJECT_TECH_COUNT)
                    .map(String::as_str)
                    .collect();
                line.push_str(&format!(" | Tech: {}", techs.join(", ")));
            }
            if let Some(url) = &p.live_url {
                line.push_str(&format!(" | Live: {url}"));
            }
            line
        })
        .collect();

    Some(lines.join("\n"))
}

fn format_skills(skills: &[&SkillItem]) -> Option<String> {
    if skills.is_empty() {
        return None;
    }

    // Group by category attribute, preserving the level-sorted order within
    // groups and the order of first appearance across groups.
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<&SkillItem>> =
        std::collections::HashMap::new();

    for skill in skills {
        let key = skill.category.to_uppercase();
        if !groups.contains_key(&key) {
            group_order.push(key.clone());
        }
        groups.entry(key).or_default().push(skill);
    }

    let lines: Vec<String> = group_order
        .iter()
        .map(|key| {
            let entries: Vec<String> = groups[key]
                .iter()
                .map(|s| format!("{} ({}/5, {}years)", s.name, s.level, s.years_experience))
                .collect();
            format!("{key}: {}", entries.join(", "))
        })
        .collect();

    Some(lines.join("\n"))
}

fn format_experiences(experiences: &[&ExperienceItem]) -> Option<String> {
    if experiences.is_empty() {
        return None;
    }

    let lines: Vec<String> = experiences
        .iter()
        .map(|e| {
            let mut line = format!(
                "{} at {} ({}): {}",
                e.title,
                e.company,
                e.period(),
                truncate(&e.description, EXPERIENCE_DESC_CHARS)
            );
            if !e.technologies.is_empty() {
                let techs: Vec<&str> = e
                    .technologies
                    .iter()
                    .take(EXPERIENCE_TECH_COUNT)
                    .map(String::as_str)
                    .collect();
                line.push_str(&format!(" | Tech: {}", techs.join(", ")));
            }
            line
        })
        .collect();

    Some(lines.join("\n"))
}

/// Truncate at a character boundary with an ellipsis marker.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
