//! Skill name suggestions.
//!
//! An insertion-ordered set of normalized skill names, seeded with common
//! skills and grown from profiles seen at runtime.

use std::collections::HashSet;

/// Default suggestion limit.
pub const DEFAULT_SUGGEST_LIMIT: usize = 20;

const SEED_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "nodejs",
    "leadership",
    "communication",
    "product-management",
    "design",
    "ui-ux",
    "python",
    "data-analysis",
    "project-management",
    "strategy",
    "negotiation",
    "marketing",
    "sales",
    "team-building",
    "problem-solving",
    "innovation",
];

/// Normalize a skill name: trim, lowercase, whitespace runs become `-`.
pub fn normalize_skill(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone)]
pub struct SkillCatalog {
    order: Vec<String>,
    members: HashSet<String>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.add_skills(SEED_SKILLS.iter().copied());
        catalog
    }
}

impl SkillCatalog {
    /// A catalog without the seed list.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// Add skills, skipping names that normalize to nothing or already exist.
    pub fn add_skills<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for skill in skills {
            let key = normalize_skill(skill.as_ref());
            if !key.is_empty() && self.members.insert(key.clone()) {
                self.order.push(key);
            }
        }
    }

    /// Up to `limit` skills containing `query` (normalized). An empty query
    /// returns the first `limit` skills.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        let query = normalize_skill(query);
        self.order
            .iter()
            .filter(|s| query.is_empty() || s.contains(&query))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_skill("  Product   Management "), "product-management");
        assert_eq!(normalize_skill("Rust"), "rust");
        assert_eq!(normalize_skill("   "), "");
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.len(), SEED_SKILLS.len());
        assert_eq!(catalog.suggest("", 3), vec!["javascript", "typescript", "react"]);
    }

    #[test]
    fn test_suggest_substring() {
        let catalog = SkillCatalog::default();
        assert_eq!(
            catalog.suggest("Management", DEFAULT_SUGGEST_LIMIT),
            vec!["product-management", "project-management"]
        );
        assert_eq!(catalog.suggest("script", 1), vec!["javascript"]);
        assert!(catalog.suggest("cobol", 10).is_empty());
    }

    #[test]
    fn test_add_skills_dedupes_after_normalizing() {
        let mut catalog = SkillCatalog::empty();
        catalog.add_skills(["Machine Learning", "machine   learning", "", "Rust"]);
        assert_eq!(catalog.suggest("", 10), vec!["machine-learning", "rust"]);
    }
}
