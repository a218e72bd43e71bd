//! Thematic grouping of missing job skills

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Skill gap category. Declaration order is the matching precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapCategory {
    Backend,
    Frontend,
    Data,
    Cloud,
    General,
}

/// Trigger keywords per category, checked top to bottom
const CATEGORY_TRIGGERS: &[(GapCategory, &[&str])] = &[
    (GapCategory::Backend, &["node", "django", "fastapi", "flask", "api"]),
    (GapCategory::Frontend, &["react", "css", "html", "bootstrap", "tailwind", "frontend", "ui"]),
    (GapCategory::Data, &["machine learning", "deep learning", "pandas", "numpy", "data"]),
    (GapCategory::Cloud, &["aws", "azure", "gcp", "cloud", "docker"]),
];

impl GapCategory {
    pub const ALL: [GapCategory; 5] = [
        GapCategory::Backend,
        GapCategory::Frontend,
        GapCategory::Data,
        GapCategory::Cloud,
        GapCategory::General,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GapCategory::Backend => "backend",
            GapCategory::Frontend => "frontend",
            GapCategory::Data => "data",
            GapCategory::Cloud => "cloud",
            GapCategory::General => "general",
        }
    }

    /// Human label used in suggestions and reports
    pub fn label(&self) -> &'static str {
        match self {
            GapCategory::Backend => "Backend",
            GapCategory::Frontend => "Frontend",
            GapCategory::Data => "Data / ML",
            GapCategory::Cloud => "Cloud / DevOps",
            GapCategory::General => "General",
        }
    }

    pub fn triggers(&self) -> &'static [&'static str] {
        CATEGORY_TRIGGERS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, triggers)| *triggers)
            .unwrap_or(&[])
    }
}

impl fmt::Display for GapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// First category whose trigger occurs in the lowercase skill, else `General`
pub fn categorize_skill(skill: &str) -> GapCategory {
    let lower = skill.to_lowercase();

    CATEGORY_TRIGGERS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(category, _)| *category)
        .unwrap_or(GapCategory::General)
}

/// Missing skills grouped by category.
///
/// Only non-empty categories are present; iteration follows category
/// precedence and each group keeps the input order of its skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGaps {
    groups: BTreeMap<GapCategory, Vec<String>>,
}

impl SkillGaps {
    pub fn get(&self, category: GapCategory) -> Option<&[String]> {
        self.groups.get(&category).map(|skills| skills.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (GapCategory, &[String])> {
        self.groups.iter().map(|(category, skills)| (*category, skills.as_slice()))
    }

    pub fn categories(&self) -> Vec<GapCategory> {
        self.groups.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of grouped skills
    pub fn skill_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

pub fn group_missing_skills<S: AsRef<str>>(missing: &[S]) -> SkillGaps {
    let mut groups: BTreeMap<GapCategory, Vec<String>> = BTreeMap::new();

    for skill in missing {
        let skill = skill.as_ref();
        groups
            .entry(categorize_skill(skill))
            .or_default()
            .push(skill.to_string());
    }

    SkillGaps { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_by_trigger() {
        assert_eq!(categorize_skill("django"), GapCategory::Backend);
        assert_eq!(categorize_skill("REST API"), GapCategory::Backend);
        assert_eq!(categorize_skill("tailwind"), GapCategory::Frontend);
        assert_eq!(categorize_skill("Deep Learning"), GapCategory::Data);
        assert_eq!(categorize_skill("docker"), GapCategory::Cloud);
        assert_eq!(categorize_skill("sql"), GapCategory::General);
        assert_eq!(categorize_skill("communication"), GapCategory::General);
    }

    #[test]
    fn test_precedence_first_match_wins() {
        // "node" (backend) beats "ui" (frontend); "api" (backend) beats "cloud"
        assert_eq!(categorize_skill("node ui kit"), GapCategory::Backend);
        assert_eq!(categorize_skill("cloud api"), GapCategory::Backend);
        // "react" (frontend) beats "data"
        assert_eq!(categorize_skill("react data grid"), GapCategory::Frontend);
        // "data" beats "aws"
        assert_eq!(categorize_skill("aws data pipeline"), GapCategory::Data);
    }

    #[test]
    fn test_grouping_preserves_order_within_category() {
        let missing = vec!["flask", "sql", "node", "react", "aws", "pandas", "git"];
        let gaps = group_missing_skills(&missing);

        assert_eq!(gaps.get(GapCategory::Backend), Some(&["flask".to_string(), "node".to_string()][..]));
        assert_eq!(gaps.get(GapCategory::Frontend), Some(&["react".to_string()][..]));
        assert_eq!(gaps.get(GapCategory::Data), Some(&["pandas".to_string()][..]));
        assert_eq!(gaps.get(GapCategory::Cloud), Some(&["aws".to_string()][..]));
        assert_eq!(gaps.get(GapCategory::General), Some(&["sql".to_string(), "git".to_string()][..]));
        assert_eq!(gaps.skill_count(), missing.len());
    }

    #[test]
    fn test_iteration_follows_precedence() {
        let gaps = group_missing_skills(&["git", "docker", "html"]);
        assert_eq!(
            gaps.categories(),
            vec![GapCategory::Frontend, GapCategory::Cloud, GapCategory::General]
        );
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<String> = Vec::new();
        let gaps = group_missing_skills(&empty);
        assert!(gaps.is_empty());
        assert_eq!(gaps.get(GapCategory::General), None);
    }

    #[test]
    fn test_triggers_table() {
        assert!(GapCategory::Cloud.triggers().contains(&"docker"));
        assert!(GapCategory::General.triggers().is_empty());
        assert_eq!(GapCategory::ALL.len(), 5);
        assert_eq!(GapCategory::Data.to_string(), "data");
    }
}
