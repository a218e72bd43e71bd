//! Skill dictionaries and whole-word, phrase-aware skill matching

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::tokenizer::normalize_whitespace;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skill phrases found in a document, deduplicated and sorted ascending
pub type SkillMatch = BTreeSet<String>;

/// Curated skill phrases, partitioned into technical and soft skills.
///
/// Phrases are trimmed and lowercased on insertion; blank phrases are dropped
/// and the first occurrence of a duplicate wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDictionary {
    technical: Vec<String>,
    soft: Vec<String>,
}

impl SkillDictionary {
    pub fn new<T, S>(technical: T, soft: S) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            technical: normalize_phrases(technical),
            soft: normalize_phrases(soft),
        }
    }

    /// Built-in dictionary extended with caller supplied phrases
    pub fn with_extra_skills(extra_technical: &[String], extra_soft: &[String]) -> Self {
        let defaults = Self::default();
        Self::new(
            defaults.technical.iter().chain(extra_technical.iter()),
            defaults.soft.iter().chain(extra_soft.iter()),
        )
    }

    pub fn technical(&self) -> &[String] {
        &self.technical
    }

    pub fn soft(&self) -> &[String] {
        &self.soft
    }

    /// Technical followed by soft phrases, duplicates removed
    pub fn combined(&self) -> Vec<String> {
        normalize_phrases(self.technical.iter().chain(self.soft.iter()))
    }

    pub fn len(&self) -> usize {
        self.technical.len() + self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.soft.is_empty()
    }
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::new(default_technical_skills(), default_soft_skills())
    }
}

/// Case-insensitive matcher over a fixed list of skill phrases.
///
/// Phrases made only of word characters and spaces must sit on word
/// boundaries ("java" never matches inside "javascript"). Phrases carrying
/// symbols, like "c++" or "ci/cd", match as literal substrings.
pub struct SkillMatcher {
    automaton: Option<AhoCorasick>,
    phrases: Vec<String>,
    word_only: Vec<bool>,
}

impl SkillMatcher {
    pub fn new<I>(phrases: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let phrases = normalize_phrases(phrases);
        let word_only = phrases.iter().map(|p| is_word_only(p)).collect();

        let automaton = if phrases.is_empty() {
            None
        } else {
            // Standard match kind so overlapping matches ("java" / "javascript") are all reported
            let automaton = AhoCorasick::new(&phrases)
                .map_err(|e| {
                    ResumeAnalyzerError::Processing(format!("Failed to build skill matcher: {}", e))
                })?;
            Some(automaton)
        };

        Ok(Self {
            automaton,
            phrases,
            word_only,
        })
    }

    /// Find every dictionary phrase occurring at least once in `text`
    pub fn find(&self, text: &str) -> SkillMatch {
        let mut found = SkillMatch::new();
        let automaton = match &self.automaton {
            Some(automaton) => automaton,
            None => return found,
        };

        let haystack = normalize_whitespace(text).to_lowercase();

        for mat in automaton.find_overlapping_iter(&haystack) {
            let pattern_id = mat.pattern().as_usize();
            let phrase = &self.phrases[pattern_id];

            if found.contains(phrase) {
                continue;
            }

            if self.word_only[pattern_id]
                && !on_word_boundaries(&haystack, mat.start(), mat.end())
            {
                continue;
            }

            found.insert(phrase.clone());
        }

        found
    }

    pub fn skill_count(&self) -> usize {
        self.phrases.len()
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(SkillDictionary::default().combined())
            .expect("Failed to create default skill matcher")
    }
}

fn normalize_phrases<I>(phrases: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();

    for phrase in phrases {
        let normalized = normalize_whitespace(phrase.as_ref()).to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }

    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_only(phrase: &str) -> bool {
    phrase.chars().all(|c| is_word_char(c) || c == ' ')
}

fn on_word_boundaries(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();

    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

/// Default technical skills dictionary
pub fn default_technical_skills() -> Vec<&'static str> {
    vec![
        // Languages
        "python", "java", "c", "c++", "c#", "javascript", "typescript", "golang", "rust",
        "sql",

        // Web
        "react", "redux", "node", "express", "html", "css", "tailwind", "bootstrap",

        // Backend
        "django", "fastapi", "flask", "rest", "api", "graphql",

        // Databases
        "mongodb", "mysql", "postgresql", "redis",

        // Data and ML
        "pandas", "numpy", "tensorflow", "pytorch", "scikit-learn",
        "machine learning", "deep learning",

        // Cloud and tooling
        "git", "docker", "kubernetes", "aws", "azure", "gcp", "linux", "ci/cd",
    ]
}

/// Default soft skills dictionary
pub fn default_soft_skills() -> Vec<&'static str> {
    vec![
        "communication", "teamwork", "problem solving", "leadership", "time management",
        "management", "collaboration", "adaptability", "mentoring", "critical thinking",
    ]
}
