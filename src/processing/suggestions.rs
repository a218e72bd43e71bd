//! Rule-based improvement suggestions

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::gaps::group_missing_skills;
use log::warn;
use std::collections::{BTreeSet, HashSet};

pub const MAX_SUGGESTIONS: usize = 8;

const LOW_SIMILARITY: f64 = 0.2;
const PARTIAL_SIMILARITY: f64 = 0.4;
const MIN_TECHNICAL_SKILLS: usize = 4;
const FEW_SOFT_SKILLS: usize = 3;
const SHORT_RESUME_CHARS: usize = 600;
const LONG_RESUME_CHARS: usize = 2600;

pub const NO_JOB_DESCRIPTION: &str =
    "Paste the target job description to get a job-specific match score and a list of the skills you are missing.";
pub const COVERS_ALMOST_ALL_SKILLS: &str =
    "Your resume covers almost all skills named in the job description. Back each one with a concrete project or result.";
pub const NO_JOB_SKILLS_DETECTED: &str =
    "No specific skills were detected in the job description. Compare its responsibilities with your experience bullets by hand.";
pub const MIRROR_JOB_WORDING: &str =
    "Your wording has little overlap with the job description. Mirror its key phrases and responsibilities in your summary and experience bullets.";
pub const PARTIAL_OVERLAP: &str =
    "Your resume partially overlaps with the job description. Rephrase a few bullets using the same terms the posting uses.";
pub const MATCHES_WELL: &str =
    "Your resume matches the job description wording well. Tighten bullets for impact with outcomes and metrics.";
pub const ADD_TECHNICAL_SECTION: &str =
    "Add a dedicated Technical Skills section listing the languages, frameworks and tools you actually use.";
pub const GROUP_TECHNICAL_SKILLS: &str =
    "Group your technical skills by category (languages, frameworks, databases, cloud) so they can be scanned at a glance.";
pub const ADD_SOFT_SKILLS: &str =
    "Add 2-3 soft skills such as communication, teamwork or problem solving, each backed by a short example.";
pub const EXPAND_SHORT_RESUME: &str =
    "Your resume is short. Expand project and experience bullets with the tools used, your scope and measurable results.";
pub const TRIM_LONG_RESUME: &str =
    "Your resume is long. Trim older or less relevant items to keep it focused on the target role.";
pub const FALLBACK_SUGGESTION: &str =
    "Could not generate tailored suggestions. Make sure your resume lists your skills, projects and measurable results.";

/// Everything the rules look at, borrowed from the analysis in progress
#[derive(Debug, Clone)]
pub struct SuggestionContext<'a> {
    pub job_description: &'a str,
    pub job_targets: &'a BTreeSet<String>,
    pub missing_skills: &'a [String],
    pub technical_found: &'a BTreeSet<String>,
    pub soft_found: &'a BTreeSet<String>,
    /// Resume length in characters
    pub resume_length: usize,
    pub similarity: f64,
}

impl SuggestionContext<'_> {
    fn has_job_description(&self) -> bool {
        !self.job_description.trim().is_empty()
    }

    /// Reject upstream data the rules cannot make sense of
    fn validate(&self) -> Result<()> {
        if !self.similarity.is_finite() || !(0.0..=1.0).contains(&self.similarity) {
            return Err(ResumeAnalyzerError::Processing(
                format!("similarity out of range: {}", self.similarity)
            ));
        }

        if let Some(stray) = self.missing_skills.iter().find(|s| !self.job_targets.contains(*s)) {
            return Err(ResumeAnalyzerError::Processing(
                format!("missing skill '{}' is not a job target", stray)
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionSynthesizer {
    max_suggestions: usize,
}

impl Default for SuggestionSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionSynthesizer {
    pub fn new() -> Self {
        Self {
            max_suggestions: MAX_SUGGESTIONS,
        }
    }

    /// Apply the rules in order, then dedupe and cap the list
    pub fn synthesize(&self, ctx: &SuggestionContext<'_>) -> Result<Vec<String>> {
        ctx.validate()?;

        let mut suggestions = Vec::new();

        if !ctx.has_job_description() {
            suggestions.push(NO_JOB_DESCRIPTION.to_string());
        } else {
            suggestions.extend(self.skill_gap_suggestions(ctx));
            suggestions.push(self.wording_suggestion(ctx.similarity).to_string());
        }

        suggestions.push(self.technical_density_suggestion(ctx.technical_found.len()).to_string());

        if let Some(soft) = self.soft_skill_suggestion(ctx.soft_found) {
            suggestions.push(soft);
        }

        if let Some(length) = self.length_suggestion(ctx.resume_length) {
            suggestions.push(length.to_string());
        }

        Ok(self.finalize(suggestions))
    }

    /// Like [`synthesize`](Self::synthesize) but never fails: a rule error
    /// yields a single generic suggestion instead
    pub fn synthesize_or_fallback(&self, ctx: &SuggestionContext<'_>) -> Vec<String> {
        match self.synthesize(ctx) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("Suggestion synthesis failed, using fallback: {}", e);
                vec![FALLBACK_SUGGESTION.to_string()]
            }
        }
    }

    fn skill_gap_suggestions(&self, ctx: &SuggestionContext<'_>) -> Vec<String> {
        if ctx.job_targets.is_empty() {
            return vec![NO_JOB_SKILLS_DETECTED.to_string()];
        }
        if ctx.missing_skills.is_empty() {
            return vec![COVERS_ALMOST_ALL_SKILLS.to_string()];
        }

        group_missing_skills(ctx.missing_skills)
            .iter()
            .map(|(category, skills)| {
                format!(
                    "{} skills from the job description are missing: {}. Add the ones you have used \
                     to your Skills, Projects or Experience sections with a short example each.",
                    category.label(),
                    skills.join(", ")
                )
            })
            .collect()
    }

    fn wording_suggestion(&self, similarity: f64) -> &'static str {
        if similarity < LOW_SIMILARITY {
            MIRROR_JOB_WORDING
        } else if similarity < PARTIAL_SIMILARITY {
            PARTIAL_OVERLAP
        } else {
            MATCHES_WELL
        }
    }

    fn technical_density_suggestion(&self, technical_count: usize) -> &'static str {
        if technical_count < MIN_TECHNICAL_SKILLS {
            ADD_TECHNICAL_SECTION
        } else {
            GROUP_TECHNICAL_SKILLS
        }
    }

    fn soft_skill_suggestion(&self, soft_found: &BTreeSet<String>) -> Option<String> {
        if soft_found.is_empty() {
            Some(ADD_SOFT_SKILLS.to_string())
        } else if soft_found.len() < FEW_SOFT_SKILLS {
            let listed: Vec<&str> = soft_found.iter().map(String::as_str).collect();
            Some(format!(
                "Make your soft skills ({}) more explicit with a one-line example each in Experience or Projects.",
                listed.join(", ")
            ))
        } else {
            None
        }
    }

    fn length_suggestion(&self, resume_length: usize) -> Option<&'static str> {
        if resume_length < SHORT_RESUME_CHARS {
            Some(EXPAND_SHORT_RESUME)
        } else if resume_length > LONG_RESUME_CHARS {
            Some(TRIM_LONG_RESUME)
        } else {
            None
        }
    }

    /// Drop exact duplicates keeping first occurrence, then cap the length
    fn finalize(&self, suggestions: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        suggestions
            .into_iter()
            .filter(|s| seen.insert(s.clone()))
            .take(self.max_suggestions)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    struct Fixture {
        job_description: String,
        targets: BTreeSet<String>,
        missing: Vec<String>,
        technical: BTreeSet<String>,
        soft: BTreeSet<String>,
        resume_length: usize,
        similarity: f64,
    }

    impl Fixture {
        fn ctx(&self) -> SuggestionContext<'_> {
            SuggestionContext {
                job_description: &self.job_description,
                job_targets: &self.targets,
                missing_skills: &self.missing,
                technical_found: &self.technical,
                soft_found: &self.soft,
                resume_length: self.resume_length,
                similarity: self.similarity,
            }
        }
    }

    fn no_job_fixture() -> Fixture {
        Fixture {
            job_description: String::new(),
            targets: BTreeSet::new(),
            missing: Vec::new(),
            technical: BTreeSet::new(),
            soft: BTreeSet::new(),
            resume_length: 0,
            similarity: 0.0,
        }
    }

    #[test]
    fn test_no_job_description() {
        let suggestions = SuggestionSynthesizer::new().synthesize(&no_job_fixture().ctx()).unwrap();

        assert_eq!(
            suggestions,
            vec![
                NO_JOB_DESCRIPTION.to_string(),
                ADD_TECHNICAL_SECTION.to_string(),
                ADD_SOFT_SKILLS.to_string(),
                EXPAND_SHORT_RESUME.to_string(),
            ]
        );
    }

    #[test]
    fn test_whitespace_job_description_counts_as_absent() {
        let mut fixture = no_job_fixture();
        fixture.job_description = "  \n ".to_string();
        let suggestions = SuggestionSynthesizer::new().synthesize(&fixture.ctx()).unwrap();
        assert_eq!(suggestions[0], NO_JOB_DESCRIPTION);
    }

    #[test]
    fn test_grouped_missing_skills() {
        let fixture = Fixture {
            job_description: "Python, Flask, AWS, React".to_string(),
            targets: set(&["aws", "flask", "python", "react"]),
            missing: vec!["aws".to_string(), "flask".to_string()],
            technical: set(&["python", "react", "git", "sql"]),
            soft: set(&["teamwork", "leadership", "communication"]),
            resume_length: 1200,
            similarity: 0.3,
        };
        let suggestions = SuggestionSynthesizer::new().synthesize(&fixture.ctx()).unwrap();

        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].starts_with("Backend skills"));
        assert!(suggestions[0].contains("flask"));
        assert!(suggestions[0].contains("you have used to your Skills, Projects or Experience"));
        assert!(suggestions[1].starts_with("Cloud / DevOps skills"));
        assert!(suggestions[1].contains("aws"));
        assert_eq!(suggestions[2], PARTIAL_OVERLAP);
        assert_eq!(suggestions[3], GROUP_TECHNICAL_SKILLS);
    }

    #[test]
    fn test_all_skills_covered_and_wording_tiers() {
        let mut fixture = Fixture {
            job_description: "Python".to_string(),
            targets: set(&["python"]),
            missing: Vec::new(),
            technical: set(&["python"]),
            soft: set(&["teamwork"]),
            resume_length: 3000,
            similarity: 0.1,
        };
        let synthesizer = SuggestionSynthesizer::new();

        let suggestions = synthesizer.synthesize(&fixture.ctx()).unwrap();
        assert_eq!(suggestions[0], COVERS_ALMOST_ALL_SKILLS);
        assert_eq!(suggestions[1], MIRROR_JOB_WORDING);
        assert_eq!(suggestions[2], ADD_TECHNICAL_SECTION);
        assert!(suggestions[3].contains("(teamwork)"));
        assert_eq!(suggestions[4], TRIM_LONG_RESUME);

        fixture.similarity = 0.4;
        let suggestions = synthesizer.synthesize(&fixture.ctx()).unwrap();
        assert_eq!(suggestions[1], MATCHES_WELL);
    }

    #[test]
    fn test_job_description_without_known_skills() {
        let fixture = Fixture {
            job_description: "Seeking a communicator with excellent writing".to_string(),
            soft: set(&["teamwork"]),
            resume_length: 900,
            similarity: 0.1,
            ..no_job_fixture()
        };
        let suggestions = SuggestionSynthesizer::new().synthesize(&fixture.ctx()).unwrap();

        assert_eq!(suggestions[0], NO_JOB_SKILLS_DETECTED);
        assert_eq!(suggestions[1], MIRROR_JOB_WORDING);
        assert!(!suggestions.contains(&COVERS_ALMOST_ALL_SKILLS.to_string()));
    }

    #[test]
    fn test_capped_at_eight() {
        let fixture = Fixture {
            job_description: "a long job description".to_string(),
            targets: set(&["api", "react", "pandas", "docker", "sql"]),
            missing: vec![
                "api".to_string(),
                "react".to_string(),
                "pandas".to_string(),
                "docker".to_string(),
                "sql".to_string(),
            ],
            technical: BTreeSet::new(),
            soft: BTreeSet::new(),
            resume_length: 10,
            similarity: 0.0,
        };
        let suggestions = SuggestionSynthesizer::new().synthesize(&fixture.ctx()).unwrap();

        // 5 gap groups + wording + technical + soft + length = 9, capped to 8
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert!(!suggestions.contains(&EXPAND_SHORT_RESUME.to_string()));
        let unique: HashSet<_> = suggestions.iter().collect();
        assert_eq!(unique.len(), suggestions.len());
    }

    #[test]
    fn test_malformed_input_falls_back() {
        let mut fixture = no_job_fixture();
        fixture.missing = vec!["kubernetes".to_string()];

        let synthesizer = SuggestionSynthesizer::new();
        assert!(synthesizer.synthesize(&fixture.ctx()).is_err());
        assert_eq!(synthesizer.synthesize_or_fallback(&fixture.ctx()), vec![FALLBACK_SUGGESTION.to_string()]);

        let mut fixture = no_job_fixture();
        fixture.similarity = f64::NAN;
        assert_eq!(synthesizer.synthesize_or_fallback(&fixture.ctx()), vec![FALLBACK_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_finalize_dedupes_in_order() {
        let synthesizer = SuggestionSynthesizer::new();
        let out = synthesizer.finalize(vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()]);
        assert_eq!(out, vec!["b", "a", "c"]);
    }
}
