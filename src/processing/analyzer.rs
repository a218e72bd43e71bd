//! Analysis engine: resume + job description in, `AnalysisResult` out

use crate::config::Config;
use crate::error::Result;
use crate::processing::gaps::{group_missing_skills, SkillGaps};
use crate::processing::scoring::{calculate_ats_score, ScoreInputs, ScoringMode};
use crate::processing::similarity::jaccard_similarity;
use crate::processing::skills::{SkillDictionary, SkillMatch, SkillMatcher};
use crate::processing::suggestions::{SuggestionContext, SuggestionSynthesizer};
use crate::processing::tokenizer::Tokenizer;
use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

static DEFAULT_ENGINE: Lazy<AnalysisEngine> = Lazy::new(AnalysisEngine::default);

/// Final output of one analysis.
///
/// `ats_score` is within 0..=100, `suggestions` holds at most eight distinct
/// entries, and `missing_skills_job` only lists job skills absent from both
/// found-skill lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u8,
    pub skills_found: Vec<String>,
    pub soft_skills_found: Vec<String>,
    pub missing_skills_job: Vec<String>,
    pub suggestions: Vec<String>,
    pub raw_text_preview: String,
}

/// An [`AnalysisResult`] plus the intermediate signals behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub result: AnalysisResult,
    pub similarity: f64,
    pub coverage: f64,
    pub scoring_mode: ScoringMode,
    pub job_skill_targets: Vec<String>,
    pub skill_gaps: SkillGaps,
}

/// Stateless scoring engine; every call recomputes from the inputs alone
pub struct AnalysisEngine {
    tokenizer: Tokenizer,
    technical_matcher: SkillMatcher,
    soft_matcher: SkillMatcher,
    target_matcher: SkillMatcher,
    synthesizer: SuggestionSynthesizer,
    preview_chars: usize,
}

impl AnalysisEngine {
    pub fn new(dictionary: &SkillDictionary, preview_chars: usize) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(),
            technical_matcher: SkillMatcher::new(dictionary.technical())?,
            soft_matcher: SkillMatcher::new(dictionary.soft())?,
            target_matcher: SkillMatcher::new(dictionary.combined())?,
            synthesizer: SuggestionSynthesizer::new(),
            preview_chars,
        })
    }

    /// Engine with the configured extra skills and preview length
    pub fn from_config(config: &Config) -> Result<Self> {
        let dictionary = SkillDictionary::with_extra_skills(
            &config.analysis.extra_technical_skills,
            &config.analysis.extra_soft_skills,
        );
        Self::new(&dictionary, config.analysis.preview_chars)
    }

    pub fn analyze(&self, resume_text: &str, job_description: &str) -> AnalysisResult {
        self.analyze_detailed(resume_text, job_description).result
    }

    pub fn analyze_detailed(&self, resume_text: &str, job_description: &str) -> DetailedAnalysis {
        let resume_tokens = self.tokenizer.tokenize(resume_text);
        let job_tokens = self.tokenizer.tokenize(job_description);
        let similarity = jaccard_similarity(&resume_tokens, &job_tokens);

        let technical_found = self.technical_matcher.find(resume_text);
        let soft_found = self.soft_matcher.find(resume_text);
        let job_targets = self.target_matcher.find(job_description);

        let all_found: SkillMatch = technical_found.union(&soft_found).cloned().collect();
        let missing: Vec<String> = job_targets.difference(&all_found).cloned().collect();

        let resume_length = resume_text.chars().count();
        let ats = calculate_ats_score(&ScoreInputs {
            similarity,
            target_count: job_targets.len(),
            missing_count: missing.len(),
            found_skill_count: all_found.len(),
            resume_length,
        });

        debug!(
            "Scored resume: mode={:?} similarity={:.3} targets={} missing={} found={} score={}",
            ats.mode,
            similarity,
            job_targets.len(),
            missing.len(),
            all_found.len(),
            ats.score
        );

        let suggestions = self.synthesizer.synthesize_or_fallback(&SuggestionContext {
            job_description,
            job_targets: &job_targets,
            missing_skills: &missing,
            technical_found: &technical_found,
            soft_found: &soft_found,
            resume_length,
            similarity,
        });

        let skill_gaps = group_missing_skills(&missing);

        DetailedAnalysis {
            result: AnalysisResult {
                ats_score: ats.score.min(100),
                skills_found: into_sorted_vec(technical_found),
                soft_skills_found: into_sorted_vec(soft_found),
                missing_skills_job: missing,
                suggestions,
                raw_text_preview: preview(resume_text, self.preview_chars),
            },
            similarity,
            coverage: ats.coverage,
            scoring_mode: ats.mode,
            job_skill_targets: into_sorted_vec(job_targets),
            skill_gaps,
        }
    }

    pub fn skill_count(&self) -> usize {
        self.target_matcher.skill_count()
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(&SkillDictionary::default(), DEFAULT_PREVIEW_CHARS)
            .expect("Failed to create default analysis engine")
    }
}

/// Analyze a resume against a job description with the built-in dictionaries.
///
/// Pure and infallible: empty inputs give a well-defined degenerate result.
pub fn analyze(resume_text: &str, job_description: &str) -> AnalysisResult {
    DEFAULT_ENGINE.analyze(resume_text, job_description)
}

fn into_sorted_vec(set: BTreeSet<String>) -> Vec<String> {
    set.into_iter().collect()
}

/// First `max_chars` characters of `text`
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
