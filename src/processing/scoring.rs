//! ATS score calculation
//!
//! Two mutually exclusive formulas. When the job description yields skill
//! targets the score blends lexical similarity with skill coverage; without
//! targets it falls back to resume length and skill density.

use serde::{Deserialize, Serialize};

const SIMILARITY_WEIGHT: f64 = 0.6;
const COVERAGE_WEIGHT: f64 = 0.4;

const JOB_SCORE_FLOOR: i64 = 10;
const JOB_SCORE_CEILING: i64 = 99;
const RESUME_ONLY_FLOOR: i64 = 40;
const RESUME_ONLY_CEILING: i64 = 95;

/// (minimum distinct skill count, exclusive) -> bonus; highest threshold first
const JOB_SKILL_BONUSES: &[(usize, i64)] = &[(10, 5), (5, 2)];
const RESUME_ONLY_SKILL_BONUSES: &[(usize, i64)] = &[(12, 10), (7, 5)];

/// (maximum resume length, exclusive) -> base score
const LENGTH_BASE_SCORES: &[(usize, i64)] = &[(800, 55), (1500, 65)];
const LONG_RESUME_BASE_SCORE: i64 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Job description supplied and at least one skill target detected in it
    JobDescription,
    /// No usable job description; score from the resume alone
    ResumeOnly,
}

/// Signals the calculator consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub similarity: f64,
    pub target_count: usize,
    pub missing_count: usize,
    /// Distinct technical and soft skills found in the resume
    pub found_skill_count: usize,
    /// Resume length in characters
    pub resume_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtsScore {
    pub score: u8,
    pub mode: ScoringMode,
    /// Only meaningful in [`ScoringMode::JobDescription`]
    pub coverage: f64,
}

impl ScoreInputs {
    pub fn mode(&self) -> ScoringMode {
        if self.target_count > 0 {
            ScoringMode::JobDescription
        } else {
            ScoringMode::ResumeOnly
        }
    }

    /// Fraction of job skill targets present in the resume
    pub fn coverage(&self) -> f64 {
        let matched = self.target_count.saturating_sub(self.missing_count);
        matched as f64 / self.target_count.max(1) as f64
    }
}

pub fn calculate_ats_score(inputs: &ScoreInputs) -> AtsScore {
    match inputs.mode() {
        ScoringMode::JobDescription => {
            let coverage = inputs.coverage();
            // NaN never reaches here from the engine; treat it as no overlap regardless
            let similarity = if inputs.similarity.is_finite() {
                inputs.similarity.clamp(0.0, 1.0)
            } else {
                0.0
            };

            let raw =
                SIMILARITY_WEIGHT * (similarity * 100.0) + COVERAGE_WEIGHT * (coverage * 100.0);
            let bonus = skill_bonus(inputs.found_skill_count, JOB_SKILL_BONUSES);
            let score = (raw.trunc() as i64 + bonus).clamp(JOB_SCORE_FLOOR, JOB_SCORE_CEILING);

            AtsScore {
                score: score as u8,
                mode: ScoringMode::JobDescription,
                coverage,
            }
        }
        ScoringMode::ResumeOnly => {
            let base = LENGTH_BASE_SCORES
                .iter()
                .find(|(max_len, _)| inputs.resume_length < *max_len)
                .map(|(_, base)| *base)
                .unwrap_or(LONG_RESUME_BASE_SCORE);
            let bonus = skill_bonus(inputs.found_skill_count, RESUME_ONLY_SKILL_BONUSES);
            let score = (base + bonus).clamp(RESUME_ONLY_FLOOR, RESUME_ONLY_CEILING);

            AtsScore {
                score: score as u8,
                mode: ScoringMode::ResumeOnly,
                coverage: 0.0,
            }
        }
    }
}

fn skill_bonus(found: usize, table: &[(usize, i64)]) -> i64 {
    table
        .iter()
        .find(|(threshold, _)| found > *threshold)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}
