//! Report record handed to the output formatters

use crate::processing::analyzer::{AnalysisResult, DetailedAnalysis};
use crate::processing::gaps::SkillGaps;
use crate::processing::ranker::RankedPhrase;
use crate::processing::readability::TextStatistics;
use crate::processing::scoring::ScoringMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one `analyze` run produced, plus where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    /// The core analysis record
    pub analysis: AnalysisResult,

    /// Jaccard similarity of the resume and job token sets
    pub similarity: f64,

    /// Fraction of job skill targets present in the resume
    pub coverage: f64,

    pub scoring_mode: ScoringMode,

    /// Every dictionary skill detected in the job description
    pub job_skill_targets: Vec<String>,

    pub skill_gaps: SkillGaps,

    /// Job skill targets ranked by closeness to the resume
    pub semantic_matches: Vec<RankedPhrase>,

    pub readability: TextStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    /// Strategy that produced `semantic_matches`
    pub ranker: String,
    pub analyzer_version: String,
}

impl ReportMetadata {
    pub fn new(
        resume_source: impl Into<String>,
        job_source: impl Into<String>,
        ranker: impl Into<String>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            resume_source: resume_source.into(),
            job_source: job_source.into(),
            ranker: ranker.into(),
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Qualitative band for an ATS score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            65..=79 => ScoreBand::Good,
            50..=64 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }
}

impl AnalysisReport {
    pub fn new(
        metadata: ReportMetadata,
        detailed: DetailedAnalysis,
        semantic_matches: Vec<RankedPhrase>,
        readability: TextStatistics,
    ) -> Self {
        Self {
            metadata,
            analysis: detailed.result,
            similarity: detailed.similarity,
            coverage: detailed.coverage,
            scoring_mode: detailed.scoring_mode,
            job_skill_targets: detailed.job_skill_targets,
            skill_gaps: detailed.skill_gaps,
            semantic_matches,
            readability,
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.analysis.ats_score)
    }

    pub fn has_job_description(&self) -> bool {
        self.scoring_mode == ScoringMode::JobDescription
    }

    /// Job skill targets the resume already covers
    pub fn matched_targets(&self) -> Vec<&str> {
        self.job_skill_targets
            .iter()
            .filter(|skill| !self.analysis.missing_skills_job.contains(skill))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;

    #[test]
    fn test_report_from_detailed_analysis() {
        let resume = "Experienced Python and React developer with Docker skills";
        let detailed = AnalysisEngine::default().analyze_detailed(resume, "Looking for Python, React, AWS");
        let report = AnalysisReport::new(
            ReportMetadata::new("resume.txt", "job.txt", "lexical-overlap"),
            detailed,
            Vec::new(),
            TextStatistics::from_text(resume),
        );

        assert_eq!(report.analysis.ats_score, 41);
        assert_eq!(report.score_band(), ScoreBand::Poor);
        assert!(report.has_job_description());
        assert_eq!(report.matched_targets(), vec!["python", "react"]);
        assert_eq!(report.metadata.analyzer_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(99), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(65), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(55), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(10), ScoreBand::Poor);
    }
}
