//! Integration tests for the resume analyzer

use resume_analyzer::input::manager::{InputManager, JobSource};
use resume_analyzer::output::formatter::ReportGenerator;
use resume_analyzer::output::report::{AnalysisReport, ReportMetadata};
use resume_analyzer::processing::ranker::SemanticRanker;
use resume_analyzer::processing::readability::TextStatistics;
use resume_analyzer::{AnalysisEngine, Config, ResumeAnalyzerError};
use resume_analyzer::config::OutputFormat;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let err = manager.extract_text(path).await.unwrap_err();
    assert!(matches!(err, ResumeAnalyzerError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let err = manager.extract_text(path).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_unreadable());
}

#[tokio::test]
async fn test_corrupt_pdf_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, b"plain bytes that are not a pdf document").unwrap();

    let err = InputManager::new().extract_text(&path).await.unwrap_err();
    assert!(err.is_unreadable());
}

#[tokio::test]
async fn test_fixture_analysis_end_to_end() {
    let mut manager = InputManager::new();
    let resume_text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job_source = JobSource::File(PathBuf::from("tests/fixtures/job_description.txt"));
    let job_text = manager.extract_job_description(&job_source).await.unwrap();

    let engine = AnalysisEngine::from_config(&Config::default()).unwrap();
    let detailed = engine.analyze_detailed(&resume_text, &job_text);
    let result = &detailed.result;

    assert!(result.skills_found.contains(&"python".to_string()));
    assert!(result.skills_found.contains(&"docker".to_string()));
    assert!(result.soft_skills_found.contains(&"communication".to_string()));
    assert!(result.missing_skills_job.contains(&"kubernetes".to_string()));
    assert!(!result.missing_skills_job.contains(&"python".to_string()));
    assert!((10..=99).contains(&result.ats_score));

    let ranker = SemanticRanker::lexical(5);
    let matches = ranker.rank(&resume_text, &detailed.job_skill_targets);
    assert!(matches.len() <= 5);

    let report = AnalysisReport::new(
        ReportMetadata::new("sample_resume.txt", job_source.label(), ranker.strategy_name()),
        detailed,
        matches,
        TextStatistics::from_text(&resume_text),
    );

    let json = ReportGenerator::with_options(false, true, true, true)
        .generate_report(&report, OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["analysis"]["ats_score"], report.analysis.ats_score);
    assert_eq!(value["metadata"]["job_source"], "tests/fixtures/job_description.txt");
}
