//! Input manager for handling different file types

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a job description comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    File(PathBuf),
    Text(String),
    None,
}

impl JobSource {
    pub fn label(&self) -> String {
        match self {
            JobSource::File(path) => path.display().to_string(),
            JobSource::Text(_) => "inline text".to_string(),
            JobSource::None => "none".to_string(),
        }
    }
}

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract plain text from a resume or job-description file.
    ///
    /// A missing path is `NotFound`, an unrecognised extension is
    /// `UnsupportedFormat`, and a file whose content cannot be turned into
    /// text is `Unreadable`.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeAnalyzerError::NotFound(path.display().to_string()));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    /// Job description text; no source is an empty description
    pub async fn extract_job_description(&mut self, source: &JobSource) -> Result<String> {
        match source {
            JobSource::File(path) => self.extract_text(path).await,
            JobSource::Text(text) => Ok(text.clone()),
            JobSource::None => Ok(String::new()),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let mut manager = InputManager::new();
        let err = manager.extract_text(Path::new("/definitely/not/here.txt")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, "Python").unwrap();

        let err = InputManager::new().extract_text(&path).await.unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_cache_serves_repeat_reads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Rust developer").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust developer");

        std::fs::write(&path, "changed").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust developer");
        assert_eq!(manager.cache_size(), 1);

        manager.clear_cache();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "changed");
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Rust developer").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        manager.extract_text(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_job_sources() {
        let mut manager = InputManager::new();

        let inline = JobSource::Text("Python, AWS".to_string());
        assert_eq!(manager.extract_job_description(&inline).await.unwrap(), "Python, AWS");
        assert_eq!(manager.extract_job_description(&JobSource::None).await.unwrap(), "");
        assert_eq!(inline.label(), "inline text");
    }
}
