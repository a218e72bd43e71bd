//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source not found: {0}")]
    NotFound(String),

    #[error("Source unreadable: {0}")]
    Unreadable(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResumeAnalyzerError {
    /// True for the "source does not exist" condition of text extraction
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResumeAnalyzerError::NotFound(_))
    }

    /// True when a source exists but no text could be extracted from it
    pub fn is_unreadable(&self) -> bool {
        matches!(self, ResumeAnalyzerError::Unreadable(_))
    }
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;

/// Model2Vec reports load failures through anyhow
impl From<anyhow::Error> for ResumeAnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeAnalyzerError::Embedding(format!("Failed to load model: {:#}", err))
    }
}
