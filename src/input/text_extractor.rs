//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Read a file as UTF-8; invalid bytes make the source unreadable
async fn read_utf8(path: &Path) -> Result<String> {
    let bytes = fs::read(path).await?;
    String::from_utf8(bytes).map_err(|e| {
        ResumeAnalyzerError::Unreadable(format!(
            "'{}' is not valid UTF-8 text: {}",
            path.display(),
            e
        ))
    })
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeAnalyzerError::Unreadable(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        read_utf8(path).await
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = read_utf8(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render Markdown to HTML, then strip it down to non-empty text lines
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n");
    let stripped = HTML_TAG_REGEX.replace_all(&text, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_to_text() {
        let text = markdown_to_text("# Jane Doe\n\n- **Rust** & Go\n- C++ <3\n\nBuilt `tokio` services.");
        assert_eq!(text, "Jane Doe\nRust & Go\nC++ <3\nBuilt tokio services.");
    }

    #[tokio::test]
    async fn test_non_utf8_text_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = PlainTextExtractor.extract(&path).await.unwrap_err();
        assert!(err.is_unreadable());
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfExtractor.extract(&path).await.unwrap_err();
        assert!(err.is_unreadable());
    }
}
