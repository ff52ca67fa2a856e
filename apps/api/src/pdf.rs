//! PDF text extraction.
//!
//! Wraps the `pdf-extract` crate. Parsing runs on the blocking pool and any
//! panic inside the parser is reported as a malformed document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read PDF: {0}")]
    Malformed(String),
}

/// Turns a stored resume file into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Default extractor backed by `pdf-extract`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_by_pages(&path))
            .await
            .map_err(|e| ExtractionError::Malformed(format!("PDF parser aborted: {e}")))?
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        Ok(join_pages(&pages))
    }
}

/// Concatenates page texts with a single space between pages.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_uses_single_space() {
        let pages = vec!["Experienced ML engineer", "Skills: PyTorch"];
        assert_eq!(join_pages(&pages), "Experienced ML engineer Skills: PyTorch");
    }

    #[test]
    fn test_join_pages_empty() {
        let pages: Vec<String> = vec![];
        assert_eq!(join_pages(&pages), "");
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_fail_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();

        let result = PdfTextExtractor.extract(&path).await;
        assert!(matches!(result, Err(ExtractionError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_missing_file_fails_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfTextExtractor.extract(&dir.path().join("gone.pdf")).await;
        assert!(result.is_err());
    }
}
