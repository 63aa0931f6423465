//! Crate-wide error type and the source-document wrapper.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

/// Errors surfaced by the segmentation and verification pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid configuration, detected before any external call is made.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure while reading sources or persisting artifacts.
    #[error("i/o failure: {0}")]
    Io(String),

    /// Transport or protocol failure while talking to a chat endpoint.
    #[error("service failure: {0}")]
    Service(String),

    /// A persisted corpus file did not match the expected layout.
    #[error("corpus format error: {0}")]
    Corpus(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Service(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Corpus(err.to_string())
    }
}

/// Extracted text of one source document plus where it came from.
///
/// Extraction itself (PDF parsing, OCR) happens upstream; this type only
/// carries its result into the pipeline and is immutable from then on.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub source: PathBuf,
    pub text: String,
}

impl RawDocument {
    pub fn new(source: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Loads an already-extracted text file from disk.
    pub async fn from_text_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).await?;
        Ok(Self {
            source: path.to_path_buf(),
            text,
        })
    }

    /// `true` when extraction produced no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn loads_extracted_text_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extracted.txt");
        tokio::fs::write(&path, "story text").await.unwrap();

        let document = RawDocument::from_text_file(&path).await.unwrap();
        assert_eq!(document.text, "story text");
        assert_eq!(document.source, path);
        assert!(!document.is_empty());
    }

    #[tokio::test]
    async fn missing_source_is_an_io_error() {
        let err = RawDocument::from_text_file("/no/such/file.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        assert!(RawDocument::new("doc.txt", "  \n\t ").is_empty());
    }
}
