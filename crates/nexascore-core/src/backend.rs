use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for source-document text extraction backends.
///
/// Implementors turn a document on disk into plain text. Pages are joined
/// with a single space. A document with no extractable text (e.g. an
/// image-only scan) returns `Ok` with an empty or blank string; the scoring
/// pipeline treats that and any `Err` identically.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text content of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
