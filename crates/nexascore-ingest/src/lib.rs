use std::path::Path;

use thiserror::Error;
use tracing::debug;

use nexascore_core::{BackendError, TextExtractor};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("text extraction error: {0}")]
    Backend(#[from] BackendError),
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of nexascore-ingest)")]
    NoPdfSupport,
}

/// Extensions read directly as UTF-8 text instead of going through the PDF backend.
const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Whether `path` names a plain-text source, by extension (case-insensitive).
pub fn is_plain_text_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            PLAIN_TEXT_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Extract text from a PDF or plain-text source document.
///
/// Dispatches on file extension:
/// - `.txt`, `.text`, `.md` → read as UTF-8 (invalid sequences replaced)
/// - anything else → PDF backend (requires the `pdf` feature / mupdf)
pub fn extract_text(path: &Path) -> Result<String, IngestError> {
    if is_plain_text_path(path) {
        return Ok(PlainTextBackend.extract_text(path)?);
    }
    extract_pdf(path)
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<String, IngestError> {
    let backend = nexascore_pdf_mupdf::MupdfBackend::default();
    Ok(backend.extract_text(path)?)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_path: &Path) -> Result<String, IngestError> {
    Err(IngestError::NoPdfSupport)
}

/// Reads a UTF-8 text file as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextBackend;

impl TextExtractor for PlainTextBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "read plain-text source");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// [`TextExtractor`] choosing the backend per document; see [`extract_text`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceExtractor;

impl TextExtractor for SourceExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        match extract_text(path) {
            Ok(text) => Ok(text),
            Err(IngestError::Backend(e)) => Err(e),
            #[cfg(not(feature = "pdf"))]
            Err(e @ IngestError::NoPdfSupport) => Err(BackendError::OpenError(e.to_string())),
        }
    }
}
