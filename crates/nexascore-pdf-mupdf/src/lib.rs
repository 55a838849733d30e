use std::path::Path;

use mupdf::{Document, TextPageFlags};
use tracing::debug;

use nexascore_core::{BackendError, TextExtractor};

/// MuPDF-based implementation of [`TextExtractor`].
///
/// This crate is the sole AGPL island. It isolates the mupdf dependency
/// (which is AGPL-3.0) so that the scoring core does not transitively
/// depend on it.
///
/// Each page is read block by block and line by line; pages are joined with
/// a single space. The document handle lives only for the duration of
/// [`extract_text`](TextExtractor::extract_text) and is released on every
/// return path.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }

            // Image-only pages yield nothing; skip them rather than adding separators.
            if !page_text.trim().is_empty() {
                pages_text.push(page_text);
            }
        }

        debug!(path = %path.display(), pages = pages_text.len(), "extracted pdf text");
        Ok(pages_text.join(" "))
    }
}
