//! PDF text-layer extractor using lopdf.

use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{DoctopicError, Result};
use async_trait::async_trait;

/// Extracts the text layer of a PDF page by page.
///
/// A page without an extractable text layer contributes an empty string, not
/// a failure; only an unparseable document is an error. Scanned documents
/// come back empty here - use
/// [`ScannedPdfExtractor`](crate::extractors::ScannedPdfExtractor) for those.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn description(&self) -> &str {
        "Extracts the text layer of PDF documents"
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let doc = lopdf::Document::load_mem(content)
            .map_err(|e| DoctopicError::parsing_with_source("PDF parsing failed", e))?;

        let mut text = String::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                // No text layer on this page; contributes nothing.
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "page has no extractable text");
                }
            }
        }

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["application/pdf"]
    }
}
