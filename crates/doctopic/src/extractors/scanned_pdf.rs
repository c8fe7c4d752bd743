//! OCR extractor for scanned PDFs without a text layer.

use crate::core::config::ExtractionConfig;
use crate::ocr;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Rasterizes each page and OCRs it, concatenating the results with page
/// delimiter markers.
pub struct ScannedPdfExtractor;

impl ScannedPdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Delimiter inserted before each page's text (1-based page numbers).
    pub fn page_delimiter(page: usize) -> String {
        format!("--- Page {} ---\n", page)
    }
}

impl Default for ScannedPdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ScannedPdfExtractor {
    fn name(&self) -> &str {
        "scanned-pdf-extractor"
    }

    fn description(&self) -> &str {
        "Rasterizes scanned PDFs and recognizes each page via OCR"
    }
}

#[async_trait]
impl DocumentExtractor for ScannedPdfExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("scan.pdf");
        tokio::fs::write(&path, content).await?;
        self.extract_path(&path, mime_type, config).await
    }

    async fn extract_path(
        &self,
        path: &Path,
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let scratch = tempfile::tempdir()?;
        let pages = ocr::rasterize_pdf(path, scratch.path(), &config.ocr).await?;

        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            let page_text = ocr::recognize_image(page, &config.ocr).await?;
            text.push_str(&Self::page_delimiter(index + 1));
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["application/pdf"]
    }

    /// Below the text-layer extractor: selected explicitly, never by default
    /// dispatch.
    fn priority(&self) -> i32 {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_delimiter_format() {
        assert_eq!(ScannedPdfExtractor::page_delimiter(1), "--- Page 1 ---\n");
        assert_eq!(ScannedPdfExtractor::page_delimiter(12), "--- Page 12 ---\n");
    }

    #[test]
    fn test_lower_priority_than_text_layer() {
        let scanned = ScannedPdfExtractor::new();
        assert!(scanned.priority() < 50);
    }
}
