//! DOCX extractor using docx-lite.

use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{DoctopicError, Result};
use async_trait::async_trait;
use std::io::Cursor;

/// Extracts Word documents: paragraph text joined with newline separators.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn description(&self) -> &str {
        "Extracts paragraph text from Word documents"
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let cursor = Cursor::new(content);
        let doc = docx_lite::parse_document(cursor)
            .map_err(|e| DoctopicError::parsing(format!("DOCX parsing failed: {}", e)))?;

        let text = doc.extract_text();

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"]
    }
}
