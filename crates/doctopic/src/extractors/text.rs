//! Plain text extractor.

use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{DoctopicError, Result};
use async_trait::async_trait;

/// Extracts plain text and Markdown files verbatim.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn description(&self) -> &str {
        "Reads UTF-8 text files verbatim"
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let text = String::from_utf8(content.to_vec())
            .map_err(|e| DoctopicError::parsing_with_source("File is not valid UTF-8", e))?;

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["text/plain", "text/markdown", "text/x-markdown"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_verbatim() {
        let extractor = PlainTextExtractor::new();
        let config = ExtractionConfig::default();

        let result = extractor
            .extract_bytes(b"Hello, World!\nsecond line\n", "text/plain", &config)
            .await
            .unwrap();

        assert_eq!(result.content, "Hello, World!\nsecond line\n");
        assert_eq!(result.mime_type, "text/plain");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_parsing_error() {
        let extractor = PlainTextExtractor::new();
        let config = ExtractionConfig::default();

        let err = extractor
            .extract_bytes(&[0xFF, 0xFE, 0x00], "text/plain", &config)
            .await
            .unwrap_err();

        assert!(matches!(err, DoctopicError::Parsing { .. }));
    }

    #[test]
    fn test_plugin_interface() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.name(), "plain-text-extractor");
        assert!(extractor.supported_mime_types().contains(&"text/plain"));
    }
}
