//! CSV extractor.

use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;

/// Flattens CSV rows into readable text: fields joined with `", "`, one row
/// per line.
pub struct CsvExtractor;

impl CsvExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for CsvExtractor {
    fn name(&self) -> &str {
        "csv-extractor"
    }

    fn description(&self) -> &str {
        "Joins CSV fields and rows into plain text"
    }
}

#[async_trait]
impl DocumentExtractor for CsvExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let delimiter = if mime_type == "text/tab-separated-values" {
            b'\t'
        } else {
            b','
        };
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut text = String::new();
        for record in reader.records() {
            let record = record?;
            let fields: Vec<&str> = record.iter().collect();
            text.push_str(&fields.join(", "));
            text.push('\n');
        }

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["text/csv", "text/tab-separated-values"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rows_joined_with_comma_space() {
        let extractor = CsvExtractor::new();
        let config = ExtractionConfig::default();

        let result = extractor
            .extract_bytes(b"a,b\nc,d\n", "text/csv", &config)
            .await
            .unwrap();

        assert_eq!(result.content, "a, b\nc, d\n");
    }

    #[tokio::test]
    async fn test_quoted_fields() {
        let extractor = CsvExtractor::new();
        let config = ExtractionConfig::default();

        let result = extractor
            .extract_bytes(b"\"hello, there\",x\n", "text/csv", &config)
            .await
            .unwrap();

        assert_eq!(result.content, "hello, there, x\n");
    }

    #[tokio::test]
    async fn test_ragged_rows_allowed() {
        let extractor = CsvExtractor::new();
        let config = ExtractionConfig::default();

        let result = extractor
            .extract_bytes(b"a,b,c\nd\n", "text/csv", &config)
            .await
            .unwrap();

        assert_eq!(result.content, "a, b, c\nd\n");
    }

    #[tokio::test]
    async fn test_tsv_uses_tab_delimiter() {
        let extractor = CsvExtractor::new();
        let config = ExtractionConfig::default();

        let result = extractor
            .extract_bytes(b"a\tb\nc\td\n", "text/tab-separated-values", &config)
            .await
            .unwrap();

        assert_eq!(result.content, "a, b\nc, d\n");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let extractor = CsvExtractor::new();
        let config = ExtractionConfig::default();

        let result = extractor.extract_bytes(b"", "text/csv", &config).await.unwrap();
        assert_eq!(result.content, "");
    }
}
