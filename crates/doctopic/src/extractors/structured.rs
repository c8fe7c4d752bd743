//! JSON extractor.
//!
//! Not a semantic extraction: the document is parsed and re-serialized as an
//! indented, human-readable rendering for downstream text processing.

use crate::core::config::ExtractionConfig;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Pretty-prints JSON documents with 4-space indentation.
pub struct JsonExtractor;

impl JsonExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for JsonExtractor {
    fn name(&self) -> &str {
        "json-extractor"
    }

    fn description(&self) -> &str {
        "Re-serializes JSON documents as indented text"
    }
}

#[async_trait]
impl DocumentExtractor for JsonExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        _config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let value: serde_json::Value = serde_json::from_slice(content)
            .map_err(|e| crate::DoctopicError::parsing_with_source("JSON parsing failed", e))?;

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut ser)?;

        let text = String::from_utf8(out)
            .map_err(|e| crate::DoctopicError::parsing_with_source("JSON output is not UTF-8", e))?;

        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["application/json", "text/json"]
    }
}
