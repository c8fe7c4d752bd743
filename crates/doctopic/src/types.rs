//! Shared result types.

use serde::{Deserialize, Serialize};

/// Plain-text extraction result.
///
/// Owned solely by the caller that requested it; nothing is cached or shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted text content.
    pub content: String,
    /// MIME type the content was extracted as.
    pub mime_type: String,
}

impl ExtractionResult {
    pub fn new(content: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mime_type: mime_type.into(),
        }
    }
}
