//! Extraction pipeline: resolve, extract, clean, truncate.

use crate::core::config::ExtractionConfig;
use crate::core::dispatcher::resolve;
use crate::text::{clean_text, truncate_text};
use crate::{DoctopicError, Result};
use std::path::Path;

/// Output of [`process_file`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub mime_type: String,
    /// Name of the routine that produced the text.
    pub extractor: String,
    /// Post-processed text (cleaned when configured, always truncated).
    pub content: String,
    /// Character count of the raw extraction, before post-processing.
    pub raw_chars: usize,
    /// Whether truncation shortened the text.
    pub truncated: bool,
}

/// Run the full pipeline on one file.
///
/// # Errors
///
/// `Validation` when the path does not exist, `UnsupportedFormat` when no
/// routine is registered for the detected content type, or the extraction
/// routine's own error.
pub async fn process_file(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<PipelineOutput> {
    let path = path.as_ref();
    let dispatch = resolve(path)?;

    let extractor = dispatch
        .extractor
        .ok_or_else(|| DoctopicError::UnsupportedFormat(dispatch.mime_type.clone()))?;

    tracing::info!(
        path = %path.display(),
        mime_type = %dispatch.mime_type,
        extractor = extractor.name(),
        "extracting"
    );

    let result = extractor.extract_path(path, &dispatch.mime_type, config).await?;
    let raw_chars = result.content.chars().count();

    let processed = if config.clean {
        clean_text(&result.content)
    } else {
        result.content
    };

    // Decided from the pre-truncation length; the marker can make the
    // shortened text the same byte length as the original.
    let truncated = processed.chars().count() > config.max_chars;
    let content = truncate_text(&processed, config.max_chars);

    tracing::debug!(raw_chars, final_chars = content.chars().count(), truncated, "extraction finished");

    Ok(PipelineOutput {
        mime_type: dispatch.mime_type,
        extractor: extractor.name().to_string(),
        content,
        raw_chars,
        truncated,
    })
}
