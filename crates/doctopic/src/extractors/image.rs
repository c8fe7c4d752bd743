//! Image OCR extractor and the display-only image mode.

use crate::core::config::ExtractionConfig;
use crate::ocr;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::types::ExtractionResult;
use crate::{DoctopicError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Placeholder returned by [`show_image`]. A fixed sentinel, not extracted
/// text; callers must not feed it into the topic pipeline.
pub const IMAGE_SHOWN_PLACEHOLDER: &str = "Image extracted and shown";

/// Runs OCR directly on an image file.
pub struct ImageExtractor;

impl ImageExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ImageExtractor {
    fn name(&self) -> &str {
        "image-ocr-extractor"
    }

    fn description(&self) -> &str {
        "Recognizes text in images via tesseract"
    }
}

#[async_trait]
impl DocumentExtractor for ImageExtractor {
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        // Tesseract operates on files; spill the bytes to scratch space.
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("image");
        tokio::fs::write(&path, content).await?;
        self.extract_path(&path, mime_type, config).await
    }

    async fn extract_path(
        &self,
        path: &Path,
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let text = ocr::recognize_image(path, &config.ocr).await?;
        if text.trim().is_empty() {
            return Err(DoctopicError::ocr("No text detected in image"));
        }
        Ok(ExtractionResult::new(text, mime_type))
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["image/png", "image/jpeg", "image/tiff", "image/bmp", "image/webp", "image/*"]
    }
}

/// Open an image in the system viewer and return a fixed placeholder.
///
/// This is an explicit non-extraction mode: no text is produced, and the
/// return value is [`IMAGE_SHOWN_PLACEHOLDER`] rather than document content.
/// It is deliberately not registered as an extraction routine.
pub async fn show_image(path: &Path) -> Result<String> {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";

    tokio::process::Command::new(opener)
        .arg(path)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DoctopicError::MissingDependency(format!("{} not found on PATH", opener))
            } else {
                DoctopicError::Io(e)
            }
        })?;

    Ok(IMAGE_SHOWN_PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_interface() {
        let extractor = ImageExtractor::new();
        assert_eq!(extractor.name(), "image-ocr-extractor");
        assert!(extractor.supported_mime_types().contains(&"image/*"));
    }

    #[test]
    fn test_placeholder_is_fixed() {
        assert_eq!(IMAGE_SHOWN_PLACEHOLDER, "Image extracted and shown");
    }
}
