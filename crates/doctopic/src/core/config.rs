//! Extraction configuration.
//!
//! All knobs that the extraction pipeline and its subprocess delegates need,
//! with serde defaults so a `doctopic.toml` only has to name what it changes.

use crate::{DoctopicError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for extraction and post-processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run stopword cleanup on extracted text.
    pub clean: bool,
    /// Truncate extracted text to this many characters before reporting.
    pub max_chars: usize,
    /// OCR backend settings.
    pub ocr: OcrConfig,
    /// External summarizer command for generative topic naming, e.g.
    /// `["t5-summarize", "--max-words", "6"]`. Keywords are supplied on stdin.
    pub namer_command: Option<Vec<String>>,
    /// Timeout for the external summarizer, in seconds.
    pub namer_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            clean: false,
            max_chars: 10_000,
            ocr: OcrConfig::default(),
            namer_command: None,
            namer_timeout_secs: 60,
        }
    }
}

/// Settings for the tesseract/pdftoppm subprocess backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language pack(s), e.g. `"eng"` or `"eng+vie"`.
    pub language: String,
    /// Per-invocation timeout, in seconds.
    pub timeout_secs: u64,
    /// Rasterization DPI for scanned-PDF pages.
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            timeout_secs: 120,
            dpi: 300,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the file does not exist or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DoctopicError::validation(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        let config: ExtractionConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Load `doctopic.toml` from the working directory if present, otherwise
    /// fall back to defaults.
    pub fn discover() -> Self {
        match Self::from_file("doctopic.toml") {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert!(!config.clean);
        assert_eq!(config.max_chars, 10_000);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.timeout_secs, 120);
        assert!(config.namer_command.is_none());
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doctopic.toml");
        fs::write(
            &path,
            r#"
clean = true
max_chars = 500

[ocr]
language = "eng+vie"
"#,
        )
        .unwrap();

        let config = ExtractionConfig::from_file(&path).unwrap();
        assert!(config.clean);
        assert_eq!(config.max_chars, 500);
        assert_eq!(config.ocr.language, "eng+vie");
        // Unnamed fields keep their defaults.
        assert_eq!(config.ocr.dpi, 300);
    }

    #[test]
    fn test_from_file_missing() {
        let err = ExtractionConfig::from_file("/nonexistent/doctopic.toml").unwrap_err();
        assert!(matches!(err, DoctopicError::Validation { .. }));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "clean = [not toml").unwrap();

        let err = ExtractionConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, DoctopicError::Validation { .. }));
    }
}
