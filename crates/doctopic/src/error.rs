//! Error types for doctopic.
//!
//! All fallible operations return [`Result`]. The error discipline is uniform
//! across extractors: a routine that cannot parse its input returns
//! `Err(DoctopicError::Parsing { .. })` - error text is never embedded in the
//! extracted payload.
//!
//! System errors bubble up unchanged: `DoctopicError::Io` (from
//! `std::io::Error`) indicates a real filesystem problem and is never wrapped
//! or suppressed. Application errors (`Parsing`, `Validation`, `Ocr`, ...)
//! carry a message plus an optional source for the chain.

use thiserror::Error;

/// Result type alias using [`DoctopicError`].
pub type Result<T> = std::result::Result<T, DoctopicError>;

/// Main error type for all doctopic operations.
#[derive(Debug, Error)]
pub enum DoctopicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DoctopicError {
    fn from(err: serde_json::Error) -> Self {
        DoctopicError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for DoctopicError {
    fn from(err: csv::Error) -> Self {
        DoctopicError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for DoctopicError {
    fn from(err: toml::de::Error) -> Self {
        DoctopicError::Validation {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl DoctopicError {
    /// Create a Parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error with source.
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an OCR error.
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Serialization error.
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DoctopicError = io_err.into();
        assert!(matches!(err, DoctopicError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_parsing_error() {
        let err = DoctopicError::parsing("invalid format");
        assert_eq!(err.to_string(), "Parsing error: invalid format");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_parsing_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad data");
        let err = DoctopicError::parsing_with_source("invalid format", source);
        assert_eq!(err.to_string(), "Parsing error: invalid format");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = DoctopicError::validation("invalid input");
        assert_eq!(err.to_string(), "Validation error: invalid input");
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = DoctopicError::UnsupportedFormat("video/mp4".to_string());
        assert_eq!(err.to_string(), "Unsupported format: video/mp4");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: DoctopicError = json_err.into();
        assert!(matches!(err, DoctopicError::Serialization { .. }));
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        assert!(matches!(read_file().unwrap_err(), DoctopicError::Io(_)));
    }
}
