//! Format dispatch: content type to extraction routine.
//!
//! `resolve` separates "what the file is" from "what we can do with it": the
//! caller gets the detected content type either way, and the absence of a
//! routine is a normal outcome rather than a fault. Only detection itself
//! (missing or unreadable file) can fail.

use crate::core::mime::detect_mime_type;
use crate::plugins::registry::get_extractor_registry;
use crate::plugins::DocumentExtractor;
use crate::{DoctopicError, Result};
use std::path::Path;
use std::sync::Arc;

/// Outcome of dispatch: the detected content type and, when the registry has
/// one, the routine that handles it.
pub struct Dispatch {
    pub mime_type: String,
    pub extractor: Option<Arc<dyn DocumentExtractor>>,
}

impl Dispatch {
    /// Name of the resolved routine, if any.
    pub fn extractor_name(&self) -> Option<&str> {
        self.extractor.as_deref().map(|e| e.name())
    }
}

// Manual impl: the trait object carries no Debug bound, so the routine is
// shown by name.
impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("mime_type", &self.mime_type)
            .field("extractor", &self.extractor_name())
            .finish()
    }
}

/// Detect a file's content type and look up the extraction routine for it.
///
/// # Errors
///
/// Fails only when detection fails (nonexistent or unreadable path). An
/// unsupported content type is reported as `extractor: None`.
pub fn resolve(path: impl AsRef<Path>) -> Result<Dispatch> {
    crate::extractors::ensure_initialized()?;

    let path = path.as_ref();
    let mime_type = detect_mime_type(path)?;

    let registry = get_extractor_registry()
        .read()
        .map_err(|e| DoctopicError::Other(format!("Extractor registry lock poisoned: {}", e)))?;
    let extractor = registry.find(&mime_type);

    match &extractor {
        Some(found) => {
            tracing::debug!(mime_type = %mime_type, extractor = found.name(), "resolved extraction routine")
        }
        None => tracing::debug!(mime_type = %mime_type, "no extraction routine for content type"),
    }

    Ok(Dispatch { mime_type, extractor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let dispatch = resolve(&path).unwrap();
        assert_eq!(dispatch.mime_type, "text/plain");
        assert_eq!(dispatch.extractor_name(), Some("plain-text-extractor"));
    }

    #[test]
    fn test_resolve_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "a,b\n").unwrap();

        let dispatch = resolve(&path).unwrap();
        assert_eq!(dispatch.mime_type, "text/csv");
        assert_eq!(dispatch.extractor_name(), Some("csv-extractor"));
    }

    #[test]
    fn test_resolve_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"a": 1}"#).unwrap();

        let dispatch = resolve(&path).unwrap();
        assert_eq!(dispatch.mime_type, "application/json");
        assert_eq!(dispatch.extractor_name(), Some("json-extractor"));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_resolve_pdf_by_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        fs::write(&path, b"%PDF-1.4\n").unwrap();

        let dispatch = resolve(&path).unwrap();
        assert_eq!(dispatch.mime_type, "application/pdf");
        assert_eq!(dispatch.extractor_name(), Some("pdf-extractor"));
    }

    #[test]
    fn test_unsupported_type_is_not_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("archive.bin");
        // gzip magic: recognized content type with no registered routine.
        fs::write(&path, [0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00]).unwrap();

        let dispatch = resolve(&path).unwrap();
        assert_eq!(dispatch.mime_type, "application/gzip");
        assert!(dispatch.extractor.is_none());
    }

    #[test]
    fn test_dispatch_debug_names_routine() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let rendered = format!("{:?}", resolve(&path).unwrap());
        assert!(rendered.contains("text/plain"));
        assert!(rendered.contains("plain-text-extractor"));
    }

    #[test]
    fn test_nonexistent_path_is_error() {
        let err = resolve("/nonexistent/whatever.txt").unwrap_err();
        assert!(matches!(err, DoctopicError::Validation { .. }));
    }
}
