//! Built-in extraction routines.
//!
//! One routine per supported content-type family. All implement the
//! [`DocumentExtractor`](crate::plugins::DocumentExtractor) trait and are
//! registered with the global registry exactly once, on first use.

use crate::plugins::registry::get_extractor_registry;
use crate::Result;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub mod csv;
pub mod structured;
pub mod text;

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "ocr")]
pub mod image;

#[cfg(all(feature = "ocr", feature = "pdf"))]
pub mod scanned_pdf;

pub use csv::CsvExtractor;
pub use structured::JsonExtractor;
pub use text::PlainTextExtractor;

#[cfg(feature = "office")]
pub use docx::DocxExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "ocr")]
pub use image::ImageExtractor;

#[cfg(all(feature = "ocr", feature = "pdf"))]
pub use scanned_pdf::ScannedPdfExtractor;

static EXTRACTORS_INITIALIZED: Lazy<Result<()>> = Lazy::new(register_default_extractors);

/// Ensure built-in extractors are registered.
///
/// Called automatically on first dispatch; safe to call repeatedly.
pub fn ensure_initialized() -> Result<()> {
    EXTRACTORS_INITIALIZED
        .as_ref()
        .map(|_| ())
        .map_err(|e| crate::DoctopicError::Other(format!("Failed to register default extractors: {}", e)))
}

/// Register all built-in extractors with the global registry.
pub fn register_default_extractors() -> Result<()> {
    let registry = get_extractor_registry();
    let mut registry = registry
        .write()
        .map_err(|e| crate::DoctopicError::Other(format!("Extractor registry lock poisoned: {}", e)))?;

    registry.register(Arc::new(PlainTextExtractor::new()))?;
    registry.register(Arc::new(JsonExtractor::new()))?;
    registry.register(Arc::new(CsvExtractor::new()))?;

    #[cfg(feature = "office")]
    registry.register(Arc::new(DocxExtractor::new()))?;

    #[cfg(feature = "pdf")]
    registry.register(Arc::new(PdfExtractor::new()))?;

    #[cfg(feature = "ocr")]
    registry.register(Arc::new(ImageExtractor::new()))?;

    // The scanned-PDF routine is registered below the text-layer routine:
    // it claims the same MIME type and is selected explicitly by callers
    // that know the document has no text layer.
    #[cfg(all(feature = "ocr", feature = "pdf"))]
    registry.register(Arc::new(ScannedPdfExtractor::new()))?;

    Ok(())
}
