//! Extractor plugin traits.
//!
//! Extraction routines are trait objects behind a static registry: one table,
//! built once at startup, maps a content type to the routine that handles it.
//! Dispatch is an enum-free table lookup; there is no runtime name-based
//! reflection.

pub mod registry;

pub use registry::{get_extractor_registry, ExtractorRegistry};

use crate::core::config::ExtractionConfig;
use crate::types::ExtractionResult;
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// Base trait for all plugins.
///
/// Plugins must be `Send + Sync`; they are stored as `Arc<dyn _>` in a global
/// registry and may be called from any task.
pub trait Plugin: Send + Sync {
    /// Unique plugin identifier, lowercase with hyphens.
    fn name(&self) -> &str;

    /// Plugin version, defaults to the crate version.
    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// One-time setup hook, called at registration.
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    /// Teardown hook.
    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    /// Optional human-readable description.
    fn description(&self) -> &str {
        ""
    }
}

/// A document extraction routine: path (or bytes) in, plain text out.
///
/// Routines are stateless across calls. Any fixed configuration an underlying
/// native dependency needs (OCR language, rasterization DPI) arrives through
/// [`ExtractionConfig`] rather than process-global state.
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// Extract text from in-memory content.
    async fn extract_bytes(
        &self,
        content: &[u8],
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult>;

    /// Extract text from a file on disk.
    ///
    /// The default implementation reads the file and delegates to
    /// [`extract_bytes`](DocumentExtractor::extract_bytes); routines that
    /// shell out to tools operating on paths override this instead.
    async fn extract_path(
        &self,
        path: &Path,
        mime_type: &str,
        config: &ExtractionConfig,
    ) -> Result<ExtractionResult> {
        let bytes = tokio::fs::read(path).await?;
        self.extract_bytes(&bytes, mime_type, config).await
    }

    /// MIME types this routine handles. A trailing `family/*` entry claims a
    /// whole family at lower precedence than exact matches.
    fn supported_mime_types(&self) -> &[&str];

    /// Selection priority when several routines claim the same type.
    fn priority(&self) -> i32 {
        50
    }
}
