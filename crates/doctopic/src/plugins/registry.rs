//! Global extractor registry.
//!
//! One registry for the process lifetime, built at startup by
//! [`crate::extractors::register_default_extractors`] and read-only
//! afterward. Every registered entry corresponds to a live routine; a lookup
//! can therefore only report "no routine for this type", never a dangling
//! identifier.

use super::{DocumentExtractor, Plugin};
use crate::{DoctopicError, Result};
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

/// Registry of document extractors, keyed by the MIME types they claim.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Arc<dyn DocumentExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor, running its initialize hook.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when an extractor with the same name is already
    /// registered, or the extractor's own error when initialization fails.
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        if self.extractors.iter().any(|e| e.name() == extractor.name()) {
            return Err(DoctopicError::validation(format!(
                "Extractor already registered: {}",
                extractor.name()
            )));
        }
        extractor.initialize()?;
        tracing::debug!(extractor = extractor.name(), "registered extractor");
        self.extractors.push(extractor);
        Ok(())
    }

    /// Find the routine for a MIME type.
    ///
    /// Exact claims win over `family/*` wildcards; among equal claims the
    /// highest priority wins. `None` is the normal "no extractor available"
    /// outcome, not a fault.
    pub fn find(&self, mime_type: &str) -> Option<Arc<dyn DocumentExtractor>> {
        let exact = self
            .extractors
            .iter()
            .filter(|e| e.supported_mime_types().contains(&mime_type))
            .max_by_key(|e| e.priority());
        if let Some(found) = exact {
            return Some(Arc::clone(found));
        }

        let family = mime_type.split('/').next().unwrap_or_default();
        let wildcard = format!("{}/*", family);
        self.extractors
            .iter()
            .filter(|e| e.supported_mime_types().contains(&wildcard.as_str()))
            .max_by_key(|e| e.priority())
            .map(Arc::clone)
    }

    /// Names of all registered extractors.
    pub fn list(&self) -> Vec<String> {
        self.extractors.iter().map(|e| e.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

static EXTRACTOR_REGISTRY: Lazy<RwLock<ExtractorRegistry>> =
    Lazy::new(|| RwLock::new(ExtractorRegistry::new()));

/// Access the global extractor registry.
pub fn get_extractor_registry() -> &'static RwLock<ExtractorRegistry> {
    &EXTRACTOR_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExtractionConfig;
    use crate::types::ExtractionResult;
    use async_trait::async_trait;

    struct FakeExtractor {
        name: &'static str,
        mimes: &'static [&'static str],
        priority: i32,
    }

    impl Plugin for FakeExtractor {
        fn name(&self) -> &str {
            self.name
        }
    }

    #[async_trait]
    impl DocumentExtractor for FakeExtractor {
        async fn extract_bytes(
            &self,
            _content: &[u8],
            mime_type: &str,
            _config: &ExtractionConfig,
        ) -> Result<ExtractionResult> {
            Ok(ExtractionResult::new("fake", mime_type))
        }

        fn supported_mime_types(&self) -> &[&str] {
            self.mimes
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = ExtractorRegistry::new();
        registry
            .register(Arc::new(FakeExtractor {
                name: "fake-text",
                mimes: &["text/plain"],
                priority: 50,
            }))
            .unwrap();

        assert!(registry.find("text/plain").is_some());
        assert!(registry.find("application/pdf").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ExtractorRegistry::new();
        let make = || {
            Arc::new(FakeExtractor {
                name: "dup",
                mimes: &["text/plain"],
                priority: 50,
            })
        };
        registry.register(make()).unwrap();
        assert!(registry.register(make()).is_err());
    }

    #[test]
    fn test_priority_wins() {
        let mut registry = ExtractorRegistry::new();
        registry
            .register(Arc::new(FakeExtractor {
                name: "low",
                mimes: &["text/plain"],
                priority: 10,
            }))
            .unwrap();
        registry
            .register(Arc::new(FakeExtractor {
                name: "high",
                mimes: &["text/plain"],
                priority: 90,
            }))
            .unwrap();

        assert_eq!(registry.find("text/plain").unwrap().name(), "high");
    }

    #[test]
    fn test_wildcard_family_match() {
        let mut registry = ExtractorRegistry::new();
        registry
            .register(Arc::new(FakeExtractor {
                name: "any-image",
                mimes: &["image/*"],
                priority: 50,
            }))
            .unwrap();
        registry
            .register(Arc::new(FakeExtractor {
                name: "png-only",
                mimes: &["image/png"],
                priority: 10,
            }))
            .unwrap();

        // Exact claim beats the wildcard even at lower priority.
        assert_eq!(registry.find("image/png").unwrap().name(), "png-only");
        assert_eq!(registry.find("image/webp").unwrap().name(), "any-image");
    }
}
