//! Doctopic - document text extraction and topic labeling toolkit.
//!
//! Doctopic turns arbitrary user-supplied files (plain text, PDF, DOCX, CSV,
//! JSON, images) into plain text, cleans that text for downstream topic
//! modeling, and generates short human-readable topic labels from topic
//! keywords via several alternative strategies.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use doctopic::{ExtractionConfig, core::pipeline::process_file};
//!
//! # async fn run() -> doctopic::Result<()> {
//! let config = ExtractionConfig::default();
//! let output = process_file("document.pdf", &config).await?;
//! println!("{} via {}: {}", output.mime_type, output.extractor, output.content);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): content-based MIME detection, extractor dispatch,
//!   configuration, and the extract/clean/truncate pipeline.
//! - **Extractors** (`extractors`): one routine per content-type family,
//!   registered once at startup in a static registry.
//! - **Text** (`text`, `stopwords`): stopword removal and truncation with a
//!   single source of truth for the stoplist.
//! - **Topics** (`topics`): parallel topic-naming strategies over the same
//!   `keywords -> label` interface.
//! - **Corpus** (`corpus`): NDJSON abstract-corpus construction with counted,
//!   reported skipping of malformed records.
//! - **Analysis** (`analysis`): background extract+label task with explicit
//!   cancellation and a re-entrancy guard.
//!
//! The embedding model, clustering, and generative summarizers remain external
//! collaborators; where they are needed they are reached through subprocess
//! delegate seams rather than reimplemented.

#![deny(unsafe_code)]

pub mod analysis;
pub mod core;
pub mod corpus;
pub mod error;
pub mod extractors;
pub mod plugins;
pub mod stopwords;
pub mod text;
pub mod types;

#[cfg(feature = "ocr")]
pub mod ocr;

pub mod topics;

pub use error::{DoctopicError, Result};
pub use types::ExtractionResult;

pub use core::config::{ExtractionConfig, OcrConfig};
pub use core::dispatcher::{resolve, Dispatch};
pub use core::mime::{
    detect_mime_type, detect_mime_type_from_bytes, CSV_MIME_TYPE, DOCX_MIME_TYPE, JSON_MIME_TYPE,
    MARKDOWN_MIME_TYPE, OCTET_STREAM_MIME_TYPE, PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE,
};
pub use core::pipeline::{process_file, PipelineOutput};

pub use text::{clean_text, truncate_text, TRUNCATION_MARKER};

pub use analysis::{AnalysisOutcome, AnalysisReport, Analyzer};
pub use corpus::{build_abstract_corpus, CorpusFilter, CorpusStats};
pub use topics::{extract_keywords, generate_topic_names, TopicNamer, GENERAL_TOPIC, UNKNOWN_TOPIC};
