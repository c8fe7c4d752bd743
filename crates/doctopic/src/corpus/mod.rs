//! Abstract corpus construction from NDJSON metadata dumps.
//!
//! Streams an arXiv-style metadata snapshot (one JSON record per line), keeps
//! the abstracts of records first published at or after a cutoff year, and
//! writes them out as a single JSON array. The input runs to millions of
//! lines, so it is never buffered whole.

use crate::{DoctopicError, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncBufReadExt;

/// Record selection rules for [`build_abstract_corpus`].
#[derive(Debug, Clone)]
pub struct CorpusFilter {
    /// Keep records whose first version was created in this year or later.
    pub min_year: i32,
    /// Stop after this many kept abstracts.
    pub limit: usize,
}

impl Default for CorpusFilter {
    fn default() -> Self {
        Self {
            min_year: 2020,
            limit: 80_000,
        }
    }
}

/// What happened to the input lines, kept alongside the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Lines read from the input.
    pub scanned: usize,
    /// Abstracts written to the output.
    pub kept: usize,
    /// Lines that were not valid records (bad JSON or unparseable date).
    ///
    /// Date parsing is strict RFC 2822: a creation date whose weekday does
    /// not match its calendar date is rejected and counted here.
    pub skipped_malformed: usize,
    /// Valid records excluded by the filter (too old, or empty abstract).
    pub skipped_filtered: usize,
}

#[derive(Deserialize)]
struct MetadataRecord {
    // The metadata field is named "abstract", a Rust keyword.
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(default)]
    versions: Vec<VersionRecord>,
}

#[derive(Deserialize)]
struct VersionRecord {
    #[serde(default)]
    created: String,
}

impl MetadataRecord {
    fn from_line(line: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Year of the first version's RFC 2822 creation date.
    fn first_version_year(&self) -> Option<std::result::Result<i32, chrono::ParseError>> {
        let created = &self.versions.first()?.created;
        if created.is_empty() {
            return None;
        }
        Some(chrono::DateTime::parse_from_rfc2822(created).map(|d| chrono::Datelike::year(&d)))
    }
}

/// Stream `input` and write the selected abstracts to `output` as a
/// pretty-printed JSON array.
///
/// Malformed lines (invalid JSON, unparseable dates) are counted in the
/// returned stats and logged in aggregate, never fatal. Missing parent
/// directories of `output` are created.
///
/// # Errors
///
/// `Io` when the input cannot be read or the output cannot be written,
/// `Serialization` when the output array cannot be encoded.
pub async fn build_abstract_corpus(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    filter: &CorpusFilter,
) -> Result<CorpusStats> {
    let input = input.as_ref();
    let output = output.as_ref();

    if filter.limit == 0 {
        return Err(DoctopicError::validation("Corpus limit must be at least 1"));
    }

    let file = tokio::fs::File::open(input).await?;
    let reader = tokio::io::BufReader::new(file);
    let mut lines = reader.lines();

    let mut stats = CorpusStats::default();
    let mut abstracts: Vec<String> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        stats.scanned += 1;

        let record = match MetadataRecord::from_line(&line) {
            Ok(record) => record,
            Err(e) => {
                stats.skipped_malformed += 1;
                tracing::debug!(line = stats.scanned, error = %e, "skipping malformed metadata line");
                continue;
            }
        };

        let year = match record.first_version_year() {
            Some(Ok(year)) => year,
            Some(Err(e)) => {
                stats.skipped_malformed += 1;
                tracing::debug!(line = stats.scanned, error = %e, "skipping record with unparseable date");
                continue;
            }
            None => {
                stats.skipped_filtered += 1;
                continue;
            }
        };

        if year < filter.min_year {
            stats.skipped_filtered += 1;
            continue;
        }

        let abstract_text = record
            .abstract_text
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        if abstract_text.is_empty() {
            stats.skipped_filtered += 1;
            continue;
        }

        abstracts.push(abstract_text.to_string());
        stats.kept += 1;

        if stats.kept >= filter.limit {
            break;
        }
    }

    if stats.skipped_malformed > 0 {
        tracing::warn!(
            skipped_malformed = stats.skipped_malformed,
            scanned = stats.scanned,
            "input contained malformed lines"
        );
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(&abstracts)?;
    tokio::fs::write(output, json).await?;

    tracing::info!(
        kept = stats.kept,
        scanned = stats.scanned,
        output = %output.display(),
        "corpus written"
    );

    Ok(stats)
}
