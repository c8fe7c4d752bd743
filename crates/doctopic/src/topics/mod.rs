//! Topic naming strategies.
//!
//! Several parallel, stateless strategies for the same interface: a list of
//! topic keywords in, a short human-readable label out. The extractive
//! strategies (YAKE, RAKE, noun-phrase chunking) run in-process; generative
//! models (T5/BART class summarizers) are external collaborators reached
//! through the [`CommandNamer`] subprocess delegate. Each strategy produces a
//! label or its fixed fallback string; none of them share state.

use crate::core::config::ExtractionConfig;
use crate::stopwords::is_stopword;
use crate::{DoctopicError, Result};
use async_trait::async_trait;

/// Fallback label when a strategy's model yields nothing usable.
pub const UNKNOWN_TOPIC: &str = "Unknown Topic";
/// Fallback label for the noun-phrase strategy.
pub const GENERAL_TOPIC: &str = "General Topic";

/// A topic naming strategy: `keywords -> label`.
#[async_trait]
pub trait TopicNamer: Send + Sync {
    /// Strategy identifier for reporting.
    fn name(&self) -> &str;

    /// Produce a short label for the topic described by `keywords`.
    async fn label(&self, keywords: &[String]) -> Result<String>;
}

/// Extractive naming via YAKE: the top-scored phrase of the joined keywords.
#[cfg(feature = "keywords-yake")]
pub struct YakeNamer;

#[cfg(feature = "keywords-yake")]
#[async_trait]
impl TopicNamer for YakeNamer {
    fn name(&self) -> &str {
        "yake"
    }

    async fn label(&self, keywords: &[String]) -> Result<String> {
        let text = keywords.join(" ");
        let config = yake_rust::Config {
            ngrams: 3,
            ..yake_rust::Config::default()
        };
        let results = yake_rust::get_n_best(1, &text, &yake_rust::StopWords::default(), &config);

        Ok(results
            .into_iter()
            .next()
            .map(|item| item.keyword)
            .unwrap_or_else(|| UNKNOWN_TOPIC.to_string()))
    }
}

/// Extractive naming via RAKE co-occurrence scoring.
#[cfg(feature = "keywords-rake")]
pub struct RakeNamer;

#[cfg(feature = "keywords-rake")]
#[async_trait]
impl TopicNamer for RakeNamer {
    fn name(&self) -> &str {
        "rake"
    }

    async fn label(&self, keywords: &[String]) -> Result<String> {
        let text = keywords.join(" ");
        let stopwords: std::collections::HashSet<String> = crate::stopwords::stopword_set()
            .iter()
            .map(|w| (*w).to_string())
            .collect();
        let rake = rake::Rake::new(rake::StopWords::from(stopwords));

        let mut results = rake.run(&text);
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        Ok(results
            .into_iter()
            .next()
            .map(|item| item.keyword)
            .unwrap_or_else(|| UNKNOWN_TOPIC.to_string()))
    }
}

/// Noun-phrase pick: the first run of consecutive content words (up to
/// three) in the keyword list, standing in for a parser's first noun chunk.
pub struct NounPhraseNamer;

#[async_trait]
impl TopicNamer for NounPhraseNamer {
    fn name(&self) -> &str {
        "noun-phrase"
    }

    async fn label(&self, keywords: &[String]) -> Result<String> {
        let mut chunk: Vec<&str> = Vec::new();

        for keyword in keywords {
            for token in keyword.split_whitespace() {
                let lowered = token.to_lowercase();
                if is_stopword(&lowered) {
                    if !chunk.is_empty() {
                        return Ok(chunk.join(" "));
                    }
                    continue;
                }
                chunk.push(token);
                if chunk.len() == 3 {
                    return Ok(chunk.join(" "));
                }
            }
        }

        if chunk.is_empty() {
            Ok(GENERAL_TOPIC.to_string())
        } else {
            Ok(chunk.join(" "))
        }
    }
}

/// Delegate wrapper for an external generative summarizer.
///
/// The configured command receives the keywords, comma-joined, on stdin and
/// is expected to print a short label on stdout. The model itself is an
/// opaque external capability.
pub struct CommandNamer {
    command: Vec<String>,
    timeout_secs: u64,
}

impl CommandNamer {
    /// # Errors
    ///
    /// `Validation` when `command` is empty.
    pub fn new(command: Vec<String>, timeout_secs: u64) -> Result<Self> {
        if command.is_empty() {
            return Err(DoctopicError::validation("Namer command must not be empty"));
        }
        Ok(Self { command, timeout_secs })
    }
}

#[async_trait]
impl TopicNamer for CommandNamer {
    fn name(&self) -> &str {
        "command"
    }

    async fn label(&self, keywords: &[String]) -> Result<String> {
        use tokio::io::AsyncWriteExt;

        let mut cmd = tokio::process::Command::new(&self.command[0]);
        cmd.args(&self.command[1..])
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DoctopicError::MissingDependency(format!("Namer command not found: {}", self.command[0]))
            } else {
                DoctopicError::Io(e)
            }
        })?;

        let input = keywords.join(", ");
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes()).await?;
            drop(stdin);
        }

        let output = match tokio::time::timeout(
            std::time::Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(DoctopicError::Io(e)),
            Err(_) => {
                return Err(DoctopicError::Other(format!(
                    "Namer command timed out after {} seconds",
                    self.timeout_secs
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DoctopicError::Other(format!(
                "Namer command failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        let label = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if label.is_empty() {
            Ok(UNKNOWN_TOPIC.to_string())
        } else {
            Ok(label)
        }
    }
}

/// Pull topic keywords out of free text.
///
/// YAKE-backed when the `keywords-yake` feature is on, with a term-frequency
/// fallback so the function always returns something for non-empty input.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    if max == 0 || text.trim().is_empty() {
        return Vec::new();
    }

    #[cfg(feature = "keywords-yake")]
    {
        let config = yake_rust::Config::default();
        let results = yake_rust::get_n_best(max, text, &yake_rust::StopWords::default(), &config);
        if !results.is_empty() {
            return results.into_iter().map(|item| item.keyword).collect();
        }
    }

    frequency_keywords(text, max)
}

/// Top content words by occurrence count, ties broken by first appearance.
fn frequency_keywords(text: &str, max: usize) -> Vec<String> {
    let cleaned = crate::text::clean_text(text);
    let mut counts: ahash::AHashMap<&str, (usize, usize)> = ahash::AHashMap::new();

    for (position, word) in cleaned.split_whitespace().enumerate() {
        let entry = counts.entry(word).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(max)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Run every available strategy side by side.
///
/// A failing strategy is reported with its fallback label rather than
/// aborting the others.
pub async fn generate_topic_names(keywords: &[String], config: &ExtractionConfig) -> Vec<(String, String)> {
    let mut namers: Vec<Box<dyn TopicNamer>> = Vec::new();

    #[cfg(feature = "keywords-yake")]
    namers.push(Box::new(YakeNamer));

    #[cfg(feature = "keywords-rake")]
    namers.push(Box::new(RakeNamer));

    namers.push(Box::new(NounPhraseNamer));

    if let Some(command) = &config.namer_command {
        match CommandNamer::new(command.clone(), config.namer_timeout_secs) {
            Ok(namer) => namers.push(Box::new(namer)),
            Err(e) => tracing::warn!(error = %e, "invalid namer command, skipping"),
        }
    }

    let mut labels = Vec::with_capacity(namers.len());
    for namer in &namers {
        let label = match namer.label(keywords).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(strategy = namer.name(), error = %e, "topic naming strategy failed");
                UNKNOWN_TOPIC.to_string()
            }
        };
        labels.push((namer.name().to_string(), label));
    }

    labels
}
