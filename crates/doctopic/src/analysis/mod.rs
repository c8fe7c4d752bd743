//! Background document analysis.
//!
//! Runs the extract, clean and topic-labelling pipeline on a tokio task and
//! hands the result back over a oneshot channel, so interactive callers stay
//! responsive. A watch channel carries the cancellation signal; the worker
//! races it against the pipeline and a cancelled run reports `Cancelled`
//! instead of a partial result. One analysis at a time: starting a second one
//! while the first is in flight is a `Validation` error.

use crate::core::config::ExtractionConfig;
use crate::core::pipeline::{process_file, PipelineOutput};
use crate::topics::{extract_keywords, generate_topic_names};
use crate::{DoctopicError, Result};
use std::path::PathBuf;
use tokio::sync::{oneshot, watch};

/// Keywords to feed the naming strategies.
const ANALYSIS_KEYWORD_COUNT: usize = 10;

/// Everything a completed analysis produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub output: PipelineOutput,
    pub keywords: Vec<String>,
    /// `(strategy, label)` pairs from every available naming strategy.
    pub labels: Vec<(String, String)>,
}

/// Terminal state of one analysis run.
#[derive(Debug)]
pub enum AnalysisOutcome {
    Completed(Box<AnalysisReport>),
    Cancelled,
}

struct RunningAnalysis {
    cancel: watch::Sender<bool>,
    handle: tokio::task::JoinHandle<()>,
}

/// Handle for starting and cancelling background analyses.
#[derive(Default)]
pub struct Analyzer {
    running: Option<RunningAnalysis>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an analysis is still in flight.
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }

    /// Spawn an analysis of `path`. The returned receiver resolves with the
    /// outcome, or with the pipeline's error.
    ///
    /// # Errors
    ///
    /// `Validation` when an analysis is already running.
    pub fn start(
        &mut self,
        path: impl Into<PathBuf>,
        config: ExtractionConfig,
    ) -> Result<oneshot::Receiver<Result<AnalysisOutcome>>> {
        if self.is_running() {
            return Err(DoctopicError::validation("An analysis is already running"));
        }

        let path = path.into();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (result_tx, result_rx) = oneshot::channel();

        let handle = tokio::spawn(run_analysis(path, config, cancel_rx, result_tx));

        self.running = Some(RunningAnalysis {
            cancel: cancel_tx,
            handle,
        });
        Ok(result_rx)
    }

    /// Signal the running analysis to stop. No-op when nothing is running.
    pub fn cancel(&self) {
        if let Some(running) = &self.running {
            let _ = running.cancel.send(true);
        }
    }

    /// Cancel and wait for the worker task to exit.
    pub async fn shutdown(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.cancel.send(true);
            let _ = running.handle.await;
        }
    }
}

async fn run_analysis(
    path: PathBuf,
    config: ExtractionConfig,
    mut cancel_rx: watch::Receiver<bool>,
    result_tx: oneshot::Sender<Result<AnalysisOutcome>>,
) {
    // Cancellation requested before the first poll wins outright.
    let outcome = tokio::select! {
        biased;
        _ = cancel_rx.changed() => {
            tracing::info!(path = %path.display(), "analysis cancelled");
            Ok(AnalysisOutcome::Cancelled)
        }
        result = analyze(&path, &config) => result.map(|report| AnalysisOutcome::Completed(Box::new(report))),
    };

    // The caller may have dropped the receiver; nothing to do then.
    let _ = result_tx.send(outcome);
}

async fn analyze(path: &std::path::Path, config: &ExtractionConfig) -> Result<AnalysisReport> {
    let output = process_file(path, config).await?;

    let keywords = extract_keywords(&output.content, ANALYSIS_KEYWORD_COUNT);
    let labels = generate_topic_names(&keywords, config).await;

    tracing::debug!(
        path = %path.display(),
        keywords = keywords.len(),
        labels = labels.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        output,
        keywords,
        labels,
    })
}
