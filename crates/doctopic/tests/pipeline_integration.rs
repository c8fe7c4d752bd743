//! Integration tests for the extraction and labeling pipeline.
//!
//! End-to-end behavior over real temp files: MIME detection feeding dispatch,
//! extraction, post-processing, and the background analysis task.

use doctopic::{
    build_abstract_corpus, detect_mime_type, process_file, resolve, AnalysisOutcome, Analyzer,
    CorpusFilter, DoctopicError, ExtractionConfig, TRUNCATION_MARKER,
};
use std::fs;
use tempfile::tempdir;

/// Detection, dispatch and extraction agree for a plain-text file.
#[tokio::test]
async fn test_text_file_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "Compilers translate source programs into machine code.").unwrap();

    assert_eq!(detect_mime_type(&path).unwrap(), "text/plain");

    let output = process_file(&path, &ExtractionConfig::default()).await.unwrap();
    assert_eq!(output.mime_type, "text/plain");
    assert_eq!(output.extractor, "plain-text-extractor");
    assert_eq!(output.content, "Compilers translate source programs into machine code.");
    assert!(!output.truncated);
}

/// A CSV file routes to the CSV routine and flattens rows as "a, b" lines.
#[tokio::test]
async fn test_csv_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.csv");
    fs::write(&path, "name,score\nada,10\n").unwrap();

    let output = process_file(&path, &ExtractionConfig::default()).await.unwrap();
    assert_eq!(output.extractor, "csv-extractor");
    assert_eq!(output.content, "name, score\nada, 10\n");
}

/// JSON content without a .json extension is still detected and pretty-printed.
#[tokio::test]
async fn test_json_detected_by_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("payload");
    fs::write(&path, r#"{"topic": "graphs"}"#).unwrap();

    let output = process_file(&path, &ExtractionConfig::default()).await.unwrap();
    assert_eq!(output.mime_type, "application/json");
    assert_eq!(output.content, "{\n    \"topic\": \"graphs\"\n}");
}

/// Cleaning plus truncation compose in that order.
#[tokio::test]
async fn test_clean_then_truncate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, "The HTTP Protocol And The Web").unwrap();

    let config = ExtractionConfig {
        clean: true,
        max_chars: 8,
        ..Default::default()
    };
    let output = process_file(&path, &config).await.unwrap();

    // clean: "protocol web"; truncate to 8 chars.
    assert_eq!(output.content, format!("protocol{}", TRUNCATION_MARKER));
    assert!(output.truncated);
}

/// A recognized but unsupported content type surfaces through dispatch as
/// `None` and through the pipeline as `UnsupportedFormat`.
#[tokio::test]
async fn test_unsupported_type_dispatch_vs_pipeline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("archive.gz");
    fs::write(&path, [0x1F, 0x8B, 0x08, 0x00]).unwrap();

    let dispatch = resolve(&path).unwrap();
    assert_eq!(dispatch.mime_type, "application/gzip");
    assert!(dispatch.extractor.is_none());

    let err = process_file(&path, &ExtractionConfig::default()).await.unwrap_err();
    assert!(matches!(err, DoctopicError::UnsupportedFormat(_)));
}

/// Background analysis of a real file yields keywords and one label per
/// available strategy.
#[tokio::test]
async fn test_background_analysis_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abstract.txt");
    fs::write(
        &path,
        "Reinforcement learning agents maximize cumulative reward. \
         Policy gradient methods optimize the policy directly from sampled trajectories.",
    )
    .unwrap();

    let mut analyzer = Analyzer::new();
    let rx = analyzer.start(path, ExtractionConfig::default()).unwrap();

    let report = match rx.await.unwrap().unwrap() {
        AnalysisOutcome::Completed(report) => report,
        AnalysisOutcome::Cancelled => panic!("nothing cancelled this run"),
    };

    assert!(!report.keywords.is_empty());
    assert!(report.labels.iter().any(|(name, _)| name == "noun-phrase"));
    for (_, label) in &report.labels {
        assert!(!label.is_empty());
    }
}

/// Corpus construction over a small NDJSON fixture, including a malformed
/// line, reports exact stats.
#[tokio::test]
async fn test_corpus_from_ndjson_fixture() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("metadata.ndjson");
    let output = dir.path().join("dataset/abstracts.json");

    let lines = [
        r#"{"abstract": "Old result.", "versions": [{"created": "Tue, 3 Apr 2012 09:00:00 GMT"}]}"#,
        r#"{"abstract": "New result on optimization.", "versions": [{"created": "Wed, 5 May 2021 09:00:00 GMT"}]}"#,
        "{broken",
    ];
    fs::write(&input, lines.join("\n")).unwrap();

    let stats = build_abstract_corpus(&input, &output, &CorpusFilter::default())
        .await
        .unwrap();

    assert_eq!(stats.scanned, 3);
    assert_eq!(stats.kept, 1);
    assert_eq!(stats.skipped_filtered, 1);
    assert_eq!(stats.skipped_malformed, 1);

    let written: Vec<String> = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, vec!["New result on optimization."]);
}
