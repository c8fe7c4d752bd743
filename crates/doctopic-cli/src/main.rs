//! doctopic command-line interface.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use doctopic::{
    build_abstract_corpus, generate_topic_names, process_file, resolve, AnalysisOutcome, Analyzer,
    CorpusFilter, ExtractionConfig,
};
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doctopic", version, about = "Document text extraction and topic labeling")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect a file's content type and the routine that would handle it.
    Detect {
        path: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Extract text from a file.
    Extract {
        path: PathBuf,

        /// Remove stopwords and lowercase the extracted text.
        #[arg(long)]
        clean: bool,

        /// Maximum number of characters to keep.
        #[arg(long)]
        max_chars: Option<usize>,

        /// For images: open the system viewer instead of running OCR.
        #[arg(long)]
        show: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Build an abstract corpus from an NDJSON metadata dump.
    Corpus {
        input: PathBuf,
        output: PathBuf,

        /// Keep records first published in this year or later.
        #[arg(long)]
        min_year: Option<i32>,

        /// Stop after this many abstracts.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Generate topic labels from keywords with every available strategy.
    Label {
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Interactive menu over one document.
    Menu { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(clean = config.clean, max_chars = config.max_chars, "configuration loaded");

    match cli.command {
        Command::Detect { path, json } => detect(&path, json),
        Command::Extract {
            path,
            clean,
            max_chars,
            show,
            json,
        } => {
            let mut config = config;
            config.clean = clean;
            if let Some(max_chars) = max_chars {
                config.max_chars = max_chars;
            }
            extract(&path, &config, show, json).await
        }
        Command::Corpus {
            input,
            output,
            min_year,
            limit,
        } => {
            let mut filter = CorpusFilter::default();
            if let Some(min_year) = min_year {
                filter.min_year = min_year;
            }
            if let Some(limit) = limit {
                filter.limit = limit;
            }
            corpus(&input, &output, &filter).await
        }
        Command::Label { keywords } => {
            label(&keywords, &config).await;
            Ok(())
        }
        Command::Menu { path } => menu(&path, &config).await,
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ExtractionConfig> {
    match path {
        Some(path) => {
            ExtractionConfig::from_file(path).with_context(|| format!("loading config from {}", path.display()))
        }
        None => Ok(ExtractionConfig::discover()),
    }
}

fn detect(path: &std::path::Path, json: bool) -> anyhow::Result<()> {
    let dispatch = resolve(path)?;
    let extractor = dispatch.extractor_name();

    if json {
        let value = serde_json::json!({
            "mime_type": dispatch.mime_type,
            "extractor": extractor,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        match extractor {
            Some(name) => println!("{} -> {}", dispatch.mime_type, name),
            None => println!("{} -> unsupported", dispatch.mime_type),
        }
    }
    Ok(())
}

async fn extract(path: &std::path::Path, config: &ExtractionConfig, show: bool, json: bool) -> anyhow::Result<()> {
    if show {
        let dispatch = resolve(path)?;
        if !dispatch.mime_type.starts_with("image/") {
            bail!("--show only applies to images, got {}", dispatch.mime_type);
        }
        let placeholder = doctopic::extractors::image::show_image(path).await?;
        println!("{}", placeholder);
        return Ok(());
    }

    let output = process_file(path, config).await?;

    if json {
        let value = serde_json::json!({
            "mime_type": output.mime_type,
            "extractor": output.extractor,
            "content": output.content,
            "raw_chars": output.raw_chars,
            "truncated": output.truncated,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", output.content);
    }
    Ok(())
}

async fn corpus(input: &std::path::Path, output: &std::path::Path, filter: &CorpusFilter) -> anyhow::Result<()> {
    let stats = build_abstract_corpus(input, output, filter).await?;

    println!("scanned:           {}", stats.scanned);
    println!("kept:              {}", stats.kept);
    println!("skipped (filter):  {}", stats.skipped_filtered);
    println!("skipped (invalid): {}", stats.skipped_malformed);
    println!("wrote {}", output.display());
    Ok(())
}

async fn label(keywords: &[String], config: &ExtractionConfig) {
    for (strategy, label) in generate_topic_names(keywords, config).await {
        println!("{:12} {}", strategy, label);
    }
}

async fn menu(path: &std::path::Path, config: &ExtractionConfig) -> anyhow::Result<()> {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!();
        println!("--- {} ---", path.display());
        println!("  1) Raw text preview");
        println!("  2) Cleaned text");
        println!("  3) Raw and cleaned");
        println!("  4) Background analysis (topic labels)");
        println!("  0) Exit");
        print_prompt("> ")?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };

        match line.trim() {
            "0" => return Ok(()),
            "1" => {
                let output = process_file(path, config).await?;
                println!("{}", output.content);
            }
            "2" => {
                let mut cleaned = config.clone();
                cleaned.clean = true;
                let output = process_file(path, &cleaned).await?;
                println!("{}", output.content);
            }
            "3" => {
                let output = process_file(path, config).await?;
                println!("[raw]\n{}", output.content);
                println!("[cleaned]\n{}", doctopic::clean_text(&output.content));
            }
            "4" => run_analysis(path, config, &mut lines).await?,
            other => println!("unknown choice: {:?}", other),
        }
    }
}

async fn run_analysis(
    path: &std::path::Path,
    config: &ExtractionConfig,
    lines: &mut tokio::io::Lines<tokio::io::BufReader<tokio::io::Stdin>>,
) -> anyhow::Result<()> {
    let mut analyzer = Analyzer::new();
    let rx = analyzer.start(path.to_path_buf(), config.clone())?;

    println!("analyzing... (press Enter to cancel)");

    let outcome = tokio::select! {
        outcome = rx => outcome.context("analysis task dropped")??,
        _ = lines.next_line() => {
            analyzer.cancel();
            analyzer.shutdown().await;
            println!("cancelled");
            return Ok(());
        }
    };

    match outcome {
        AnalysisOutcome::Cancelled => println!("cancelled"),
        AnalysisOutcome::Completed(report) => {
            println!("keywords: {}", report.keywords.join(", "));
            for (strategy, label) in &report.labels {
                println!("{:12} {}", strategy, label);
            }
        }
    }
    Ok(())
}

fn print_prompt(prompt: &str) -> anyhow::Result<()> {
    use std::io::Write;
    print!("{}", prompt);
    std::io::stdout().flush()?;
    Ok(())
}
