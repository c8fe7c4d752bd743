//! OCR backend: tesseract invoked as a subprocess.
//!
//! The OCR engine itself is an external capability. This module owns the
//! subprocess boundary: argument assembly, timeout enforcement, and the triage
//! of failures into `MissingDependency` (binary absent), `Ocr` (engine
//! reported a problem), and `Io` (system-level failures).

use crate::core::config::OcrConfig;
use crate::{DoctopicError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Run tesseract on an image file and return the recognized text.
pub async fn recognize_image(path: &Path, config: &OcrConfig) -> Result<String> {
    let child = Command::new("tesseract")
        .arg(path)
        // "-" sends recognized text to stdout.
        .arg("-")
        .arg("-l")
        .arg(&config.language)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DoctopicError::MissingDependency(
                    "tesseract binary not found on PATH (install tesseract-ocr)".to_string(),
                )
            } else {
                DoctopicError::Io(e)
            }
        })?;

    let output = match timeout(Duration::from_secs(config.timeout_secs), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(DoctopicError::Io(e)),
        Err(_) => {
            return Err(DoctopicError::ocr(format!(
                "tesseract timed out after {} seconds",
                config.timeout_secs
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DoctopicError::ocr(format!(
            "tesseract failed ({}): {}",
            output.status,
            stderr.trim()
        )));
    }

    let text = String::from_utf8(output.stdout)
        .map_err(|e| DoctopicError::ocr(format!("tesseract produced non-UTF-8 output: {}", e)))?;

    Ok(text)
}

/// Rasterize a PDF into per-page PNG images with pdftoppm.
///
/// Returns the page image paths in page order.
pub async fn rasterize_pdf(path: &Path, out_dir: &Path, config: &OcrConfig) -> Result<Vec<std::path::PathBuf>> {
    let prefix = out_dir.join("page");

    let child = Command::new("pdftoppm")
        .arg("-png")
        .arg("-r")
        .arg(config.dpi.to_string())
        .arg(path)
        .arg(&prefix)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DoctopicError::MissingDependency(
                    "pdftoppm binary not found on PATH (install poppler-utils)".to_string(),
                )
            } else {
                DoctopicError::Io(e)
            }
        })?;

    let output = match timeout(Duration::from_secs(config.timeout_secs), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(DoctopicError::Io(e)),
        Err(_) => {
            return Err(DoctopicError::ocr(format!(
                "pdftoppm timed out after {} seconds",
                config.timeout_secs
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DoctopicError::parsing(format!(
            "pdftoppm failed ({}): {}",
            output.status,
            stderr.trim()
        )));
    }

    // pdftoppm names pages page-1.png, page-2.png, ... (zero-padded on some
    // versions); sort lexicographically after zero-padding the numeric part.
    let mut pages: Vec<std::path::PathBuf> = std::fs::read_dir(out_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
        .collect();
    pages.sort_by_key(|p| page_sort_key(p));

    Ok(pages)
}

fn page_sort_key(path: &Path) -> (usize, String) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let number = stem
        .rsplit('-')
        .next()
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    (number, stem.to_string())
}
