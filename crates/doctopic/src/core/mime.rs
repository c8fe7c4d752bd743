//! MIME type detection.
//!
//! Classification is content-first: a bounded prefix of the file's bytes is
//! inspected for magic numbers (via `infer`), and only text formats that carry
//! no signature fall back to extension-based refinement. A file that exists
//! but matches nothing is classified `application/octet-stream`; whether
//! anything can be done with it is the dispatcher's concern, not the
//! detector's.

use crate::{DoctopicError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";
pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const TSV_MIME_TYPE: &str = "text/tab-separated-values";
pub const JSON_MIME_TYPE: &str = "application/json";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Bytes inspected for content sniffing. Large enough for OOXML container
/// signatures, small enough to keep detection a cheap read-only probe.
const SNIFF_LEN: usize = 64 * 1024;

/// Extension refinement for formats without a magic signature.
static EXT_TO_MIME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert("txt", PLAIN_TEXT_MIME_TYPE);
    m.insert("text", PLAIN_TEXT_MIME_TYPE);
    m.insert("log", PLAIN_TEXT_MIME_TYPE);
    m.insert("md", MARKDOWN_MIME_TYPE);
    m.insert("markdown", MARKDOWN_MIME_TYPE);

    m.insert("csv", CSV_MIME_TYPE);
    m.insert("tsv", TSV_MIME_TYPE);
    m.insert("json", JSON_MIME_TYPE);
    m.insert("ndjson", "application/x-ndjson");
    m.insert("jsonl", "application/x-ndjson");

    // Container refinement: `infer` reports OOXML containers it cannot walk
    // as plain zip; the extension disambiguates.
    m.insert("docx", DOCX_MIME_TYPE);

    m
});

/// Detect the MIME type of a file from its content.
///
/// # Errors
///
/// Returns `DoctopicError::Validation` when the path does not exist, and
/// `DoctopicError::Io` when it cannot be read. An unrecognized but readable
/// file is not an error; it is reported as `application/octet-stream`.
pub fn detect_mime_type(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DoctopicError::validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let mut file = std::fs::File::open(path)?;
    let mut buf = vec![0u8; SNIFF_LEN];
    let mut filled = 0;
    loop {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled == buf.len() {
            break;
        }
    }
    buf.truncate(filled);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    Ok(sniff_bytes(&buf, ext.as_deref(), Some(path)))
}

/// Detect the MIME type of in-memory content.
///
/// Extension refinement is unavailable here, so text formats that share a
/// representation (CSV vs plain text) resolve to the broader type.
pub fn detect_mime_type_from_bytes(content: &[u8]) -> String {
    let prefix = &content[..content.len().min(SNIFF_LEN)];
    sniff_bytes(prefix, None, None)
}

fn sniff_bytes(buf: &[u8], ext: Option<&str>, path: Option<&Path>) -> String {
    if let Some(kind) = infer::get(buf) {
        let mime = kind.mime_type();
        // OOXML detection can degrade to the zip container when the content
        // types entry is not in the sniffed prefix.
        if mime == "application/zip" {
            if let Some(refined) = ext.and_then(|e| EXT_TO_MIME.get(e)) {
                return (*refined).to_string();
            }
        }
        return mime.to_string();
    }

    if buf.is_empty() || looks_like_text(buf) {
        if let Some(refined) = ext.and_then(|e| EXT_TO_MIME.get(e)) {
            return (*refined).to_string();
        }
        if !buf.is_empty() && looks_like_json(buf) {
            return JSON_MIME_TYPE.to_string();
        }
        if let Some(p) = path {
            if let Some(guess) = mime_guess::from_path(p).first() {
                return guess.to_string();
            }
        }
        return PLAIN_TEXT_MIME_TYPE.to_string();
    }

    OCTET_STREAM_MIME_TYPE.to_string()
}

/// Valid UTF-8, allowing for a multi-byte sequence cut at the sniff boundary.
fn looks_like_text(buf: &[u8]) -> bool {
    if buf.contains(&0) {
        return false;
    }
    match std::str::from_utf8(buf) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && buf.len() - e.valid_up_to() < 4,
    }
}

/// A JSON document: leading `{` or `[` that parses, or (when the document was
/// truncated by the sniff window) at least starts like one.
fn looks_like_json(buf: &[u8]) -> bool {
    let first = match buf.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b) => *b,
        None => return false,
    };
    if first != b'{' && first != b'[' {
        return false;
    }
    if buf.len() < SNIFF_LEN {
        // Whole file is in the buffer, so demand a full parse.
        serde_json::from_slice::<serde_json::Value>(buf).is_ok()
    } else {
        true
    }
}
