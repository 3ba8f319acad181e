//! Input format detection for uploaded resumes.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// ZIP local file header, used by DOCX packages
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Bytes read from a file when sniffing its format.
const SNIFF_LEN: usize = 1024;

/// Format of a resume input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// PDF document with its header version (e.g. "1.7")
    Pdf { version: String },
    /// ZIP container (DOCX or similar); not readable as resume input
    Zip,
    /// UTF-8 plain text or markdown
    PlainText,
}

impl InputFormat {
    /// Whether text can be extracted from this format.
    pub fn is_supported(&self) -> bool {
        !matches!(self, InputFormat::Zip)
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Pdf { version } => write!(f, "PDF {}", version),
            InputFormat::Zip => f.write_str("ZIP"),
            InputFormat::PlainText => f.write_str("plain text"),
        }
    }
}

/// Detect the input format of a file.
///
/// Only the first kilobyte is inspected.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    detect_sniffed(&header)
}

/// Detect the input format of an in-memory document.
///
/// # Returns
/// * `Ok(InputFormat)` for PDF, ZIP or UTF-8 text
/// * `Err(Error::UnknownFormat)` for empty or other binary data
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if let Some(format) = detect_magic(data) {
        return Ok(format);
    }
    if !data.is_empty() && std::str::from_utf8(data).is_ok() {
        return Ok(InputFormat::PlainText);
    }
    Err(Error::UnknownFormat)
}

/// Like [`detect_format_from_bytes`], but tolerates a UTF-8 sequence cut
/// off at the end of a truncated read.
fn detect_sniffed(header: &[u8]) -> Result<InputFormat> {
    if let Some(format) = detect_magic(header) {
        return Ok(format);
    }
    match std::str::from_utf8(header) {
        Ok(_) if !header.is_empty() => Ok(InputFormat::PlainText),
        Err(e) if e.error_len().is_none() && header.len() == SNIFF_LEN => {
            Ok(InputFormat::PlainText)
        }
        _ => Err(Error::UnknownFormat),
    }
}

fn detect_magic(data: &[u8]) -> Option<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        let version = data[PDF_MAGIC.len()..]
            .iter()
            .take(3)
            .map(|&b| b as char)
            .collect::<String>();
        let version = if is_valid_version(&version) {
            version
        } else {
            log::warn!("PDF header has no readable version");
            String::from("unknown")
        };
        return Some(InputFormat::Pdf { version });
    }
    if data.starts_with(ZIP_MAGIC) {
        return Some(InputFormat::Zip);
    }
    None
}

/// Check if a version string looks like "1.7".
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if a file is a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(InputFormat::Pdf { .. }))
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}
