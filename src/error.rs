//! Error types for resumind library.

use std::io;
use thiserror::Error;

/// Result type alias for resumind operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, exporting or tailoring a resume.
///
/// Classification itself never fails; these cover the I/O around it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a PDF nor UTF-8 text.
    #[error("Unknown file format: not a PDF or plain-text resume")]
    UnknownFormat,

    /// The input format was recognised but cannot be read.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error while producing an output document (PDF, DOCX, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The AI chat collaborator failed.
    #[error("Chat backend error: {0}")]
    Backend(String),

    /// The key-value storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// An AI reply did not have the expected shape.
    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Render(format!("DOCX package: {}", err)),
        }
    }
}
