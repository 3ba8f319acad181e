//! Resume text extraction from uploaded documents.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use crate::render::clean_resume_text;

use super::options::{ErrorMode, ExtractOptions, PageSelection};

enum Source {
    Pdf(LopdfDocument),
    Text(String),
}

/// Text extractor for PDF and plain-text resumes.
pub struct TextExtractor {
    source: Source,
    options: ExtractOptions,
}

impl TextExtractor {
    /// Open a resume file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a resume file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Read a resume from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Read a resume from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        let source = match detect_format_from_bytes(data)? {
            InputFormat::Pdf { version } => {
                log::debug!("Loading PDF {} ({} bytes)", version, data.len());
                Source::Pdf(LopdfDocument::load_mem(data)?)
            }
            InputFormat::PlainText => {
                let text = std::str::from_utf8(data)
                    .map_err(|e| Error::TextExtract(e.to_string()))?;
                Source::Text(text.to_string())
            }
            format @ InputFormat::Zip => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} (export the resume as PDF or text first)",
                    format
                )))
            }
        };
        Ok(Self { source, options })
    }

    /// Read a resume from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Number of pages (1 for plain text).
    pub fn page_count(&self) -> u32 {
        match &self.source {
            Source::Pdf(doc) => doc.get_pages().len() as u32,
            Source::Text(_) => 1,
        }
    }

    /// Extract the resume text.
    ///
    /// PDF pages are joined with newlines in page order. Unless the options
    /// ask for raw output, the result is passed through [`clean_resume_text`].
    pub fn extract(&self) -> Result<String> {
        let text = match &self.source {
            Source::Pdf(doc) => self.extract_pdf(doc)?,
            Source::Text(text) => text.clone(),
        };

        if self.options.raw {
            Ok(text)
        } else {
            Ok(clean_resume_text(&text))
        }
    }

    fn extract_pdf(&self, doc: &LopdfDocument) -> Result<String> {
        let pages = doc.get_pages();
        let total = pages.len() as u32;

        if let Some(missing) = self.first_missing_page(total) {
            return Err(Error::PageOutOfRange(missing, total));
        }

        let mut text = String::new();
        for &page_num in pages.keys() {
            if !self.options.pages.includes(page_num) {
                continue;
            }
            match doc.extract_text(&[page_num]) {
                Ok(page_text) => {
                    text.push_str(&page_text);
                    if !page_text.ends_with('\n') {
                        text.push('\n');
                    }
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::TextExtract(format!("Page {}: {}", page_num, e)));
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                }
            }
        }

        log::debug!("Extracted {} characters from {} pages", text.len(), total);
        Ok(text)
    }

    fn first_missing_page(&self, total: u32) -> Option<u32> {
        match &self.options.pages {
            PageSelection::All => None,
            PageSelection::Range(range) => (*range.start() > total).then_some(*range.start()),
            PageSelection::Pages(pages) => pages.iter().copied().find(|&p| p > total),
        }
    }
}

/// Load and clean resume text from a PDF or text file.
pub fn load_resume_text<P: AsRef<Path>>(path: P) -> Result<String> {
    TextExtractor::open(path)?.extract()
}

/// Load and clean resume text from PDF or UTF-8 bytes.
pub fn load_resume_bytes(data: &[u8]) -> Result<String> {
    TextExtractor::from_bytes(data)?.extract()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_cleaned() {
        let text = load_resume_bytes(b"Jane Doe\r\n\r\n\r\n\r\nPage 1 of 2\r\n  Engineer  ").unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[test]
    fn test_raw_keeps_text() {
        let extractor =
            TextExtractor::from_bytes_with_options(b"Jane\n\n\nDoe", ExtractOptions::new().raw())
                .unwrap();
        assert_eq!(extractor.extract().unwrap(), "Jane\n\n\nDoe");
        assert_eq!(extractor.page_count(), 1);
    }

    #[test]
    fn test_zip_is_unsupported() {
        let result = TextExtractor::from_bytes(b"PK\x03\x04rest");
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_pdf_fails() {
        let result = TextExtractor::from_bytes(b"%PDF-1.7\nnot really a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_page_out_of_range_on_text_is_ignored() {
        let options = ExtractOptions::new().with_pages(PageSelection::Pages(vec![4]));
        let extractor = TextExtractor::from_bytes_with_options(b"Jane", options).unwrap();
        assert_eq!(extractor.extract().unwrap(), "Jane");
    }
}
