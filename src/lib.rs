//! # resumind
//!
//! Resume text classification and document export for Rust.
//!
//! This library reads a resume (PDF or plain text), assigns every line a
//! structural role (name, job title, contact, section header, entry,
//! bullet, body) and renders the result as an ATS-friendly PDF or DOCX.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resumind::{classify, export_pdf, RenderOptions};
//!
//! fn main() -> resumind::Result<()> {
//!     let text = resumind::load_resume_text("resume.pdf")?;
//!
//!     let plan = classify(&text);
//!     println!("{} lines", plan.len());
//!
//!     let pdf = export_pdf(&text, &RenderOptions::default())?;
//!     std::fs::write("resume-clean.pdf", &pdf.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line classification**: deterministic, rule-based roles for every line
//! - **PDF and DOCX export**: one layout plan shared by both renderers
//! - **Text extraction**: PDF and UTF-8 text inputs with page selection
//! - **AI helpers**: prompt building, reply parsing and tailoring pipelines
//!   over a caller-supplied chat backend

pub mod agent;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, InputFormat};
pub use error::{Error, Result};
pub use export::{suggested_file_name, ExportRegistry, ExportResult, Renderer};
pub use model::{
    Alignment, ClassifiedLine, LayoutPlan, LineRole, LineStyle, SectionHeaderCatalog,
};
pub use parser::{
    classify, load_resume_bytes, load_resume_text, split_sections, ErrorMode, ExtractOptions,
    PageSelection, TextExtractor,
};
pub use render::{JsonFormat, LayoutStats, PageSize, RenderOptions, RenderedDocument};

use std::path::Path;

/// Classify resume text and render it as a PDF.
///
/// # Example
///
/// ```
/// use resumind::{export_pdf, RenderOptions};
///
/// let pdf = export_pdf("Jane Doe\nEngineer", &RenderOptions::default()).unwrap();
/// assert!(pdf.bytes.starts_with(b"%PDF-"));
/// ```
pub fn export_pdf(text: &str, options: &RenderOptions) -> Result<RenderedDocument> {
    render::to_pdf(&classify(text), options)
}

/// Classify resume text and render it as a DOCX package.
///
/// # Example
///
/// ```
/// use resumind::{export_docx, RenderOptions};
///
/// let docx = export_docx("Jane Doe\nEngineer", &RenderOptions::default()).unwrap();
/// assert!(docx.bytes.starts_with(b"PK"));
/// ```
pub fn export_docx(text: &str, options: &RenderOptions) -> Result<RenderedDocument> {
    render::to_docx(&classify(text), options)
}

/// Load a resume file and return its layout plan as JSON.
///
/// # Example
///
/// ```no_run
/// use resumind::{to_json, JsonFormat};
///
/// let json = to_json("resume.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("resume.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let text = load_resume_text(path)?;
    render::to_json(&classify(&text), format)
}

/// Builder for loading and exporting resumes.
///
/// # Example
///
/// ```no_run
/// use resumind::{PageSize, Resumind};
///
/// let pdf = Resumind::new()
///     .lenient()
///     .with_page_size(PageSize::Letter)
///     .load("resume.pdf")?
///     .to_pdf()?;
/// # Ok::<(), resumind::Error>(())
/// ```
pub struct Resumind {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Resumind {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Skip unreadable PDF pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Keep extracted text exactly as the PDF reports it.
    pub fn raw(mut self) -> Self {
        self.extract_options = self.extract_options.raw();
        self
    }

    /// Only read the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Set the paper size of exported PDFs.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(size);
        self
    }

    /// Set the title written to document metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Load and classify a resume file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<ResumeDocument> {
        let extractor = TextExtractor::open_with_options(path, self.extract_options)?;
        Ok(ResumeDocument::new(extractor.extract()?, self.render_options))
    }

    /// Load and classify a resume held in memory.
    pub fn load_bytes(self, data: &[u8]) -> Result<ResumeDocument> {
        let extractor = TextExtractor::from_bytes_with_options(data, self.extract_options)?;
        Ok(ResumeDocument::new(extractor.extract()?, self.render_options))
    }

    /// Classify resume text directly.
    pub fn from_text(self, text: impl Into<String>) -> ResumeDocument {
        ResumeDocument::new(text.into(), self.render_options)
    }
}

impl Default for Resumind {
    fn default() -> Self {
        Self::new()
    }
}

/// A classified resume ready for export.
pub struct ResumeDocument {
    /// Resume text the plan was built from
    pub text: String,
    /// Classified lines
    pub plan: LayoutPlan,
    render_options: RenderOptions,
}

impl ResumeDocument {
    fn new(text: String, render_options: RenderOptions) -> Self {
        let plan = classify(&text);
        Self {
            text,
            plan,
            render_options,
        }
    }

    /// Render as PDF.
    pub fn to_pdf(&self) -> Result<RenderedDocument> {
        render::to_pdf(&self.plan, &self.render_options)
    }

    /// Render as DOCX.
    pub fn to_docx(&self) -> Result<RenderedDocument> {
        render::to_docx(&self.plan, &self.render_options)
    }

    /// Serialize the layout plan.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.plan, format)
    }

    /// Role-annotated plain text listing.
    pub fn to_text(&self) -> String {
        render::to_text(&self.plan)
    }

    /// Statistics about the layout plan.
    pub fn stats(&self) -> LayoutStats {
        LayoutStats::from_plan(&self.plan)
    }

    /// File name suggested by the resume's first line, without extension.
    pub fn suggested_file_name(&self) -> String {
        suggested_file_name(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\nSoftware Engineer\njane@example.com | 555-0100\n\
        EXPERIENCE\nAcme Corp | Senior Developer\n- Built payment APIs\nSKILLS\nRust, SQL";

    #[test]
    fn test_resumind_builder() {
        let builder = Resumind::new().lenient().raw().with_title("Jane");

        assert!(matches!(builder.extract_options.error_mode, ErrorMode::Lenient));
        assert!(builder.extract_options.raw);
        assert_eq!(builder.render_options.title.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_resumind_builder_default() {
        let builder = Resumind::default();
        assert_eq!(builder.render_options.page_size, PageSize::A4);
        assert!(matches!(builder.extract_options.error_mode, ErrorMode::Strict));
    }

    #[test]
    fn test_from_text_classifies() {
        let doc = Resumind::new().from_text(RESUME);
        assert_eq!(doc.plan.lines[0].role, LineRole::Name);
        assert_eq!(doc.stats().section_count, 2);
        assert_eq!(doc.suggested_file_name(), "Jane_Doe");
    }

    #[test]
    fn test_load_bytes_plain_text() {
        let doc = Resumind::new().load_bytes(RESUME.as_bytes()).unwrap();
        assert!(doc.to_text().contains("Acme Corp"));
        assert!(doc.to_json(JsonFormat::Compact).unwrap().starts_with('{'));
    }

    #[test]
    fn test_load_bytes_rejects_binary() {
        let result = Resumind::new().load_bytes(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_export_helpers() {
        let options = RenderOptions::default();
        let pdf = export_pdf(RESUME, &options).unwrap();
        assert!(pdf.bytes.starts_with(b"%PDF-"));
        assert_eq!(pdf.stats.page_count, 1);

        let docx = export_docx(RESUME, &options).unwrap();
        assert!(docx.bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_detect_format_empty_data() {
        let result = detect_format_from_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(detect::is_pdf_bytes(b"%PDF-1.4\ntest"));
        assert!(!detect::is_pdf_bytes(b"Not a PDF file"));
        assert!(!detect::is_pdf_bytes(b""));
    }
}
