//! Built-in export renderers.

use crate::error::Result;
use crate::model::LayoutPlan;
use crate::render::{to_docx, to_pdf, RenderOptions, RenderedDocument};

use super::Renderer;

/// PDF renderer (standard Helvetica, A4 or Letter).
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    _private: (),
}

impl PdfRenderer {
    /// Create a new PDF renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Renderer for PdfRenderer {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extension(&self) -> &str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, plan: &LayoutPlan, options: &RenderOptions) -> Result<RenderedDocument> {
        to_pdf(plan, options)
    }
}

/// DOCX renderer (WordprocessingML package).
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    _private: (),
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Renderer for DocxRenderer {
    fn name(&self) -> &str {
        "docx"
    }

    fn extension(&self) -> &str {
        "docx"
    }

    fn mime_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn render(&self, plan: &LayoutPlan, options: &RenderOptions) -> Result<RenderedDocument> {
        to_docx(plan, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    #[test]
    fn test_renderer_identity() {
        let pdf = PdfRenderer::new();
        assert_eq!(pdf.name(), "pdf");
        assert_eq!(pdf.mime_type(), "application/pdf");

        let docx = DocxRenderer::new();
        assert_eq!(docx.extension(), "docx");
        assert!(docx.mime_type().contains("wordprocessingml"));
    }

    #[test]
    fn test_renderers_produce_their_containers() {
        let plan = classify("Jane Doe\nEngineer");
        let options = RenderOptions::default();
        assert!(PdfRenderer::new().render(&plan, &options).unwrap().bytes.starts_with(b"%PDF-"));
        assert!(DocxRenderer::new().render(&plan, &options).unwrap().bytes.starts_with(b"PK"));
    }
}
