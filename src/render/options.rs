//! Rendering options and configuration.

use std::str::FromStr;

/// Paper size for PDF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// ISO A4, 210 x 297 mm
    #[default]
    A4,
    /// US Letter, 8.5 x 11 in
    Letter,
}

impl PageSize {
    /// Width and height in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" | "us-letter" => Ok(PageSize::Letter),
            other => Err(format!("Unknown page size: {}", other)),
        }
    }
}

/// Options for rendering a layout plan to a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Paper size
    pub page_size: PageSize,

    /// Left, right and top margin in millimetres
    pub margin_mm: f32,

    /// Vertical advance per wrapped line in millimetres
    pub line_height_mm: f32,

    /// A new page starts once the cursor passes `page height - bottom_limit_mm`
    pub bottom_limit_mm: f32,

    /// Compress PDF content streams
    pub compress: bool,

    /// Document title written to the output metadata
    pub title: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, mm: f32) -> Self {
        self.margin_mm = mm.max(0.0);
        self
    }

    /// Set the line height.
    pub fn with_line_height(mut self, mm: f32) -> Self {
        self.line_height_mm = mm.max(1.0);
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Usable text width between the side margins.
    pub fn text_width_mm(&self) -> f32 {
        let (width, _) = self.page_size.dimensions_mm();
        (width - 2.0 * self.margin_mm).max(1.0)
    }

    /// Cursor position past which a page break occurs.
    pub fn page_break_y_mm(&self) -> f32 {
        let (_, height) = self.page_size.dimensions_mm();
        height - self.bottom_limit_mm
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_mm: 20.0,
            line_height_mm: 6.0,
            bottom_limit_mm: 30.0,
            compress: true,
            title: None,
        }
    }
}
