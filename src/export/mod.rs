//! Export registry mapping output formats to renderers.
//!
//! Resume text is classified once into a [`LayoutPlan`] and handed to every
//! requested [`Renderer`], so all formats agree on the role of each line.
//!
//! # Example
//!
//! ```no_run
//! use resumind::export::ExportRegistry;
//! use resumind::render::RenderOptions;
//!
//! fn main() -> resumind::Result<()> {
//!     let registry = ExportRegistry::with_defaults();
//!     let text = resumind::load_resume_text("resume.pdf")?;
//!
//!     for result in registry.export_all(&text, &RenderOptions::default())? {
//!         std::fs::write(result.file_name(), &result.bytes)?;
//!     }
//!     Ok(())
//! }
//! ```

mod renderers;

pub use renderers::{DocxRenderer, PdfRenderer};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::LayoutPlan;
use crate::parser::Classifier;
use crate::render::{pdf_safe_text, LayoutStats, RenderOptions, RenderedDocument};

/// File name used when the resume has no usable first line.
pub const DEFAULT_FILE_NAME: &str = "Resume";

/// Maximum length of a suggested file name, in characters.
pub const MAX_FILE_NAME_LEN: usize = 30;

/// Trait for output document renderers.
///
/// Implement this trait to add a new export format.
pub trait Renderer: Send + Sync {
    /// Short format name (e.g. `pdf`).
    fn name(&self) -> &str;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Render a classified resume.
    fn render(&self, plan: &LayoutPlan, options: &RenderOptions) -> Result<RenderedDocument>;
}

/// One exported document.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Renderer name
    pub format: String,

    /// File extension without the leading dot
    pub extension: String,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// File name stem derived from the resume text
    pub base_name: String,

    /// Encoded document
    pub bytes: Vec<u8>,

    /// Layout statistics
    pub stats: LayoutStats,
}

impl ExportResult {
    /// Suggested file name including the extension.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    /// Write the document into a directory under its suggested file name.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, &self.bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Registry for export renderers.
pub struct ExportRegistry {
    renderers: HashMap<String, Arc<dyn Renderer>>,
    by_name: HashMap<String, Arc<dyn Renderer>>,
    classifier: Classifier,
}

impl ExportRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            by_name: HashMap::new(),
            classifier: Classifier::new(),
        }
    }

    /// Create a registry with the PDF and DOCX renderers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfRenderer::new()));
        registry.register(Arc::new(DocxRenderer::new()));
        registry
    }

    /// Register a renderer under its extension and name.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) {
        self.renderers
            .insert(renderer.extension().to_lowercase(), renderer.clone());
        self.by_name.insert(renderer.name().to_lowercase(), renderer);
    }

    /// Get a renderer by extension or name.
    pub fn get(&self, format: &str) -> Option<Arc<dyn Renderer>> {
        let key = format.trim_start_matches('.').to_lowercase();
        self.renderers
            .get(&key)
            .or_else(|| self.by_name.get(&key))
            .cloned()
    }

    /// Check if a format is supported.
    pub fn supports(&self, format: &str) -> bool {
        self.get(format).is_some()
    }

    /// Registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.renderers.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Classify resume text and render it in one format.
    pub fn export(&self, text: &str, format: &str, options: &RenderOptions) -> Result<ExportResult> {
        let renderer = self
            .get(format)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no renderer for {}", format)))?;
        let plan = self.classifier.classify(text);
        render_with(renderer.as_ref(), &plan, suggested_file_name(text), options)
    }

    /// Classify resume text once and render it with every registered renderer.
    ///
    /// Results are ordered by extension.
    pub fn export_all(&self, text: &str, options: &RenderOptions) -> Result<Vec<ExportResult>> {
        let plan = self.classifier.classify(text);
        let base_name = suggested_file_name(text);

        let mut renderers: Vec<Arc<dyn Renderer>> = self.renderers.values().cloned().collect();
        renderers.sort_by(|a, b| a.extension().cmp(b.extension()));

        renderers
            .par_iter()
            .map(|renderer| render_with(renderer.as_ref(), &plan, base_name.clone(), options))
            .collect()
    }
}

impl Default for ExportRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn render_with(
    renderer: &dyn Renderer,
    plan: &LayoutPlan,
    base_name: String,
    options: &RenderOptions,
) -> Result<ExportResult> {
    let rendered = renderer.render(plan, options)?;
    log::info!(
        "Exported {} as {} ({})",
        base_name,
        renderer.name(),
        rendered.stats
    );
    Ok(ExportResult {
        format: renderer.name().to_string(),
        extension: renderer.extension().to_string(),
        mime_type: renderer.mime_type(),
        base_name,
        bytes: rendered.bytes,
        stats: rendered.stats,
    })
}

fn unsafe_file_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[/\\:*?"<>|]"#).unwrap())
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Derive a download file name stem from resume text.
///
/// Uses the first non-blank line that is not a `Header` placeholder, folded
/// to ASCII with path-unsafe characters removed, whitespace runs replaced by
/// `_`, and truncated to 30 characters. Falls back to `Resume`.
pub fn suggested_file_name(text: &str) -> String {
    let Some(first) = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.eq_ignore_ascii_case("header"))
    else {
        return DEFAULT_FILE_NAME.to_string();
    };

    let cleaned = pdf_safe_text(first);
    let cleaned = unsafe_file_chars().replace_all(&cleaned, "");
    let cleaned = whitespace_run().replace_all(cleaned.trim(), "_");
    let name: String = cleaned.chars().take(MAX_FILE_NAME_LEN).collect();

    if name.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(suggested_file_name("Header\n\n  Jane Doe  \nEngineer"), "Jane_Doe");
        assert_eq!(suggested_file_name(""), "Resume");
        assert_eq!(suggested_file_name("header\n  \n"), "Resume");
        assert_eq!(suggested_file_name("**José  Núñez**"), "Jose_Nunez");
        assert_eq!(suggested_file_name("東京"), "Resume");
    }

    #[test]
    fn test_suggested_file_name_truncates() {
        let name = suggested_file_name("Alexandra Catherine Montgomery-Smithson III");
        assert_eq!(name.len(), 30);
        assert_eq!(name, "Alexandra_Catherine_Montgomery");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExportRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert!(registry.supports(".DOCX"));
        assert!(!registry.supports("odt"));
        assert_eq!(registry.supported_extensions(), vec!["docx", "pdf"]);
    }

    #[test]
    fn test_export_unknown_format() {
        let registry = ExportRegistry::with_defaults();
        let result = registry.export("Jane", "odt", &RenderOptions::default());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_export_all_shares_one_plan() {
        let registry = ExportRegistry::with_defaults();
        let text = "Jane Doe\nEngineer\njane@x.com\nEXPERIENCE\nAcme | Dev\n- Built APIs";
        let results = registry.export_all(text, &RenderOptions::default()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].file_name(), "Jane_Doe.docx");
        assert_eq!(results[1].file_name(), "Jane_Doe.pdf");
        assert_eq!(results[0].stats.line_count, results[1].stats.line_count);
        assert_eq!(results[1].mime_type, "application/pdf");
    }
}
