//! Rendering of layout plans to PDF, DOCX, text and JSON.

mod cleanup;
mod docx;
mod json;
mod metrics;
mod options;
mod pdf;
mod result;
mod text;

pub use cleanup::{clean_resume_text, docx_safe_text, pdf_safe_text};
pub use docx::to_docx;
pub use json::{to_json, JsonFormat};
pub use metrics::{Font, PT_PER_MM};
pub use options::{PageSize, RenderOptions};
pub use pdf::to_pdf;
pub use result::{LayoutStats, RenderedDocument};
pub use text::to_text;
