//! Resume text parsing: extraction, line classification and sectioning.

mod classifier;
mod extract;
mod options;
mod sections;

pub use classifier::{
    classify, clean_contact_line, has_contact_marker, looks_like_entry_heading, normalize_line,
    Classifier, CONTACT_LINE_LIMIT, JOB_TITLE_LINE_LIMIT,
};
pub use extract::{load_resume_bytes, load_resume_text, TextExtractor};
pub use options::{ErrorMode, ExtractOptions, PageSelection};
pub use sections::{split_sections, HEADER_SECTION, SECTION_NAMES};
