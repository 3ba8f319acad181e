//! Heuristic resume-line classifier.
//!
//! Every non-blank line is normalised and then tested against an ordered
//! rule list; the first matching rule decides the line's [`LineRole`]:
//!
//! 1. normalisation (drop separators, `Header` placeholders, markdown `*`)
//! 2. name (first surviving line)
//! 3. section header (catalog match, optional inline content after `:`)
//! 4. job-title heading (early line without contact markers)
//! 5. contact info (early line with `@`, `|` or a phone number)
//! 6. experience entry heading (inside an experience-type section)
//! 7. bullet
//! 8. body
//!
//! The classifier is a pure fold over the lines; it never fails.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{ClassifiedLine, LayoutPlan, LineRole, SectionHeaderCatalog};

/// Lines at positions below this may be a job-title heading.
pub const JOB_TITLE_LINE_LIMIT: usize = 3;

/// Lines at positions below this may be contact info.
pub const CONTACT_LINE_LIMIT: usize = 5;

/// Standalone lines used as visual separators by some AI replies.
const SEPARATOR_LINES: [&str; 3] = ["• --", "--", "•"];

/// Placeholder line some prompts emit above the name.
const HEADER_PLACEHOLDER: &str = "header";

struct Patterns {
    phone: Regex,
    entry_heading: Regex,
    year_range: Regex,
    markdown_bullet: Regex,
    bullet_marker: Regex,
    portfolio_after_pipe: Regex,
    portfolio_before_pipe: Regex,
    portfolio: Regex,
    double_pipe: Regex,
    trailing_pipe: Regex,
    leading_pipe: Regex,
    spaces: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        phone: Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap(),
        entry_heading: Regex::new(r"^[A-Z][a-zA-Z\s,&-]+(\|\s*|@\s*|-\s*|at)[A-Z]").unwrap(),
        year_range: Regex::new(r"^\d{4}\s*-\s*(Present|\d{4})").unwrap(),
        markdown_bullet: Regex::new(r"^\*\s+(\S)").unwrap(),
        bullet_marker: Regex::new(r"^[-•*]\s*").unwrap(),
        portfolio_after_pipe: Regex::new(r"(?i)\|\s*\bPortfolio\b\s*").unwrap(),
        portfolio_before_pipe: Regex::new(r"(?i)\bPortfolio\b\s*\|").unwrap(),
        portfolio: Regex::new(r"(?i)\s*\bPortfolio\b\s*").unwrap(),
        double_pipe: Regex::new(r"\|\s*\|").unwrap(),
        trailing_pipe: Regex::new(r"\|\s*$").unwrap(),
        leading_pipe: Regex::new(r"^\s*\|").unwrap(),
        spaces: Regex::new(r"[ \t]{2,}").unwrap(),
    })
}

/// Classify resume text into a [`LayoutPlan`].
///
/// Empty input yields an empty plan. Every non-blank line yields at most
/// one line in the plan, except an inline section header such as
/// `SKILLS: Rust, Go`, which yields a header line and a body line.
pub fn classify(text: &str) -> LayoutPlan {
    let state = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .fold(ClassifierState::default(), |state, (index, line)| {
            state.push(index, line)
        });

    LayoutPlan {
        lines: state.lines,
    }
}

/// Strip formatting artifacts from a trimmed line.
///
/// Returns `None` when the line should be dropped: separator lines, the
/// `Header` placeholder, or lines that are empty once markers are removed.
pub fn normalize_line(line: &str) -> Option<String> {
    let line = line.trim();
    if SEPARATOR_LINES.contains(&line) {
        return None;
    }

    let line = line.strip_prefix("• ").map(str::trim).unwrap_or(line);

    // A leading "* " is a markdown list marker, not emphasis.
    let line = patterns().markdown_bullet.replace(line, "- $1");
    let normalized = line.replace('*', "");
    let normalized = normalized.trim();

    if normalized.is_empty() || normalized.eq_ignore_ascii_case(HEADER_PLACEHOLDER) {
        return None;
    }
    Some(normalized.to_string())
}

/// Check for the contact markers used by rules 4 and 5.
pub fn has_contact_marker(line: &str) -> bool {
    line.contains('@') || line.contains('|') || patterns().phone.is_match(line)
}

/// Check whether a line reads like a job title / company line or a year range.
pub fn looks_like_entry_heading(line: &str) -> bool {
    let p = patterns();
    p.entry_heading.is_match(line) || p.year_range.is_match(line)
}

/// Remove `Portfolio` link labels and tidy the `|` separators left behind.
pub fn clean_contact_line(line: &str) -> String {
    let p = patterns();
    let line = p.portfolio_after_pipe.replace_all(line, "");
    let line = p.portfolio_before_pipe.replace_all(&line, "");
    let line = p.portfolio.replace_all(&line, " ");
    let line = p.double_pipe.replace_all(&line, "|");
    let line = p.trailing_pipe.replace_all(&line, "");
    let line = p.leading_pipe.replace_all(&line, "");
    p.spaces.replace_all(line.trim(), " ").into_owned()
}

fn strip_bullet_marker(line: &str) -> String {
    patterns().bullet_marker.replace(line, "").into_owned()
}

/// Accumulator threaded through the fold.
#[derive(Default)]
struct ClassifierState {
    section_context: String,
    name_seen: bool,
    lines: Vec<ClassifiedLine>,
}

impl ClassifierState {
    fn push(mut self, position_index: usize, raw: &str) -> Self {
        let Some(normalized) = normalize_line(raw) else {
            return self;
        };

        if !self.name_seen {
            self.name_seen = true;
            self.emit(raw, &normalized, normalized.clone(), LineRole::Name, position_index);
            return self;
        }

        if let Some(header) = SectionHeaderCatalog.lookup(&normalized) {
            self.section_context = header.entry.to_string();
            let title = header.title.to_string();
            let trailing = header.trailing.map(str::to_string);
            self.emit(raw, &normalized, title, LineRole::SectionHeader, position_index);
            if let Some(trailing) = trailing {
                self.emit(raw, &trailing, trailing.clone(), LineRole::Body, position_index);
            }
            return self;
        }

        let contact_marker = has_contact_marker(&normalized);

        if position_index < JOB_TITLE_LINE_LIMIT && !contact_marker {
            self.emit(raw, &normalized, normalized.clone(), LineRole::JobTitleHeading, position_index);
            return self;
        }

        if position_index < CONTACT_LINE_LIMIT && contact_marker {
            let text = clean_contact_line(&normalized);
            self.emit(raw, &normalized, text, LineRole::ContactInfo, position_index);
            return self;
        }

        if SectionHeaderCatalog::is_experience_context(&self.section_context)
            && looks_like_entry_heading(&normalized)
        {
            self.emit(
                raw,
                &normalized,
                normalized.clone(),
                LineRole::ExperienceEntryHeading,
                position_index,
            );
            return self;
        }

        if normalized.starts_with(['-', '•', '*']) {
            let text = strip_bullet_marker(&normalized);
            // A bare marker carries no text.
            if text.is_empty() {
                return self;
            }
            self.emit(raw, &normalized, text, LineRole::Bullet, position_index);
            return self;
        }

        self.emit(raw, &normalized, normalized.clone(), LineRole::Body, position_index);
        self
    }

    fn emit(
        &mut self,
        raw: &str,
        normalized: &str,
        text: String,
        role: LineRole,
        position_index: usize,
    ) {
        self.lines.push(ClassifiedLine {
            raw_text: raw.to_string(),
            normalized_text: normalized.to_string(),
            text,
            role,
            section_context: self.section_context.clone(),
            position_index,
        });
    }
}

/// Reusable classifier handle that logs a per-role summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    /// Create a classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify resume text.
    pub fn classify(&self, text: &str) -> LayoutPlan {
        let plan = classify(text);
        log::debug!(
            "Classified {} lines ({} headers, {} entries, {} bullets)",
            plan.len(),
            plan.count(LineRole::SectionHeader),
            plan.count(LineRole::ExperienceEntryHeading),
            plan.count(LineRole::Bullet)
        );
        if plan.count(LineRole::SectionHeader) == 0 && plan.len() > 1 {
            log::debug!("No section headers recognised; lines fall back to body text");
        }
        plan
    }
}
