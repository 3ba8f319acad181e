//! Rendered output with layout statistics.

use serde::{Deserialize, Serialize};

use crate::model::{LayoutPlan, LineRole};

/// A rendered document and the statistics collected while producing it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Encoded document bytes
    pub bytes: Vec<u8>,

    /// Layout statistics
    pub stats: LayoutStats,
}

impl RenderedDocument {
    /// Create a rendered document.
    pub fn new(bytes: Vec<u8>, stats: LayoutStats) -> Self {
        Self { bytes, stats }
    }

    /// Size of the encoded document in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing was produced.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Statistics about a layout plan and its rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Pages produced (1 for flowing formats)
    pub page_count: u32,

    /// Total classified lines
    pub line_count: u32,

    /// Section headers
    pub section_count: u32,

    /// Experience entry headings
    pub entry_count: u32,

    /// Bullet lines
    pub bullet_count: u32,

    /// Body lines
    pub body_count: u32,

    /// Contact lines
    pub contact_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a plan. `page_count` starts at 1.
    pub fn from_plan(plan: &LayoutPlan) -> Self {
        let mut stats = Self {
            page_count: 1,
            ..Self::default()
        };

        for line in plan {
            stats.line_count += 1;
            match line.role {
                LineRole::SectionHeader => stats.section_count += 1,
                LineRole::ExperienceEntryHeading => stats.entry_count += 1,
                LineRole::Bullet => stats.bullet_count += 1,
                LineRole::Body => stats.body_count += 1,
                LineRole::ContactInfo => stats.contact_count += 1,
                LineRole::Name | LineRole::JobTitleHeading => {}
            }
            stats.word_count += line.text.split_whitespace().count() as u32;
            stats.char_count += line.text.chars().filter(|c| !c.is_whitespace()).count() as u32;
        }

        stats
    }

    /// Set the page count.
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.page_count = pages;
        self
    }
}

impl std::fmt::Display for LayoutStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages, {} lines ({} sections, {} entries, {} bullets), {} words",
            self.page_count,
            self.line_count,
            self.section_count,
            self.entry_count,
            self.bullet_count,
            self.word_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;

    #[test]
    fn test_stats_from_plan() {
        let plan = classify(
            "Jane Doe\nEngineer\njane@x.com\nSUMMARY\nBuilds systems\nEXPERIENCE\nAcme | Dev\n- Built APIs\nShipped",
        );
        let stats = LayoutStats::from_plan(&plan);

        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.line_count, 9);
        assert_eq!(stats.section_count, 2);
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.bullet_count, 1);
        assert_eq!(stats.contact_count, 1);
        assert_eq!(stats.body_count, 2);
        assert_eq!(stats.word_count, 14);
    }

    #[test]
    fn test_stats_display() {
        let stats = LayoutStats::new().with_pages(2);
        assert_eq!(
            stats.to_string(),
            "2 pages, 0 lines (0 sections, 0 entries, 0 bullets), 0 words"
        );
    }
}
