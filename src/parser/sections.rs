//! Coarse section segmentation used by the tailoring pipeline.

use crate::model::ResumeSection;

/// Name of the section holding everything before the first header.
pub const HEADER_SECTION: &str = "Header";

/// Headers recognised by [`split_sections`], in match priority order.
pub const SECTION_NAMES: [&str; 12] = [
    "Professional Summary",
    "Summary",
    "Experience",
    "Work Experience",
    "Employment History",
    "Education",
    "Skills",
    "Technical Skills",
    "Projects",
    "Certifications",
    "Awards",
    "Languages",
];

/// Lines at least this long are never treated as headers.
const MAX_HEADER_LEN: usize = 50;

/// Split resume text into named sections.
///
/// A line shorter than 50 characters containing one of [`SECTION_NAMES`]
/// (case-insensitive) starts a new section named after the first matching
/// entry. The header line itself is not part of the content. Sections whose
/// content is blank are omitted.
pub fn split_sections(text: &str) -> Vec<ResumeSection> {
    let mut sections = Vec::new();
    let mut current = ResumeSection {
        name: HEADER_SECTION.to_string(),
        content: String::new(),
    };

    for line in text.lines() {
        match header_name(line) {
            Some(name) => {
                let finished = std::mem::replace(
                    &mut current,
                    ResumeSection {
                        name: name.to_string(),
                        content: String::new(),
                    },
                );
                push_non_blank(&mut sections, finished);
            }
            None => {
                current.content.push_str(line);
                current.content.push('\n');
            }
        }
    }
    push_non_blank(&mut sections, current);

    sections
}

fn header_name(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    if trimmed.chars().count() >= MAX_HEADER_LEN {
        return None;
    }
    let lower = trimmed.to_lowercase();
    SECTION_NAMES
        .iter()
        .copied()
        .find(|name| lower.contains(&name.to_lowercase()))
}

fn push_non_blank(sections: &mut Vec<ResumeSection>, section: ResumeSection) {
    if !section.content.trim().is_empty() {
        sections.push(section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let text = "Jane Doe\njane@x.com\nSUMMARY\nBackend engineer\nEXPERIENCE\nAcme | Dev\n- Built APIs";
        let sections = split_sections(text);

        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Header", "Summary", "Experience"]);
        assert_eq!(sections[0].content, "Jane Doe\njane@x.com\n");
        assert_eq!(sections[2].content, "Acme | Dev\n- Built APIs\n");
    }

    #[test]
    fn test_first_match_wins() {
        // "Professional Summary" is checked before "Summary".
        let sections = split_sections("PROFESSIONAL SUMMARY\nText");
        assert_eq!(sections[0].name, "Professional Summary");

        // "Experience" is checked before "Work Experience".
        let sections = split_sections("Work Experience\nText");
        assert_eq!(sections[0].name, "Experience");
    }

    #[test]
    fn test_long_lines_are_content() {
        let line = "Led a cross-functional team responsible for skills development";
        let sections = split_sections(line);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Header");
    }

    #[test]
    fn test_blank_sections_skipped() {
        let sections = split_sections("SKILLS\n\nEDUCATION\nMIT");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Education");
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sections("").is_empty());
    }
}
