//! Fixed vocabulary of recognised resume section titles.

/// Known section headers, matched case-insensitively.
pub const SECTION_HEADERS: [&str; 25] = [
    "PROFESSIONAL SUMMARY",
    "SUMMARY",
    "PROFILE",
    "OBJECTIVE",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "EMPLOYMENT HISTORY",
    "PROFESSIONAL EXPERIENCE",
    "EDUCATION",
    "ACADEMIC BACKGROUND",
    "SKILLS",
    "TECHNICAL SKILLS",
    "CORE COMPETENCIES",
    "KEY SKILLS",
    "PROJECTS",
    "KEY PROJECTS",
    "CERTIFICATIONS",
    "CERTIFICATES",
    "LICENSES",
    "AWARDS",
    "HONORS",
    "ACHIEVEMENTS",
    "LANGUAGES",
    "PUBLICATIONS",
    "VOLUNTEER WORK",
];

/// Keywords that mark a section as holding work history.
const EXPERIENCE_KEYWORDS: [&str; 3] = ["EXPERIENCE", "EMPLOYMENT", "WORK"];

/// A section header found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Catalog entry that matched
    pub entry: &'static str,

    /// Header text as written (before any colon)
    pub title: &'a str,

    /// Trimmed text after the first colon, if non-empty
    pub trailing: Option<&'a str>,
}

/// Lookup over [`SECTION_HEADERS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionHeaderCatalog;

impl SectionHeaderCatalog {
    /// Catalog entries in declaration order.
    pub fn entries(&self) -> &'static [&'static str] {
        &SECTION_HEADERS
    }

    /// Match a line against the catalog.
    ///
    /// A line matches when its upper-cased form equals an entry or starts
    /// with the entry immediately followed by `:`.
    pub fn lookup<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        let upper = line.to_uppercase();
        let entry = SECTION_HEADERS.iter().copied().find(|header| {
            upper == *header
                || upper
                    .strip_prefix(header)
                    .is_some_and(|rest| rest.starts_with(':'))
        })?;

        let (title, trailing) = match line.split_once(':') {
            Some((head, rest)) => {
                let rest = rest.trim();
                (head.trim(), (!rest.is_empty()).then_some(rest))
            }
            None => (line.trim(), None),
        };

        Some(HeaderMatch {
            entry,
            title,
            trailing,
        })
    }

    /// Check whether a line is a section header.
    pub fn is_header(&self, line: &str) -> bool {
        self.lookup(line).is_some()
    }

    /// Whether a section context names an experience-type section.
    pub fn is_experience_context(context: &str) -> bool {
        EXPERIENCE_KEYWORDS.iter().any(|k| context.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let catalog = SectionHeaderCatalog;
        let m = catalog.lookup("Work Experience").unwrap();
        assert_eq!(m.entry, "WORK EXPERIENCE");
        assert_eq!(m.title, "Work Experience");
        assert_eq!(m.trailing, None);
    }

    #[test]
    fn test_colon_prefix_match() {
        let catalog = SectionHeaderCatalog;
        let m = catalog.lookup("SKILLS: React, Node").unwrap();
        assert_eq!(m.entry, "SKILLS");
        assert_eq!(m.title, "SKILLS");
        assert_eq!(m.trailing, Some("React, Node"));

        let m = catalog.lookup("Certifications:").unwrap();
        assert_eq!(m.entry, "CERTIFICATIONS");
        assert_eq!(m.trailing, None);
    }

    #[test]
    fn test_trailing_keeps_later_colons() {
        let m = SectionHeaderCatalog
            .lookup("PROJECTS: Site: built in Rust")
            .unwrap();
        assert_eq!(m.trailing, Some("Site: built in Rust"));
    }

    #[test]
    fn test_non_headers() {
        let catalog = SectionHeaderCatalog;
        assert!(!catalog.is_header("Skills and interests"));
        assert!(!catalog.is_header("EXPERIENCED engineer"));
        assert!(!catalog.is_header("Led the summary effort"));
    }

    #[test]
    fn test_experience_context() {
        assert!(SectionHeaderCatalog::is_experience_context("WORK EXPERIENCE"));
        assert!(SectionHeaderCatalog::is_experience_context("EMPLOYMENT HISTORY"));
        assert!(SectionHeaderCatalog::is_experience_context("VOLUNTEER WORK"));
        assert!(!SectionHeaderCatalog::is_experience_context("SKILLS"));
        assert!(!SectionHeaderCatalog::is_experience_context(""));
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(SectionHeaderCatalog.entries().len(), 25);
    }
}
