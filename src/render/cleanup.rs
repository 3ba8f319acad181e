//! Text cleanup applied before classification and before rendering.
//!
//! [`clean_resume_text`] normalises extracted text for the classifier.
//! [`pdf_safe_text`] and [`docx_safe_text`] adapt a line's display text to
//! what each output format can encode.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn page_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Page \d+ of \d+").unwrap())
}

fn excess_newlines_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").unwrap())
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalise raw resume text.
///
/// Converts CRLF to LF, removes `Page N of M` footers, collapses runs of
/// blank lines, trims every line and drops the blank ones.
pub fn clean_resume_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = raw.replace("\r\n", "\n");
    let text = page_marker_regex().replace_all(&text, "");
    let text = excess_newlines_regex().replace_all(&text, "\n\n");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// ASCII replacement for typographic punctuation, if any.
fn fold_punctuation(c: char) -> Option<&'static str> {
    let folded = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => "\"",
        '\u{2010}'..='\u{2015}' | '\u{2212}' => "-",
        '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{25E6}' | '\u{2023}' | '\u{2043}' => "-",
        '\u{2026}' => "...",
        '\u{00A0}' | '\u{2009}' | '\u{202F}' => " ",
        _ => return None,
    };
    Some(folded)
}

/// Adapt text to the standard Helvetica font used in PDF output.
///
/// Typographic quotes, dashes and bullets fold to ASCII, accented letters
/// lose their diacritics, and any remaining non-ASCII character is dropped.
pub fn pdf_safe_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(folded) = fold_punctuation(c) {
            out.push_str(folded);
        } else {
            out.extend(
                c.nfd()
                    .filter(|d| !is_combining_mark(*d))
                    .filter(char::is_ascii),
            );
        }
    }
    out
}

/// Adapt text for WordprocessingML output.
///
/// Typographic punctuation folds to ASCII and whitespace runs collapse to a
/// single space. Other Unicode is kept and re-composed to NFC.
pub fn docx_safe_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match fold_punctuation(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    whitespace_regex().replace_all(&out, " ").trim().to_string()
}

/// Remove characters that are not allowed in XML 1.0 documents.
pub(crate) fn strip_xml_invalid(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            matches!(
                c,
                '\t' | '\n'
                    | '\r'
                    | '\u{20}'..='\u{D7FF}'
                    | '\u{E000}'..='\u{FFFD}'
                    | '\u{10000}'..='\u{10FFFF}'
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_resume_text() {
        let raw = "  Jane Doe  \r\nEngineer\r\n\r\n\r\n\r\nPAGE 1 OF 2\nSkills\n";
        assert_eq!(clean_resume_text(raw), "Jane Doe\nEngineer\nSkills");
    }

    #[test]
    fn test_clean_resume_text_empty() {
        assert_eq!(clean_resume_text(""), "");
        assert_eq!(clean_resume_text("\n\n  \n"), "");
    }

    #[test]
    fn test_page_marker_inside_line() {
        assert_eq!(clean_resume_text("Footer Page 3 of 4 text"), "Footer  text");
    }

    #[test]
    fn test_pdf_safe_text() {
        assert_eq!(pdf_safe_text("“Led” team – 2020—2021"), "\"Led\" team - 2020-2021");
        assert_eq!(pdf_safe_text("• Café résumé"), "- Cafe resume");
        assert_eq!(pdf_safe_text("Rust 🦀 dev"), "Rust  dev");
        assert_eq!(pdf_safe_text("東京"), "");
    }

    #[test]
    fn test_docx_safe_text() {
        assert_eq!(docx_safe_text("  it’s   a\tdeal "), "it's a deal");
        assert_eq!(docx_safe_text("Café • München"), "Café - München");
    }

    #[test]
    fn test_strip_xml_invalid() {
        assert_eq!(strip_xml_invalid("a\u{0}b\u{1b}c\td"), "abc\td");
    }
}
