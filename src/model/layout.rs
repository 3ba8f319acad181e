//! Layout plan types shared by every renderer.

use serde::{Deserialize, Serialize};

/// Semantic role of one resume line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    /// Candidate name (first surviving line)
    Name,
    /// Headline / desired position under the name
    JobTitleHeading,
    /// Email, phone and link line(s) near the top
    ContactInfo,
    /// A recognised section title such as `EXPERIENCE`
    SectionHeader,
    /// A job title / company / date line inside an experience section
    ExperienceEntryHeading,
    /// A list item
    Bullet,
    /// Anything else
    Body,
}

impl LineRole {
    /// All roles, in rule order.
    pub const ALL: [LineRole; 7] = [
        LineRole::Name,
        LineRole::JobTitleHeading,
        LineRole::ContactInfo,
        LineRole::SectionHeader,
        LineRole::ExperienceEntryHeading,
        LineRole::Bullet,
        LineRole::Body,
    ];

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LineRole::Name => "name",
            LineRole::JobTitleHeading => "job-title",
            LineRole::ContactInfo => "contact",
            LineRole::SectionHeader => "section",
            LineRole::ExperienceEntryHeading => "entry",
            LineRole::Bullet => "bullet",
            LineRole::Body => "body",
        }
    }

    /// Visual attributes implied by this role.
    pub fn style(&self) -> LineStyle {
        match self {
            LineRole::Name => LineStyle {
                font_size: 18.0,
                bold: true,
                alignment: Alignment::Center,
                gray: 0,
                space_after_mm: 10.0,
                ..LineStyle::body()
            },
            LineRole::JobTitleHeading => LineStyle {
                font_size: 12.0,
                bold: true,
                alignment: Alignment::Center,
                gray: 60,
                space_after_mm: 8.0,
                ..LineStyle::body()
            },
            LineRole::ContactInfo => LineStyle {
                alignment: Alignment::Center,
                gray: 60,
                ..LineStyle::body()
            },
            LineRole::SectionHeader => LineStyle {
                font_size: 13.0,
                bold: true,
                space_before_mm: 5.0,
                space_after_mm: 8.0,
                divider: true,
                ..LineStyle::body()
            },
            LineRole::ExperienceEntryHeading => LineStyle {
                font_size: 11.0,
                bold: true,
                ..LineStyle::body()
            },
            LineRole::Bullet => LineStyle {
                indent_mm: 12.0,
                bullet: true,
                ..LineStyle::body()
            },
            LineRole::Body => LineStyle::body(),
        }
    }
}

impl std::fmt::Display for LineRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Horizontal alignment of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left-aligned (default)
    #[default]
    Left,
    /// Centered on the page
    Center,
}

/// Renderer-agnostic style hints for a role.
///
/// Distances are in millimetres, font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Font size in points
    pub font_size: f32,

    /// Bold weight
    pub bold: bool,

    /// Horizontal alignment
    pub alignment: Alignment,

    /// Text gray level (0 = black, 255 = white)
    pub gray: u8,

    /// Left indent of the text from the margin
    pub indent_mm: f32,

    /// Extra space before the first line
    pub space_before_mm: f32,

    /// Advance after a single-line block; 0 means "use the line height"
    pub space_after_mm: f32,

    /// Draw a bullet glyph before the first wrapped line
    pub bullet: bool,

    /// Draw a divider rule above (skipped for the first section)
    pub divider: bool,
}

impl LineStyle {
    /// Regular body text: 10pt, normal weight, left aligned.
    pub fn body() -> Self {
        Self {
            font_size: 10.0,
            bold: false,
            alignment: Alignment::Left,
            gray: 0,
            indent_mm: 0.0,
            space_before_mm: 0.0,
            space_after_mm: 0.0,
            bullet: false,
            divider: false,
        }
    }

    /// Whether wrapped lines should be centered.
    pub fn is_centered(&self) -> bool {
        self.alignment == Alignment::Center
    }
}

/// One classified resume line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Original line content (trimmed)
    pub raw_text: String,

    /// Line after stripping markdown markers and bullet artifacts
    pub normalized_text: String,

    /// Text a renderer should print for this line
    pub text: String,

    /// Inferred role
    pub role: LineRole,

    /// Most recently seen section header, empty before the first one
    pub section_context: String,

    /// Zero-based index among the non-blank input lines
    pub position_index: usize,
}

impl ClassifiedLine {
    /// Style hints for this line's role.
    pub fn style(&self) -> LineStyle {
        self.role.style()
    }

    /// Check the line's role.
    pub fn is(&self, role: LineRole) -> bool {
        self.role == role
    }
}

/// Ordered, role-tagged resume lines ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    /// Classified lines in document order
    pub lines: Vec<ClassifiedLine>,
}

impl LayoutPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classified lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the plan has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedLine> {
        self.lines.iter()
    }

    /// The candidate name, if the plan has one.
    pub fn name(&self) -> Option<&str> {
        self.lines
            .first()
            .filter(|l| l.role == LineRole::Name)
            .map(|l| l.text.as_str())
    }

    /// Roles in order.
    pub fn roles(&self) -> Vec<LineRole> {
        self.lines.iter().map(|l| l.role).collect()
    }

    /// Display text of every section header, in order.
    pub fn section_headers(&self) -> Vec<&str> {
        self.lines_with_role(LineRole::SectionHeader)
            .map(|l| l.text.as_str())
            .collect()
    }

    /// Lines carrying the given role.
    pub fn lines_with_role(&self, role: LineRole) -> impl Iterator<Item = &ClassifiedLine> {
        self.lines.iter().filter(move |l| l.role == role)
    }

    /// Count lines carrying the given role.
    pub fn count(&self, role: LineRole) -> usize {
        self.lines_with_role(role).count()
    }

    /// Display text of every line joined by newlines.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a LayoutPlan {
    type Item = &'a ClassifiedLine;
    type IntoIter = std::slice::Iter<'a, ClassifiedLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
