//! ATS feedback returned by the resume analysis prompt.

use serde::{Deserialize, Serialize};

/// Whether a tip praises or criticises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Good,
    Improve,
}

/// One feedback tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    #[serde(rename = "type")]
    pub kind: TipKind,
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A scored feedback category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub tips: Vec<Tip>,
}

impl Category {
    /// Tips that ask for an improvement.
    pub fn improvements(&self) -> impl Iterator<Item = &Tip> {
        self.tips.iter().filter(|t| t.kind == TipKind::Improve)
    }
}

/// Full resume feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default)]
    pub overall_score: u32,
    #[serde(rename = "ATS", default)]
    pub ats: Category,
    #[serde(default)]
    pub tone_and_style: Category,
    #[serde(default)]
    pub content: Category,
    #[serde(default)]
    pub structure: Category,
    #[serde(default)]
    pub skills: Category,
}

impl Feedback {
    /// Categories with their display names.
    pub fn categories(&self) -> [(&'static str, &Category); 5] {
        [
            ("ATS", &self.ats),
            ("Tone & Style", &self.tone_and_style),
            ("Content", &self.content),
            ("Structure", &self.structure),
            ("Skills", &self.skills),
        ]
    }

    /// Number of improvement tips across all categories.
    pub fn improvement_count(&self) -> usize {
        self.categories()
            .iter()
            .map(|(_, c)| c.improvements().count())
            .sum()
    }
}
