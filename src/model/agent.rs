//! Types exchanged with the AI chat collaborator.

use serde::{Deserialize, Serialize};

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// A chat model offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentModel {
    /// Identifier passed to the chat service
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Vendor
    pub provider: &'static str,
}

/// Models known to work with the tailoring prompts.
pub const AVAILABLE_MODELS: [AgentModel; 5] = [
    AgentModel {
        id: "claude-3-7-sonnet-latest",
        name: "Claude 3.7 Sonnet",
        provider: "Anthropic",
    },
    AgentModel {
        id: "gpt-4o",
        name: "GPT-4o",
        provider: "OpenAI",
    },
    AgentModel {
        id: "gpt-4o-mini",
        name: "GPT-4o Mini",
        provider: "OpenAI",
    },
    AgentModel {
        id: "gemini-2.0-flash",
        name: "Gemini 2.0 Flash",
        provider: "Google",
    },
    AgentModel {
        id: "mistral-large-latest",
        name: "Mistral Large",
        provider: "Mistral",
    },
];

/// Find a model by id.
pub fn find_model(id: &str) -> Option<&'static AgentModel> {
    AVAILABLE_MODELS.iter().find(|m| m.id == id)
}

/// The job a resume is being tailored for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
}

impl JobInfo {
    /// Create job info.
    pub fn new(
        company_name: impl Into<String>,
        job_title: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            job_title: job_title.into(),
            job_description: job_description.into(),
        }
    }
}

/// A named slice of resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSection {
    /// Section name (`Header` for the text before the first section)
    pub name: String,
    /// Raw section content, lines terminated by `\n`
    pub content: String,
}

/// One section before and after tailoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoredSection {
    pub name: String,
    pub original: String,
    pub tailored: String,
    pub keywords: Vec<String>,
}

/// How well a resume matches a job, as scored by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFitScore {
    #[serde(default)]
    pub overall: u32,
    #[serde(default)]
    pub keyword_match: u32,
    #[serde(default)]
    pub skills_match: u32,
    #[serde(default)]
    pub experience_match: u32,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl JobFitScore {
    /// Score reported when the model reply cannot be understood.
    pub fn unavailable() -> Self {
        Self {
            overall: 0,
            keyword_match: 0,
            skills_match: 0,
            experience_match: 0,
            gaps: vec!["Unable to analyze resume".to_string()],
            suggestions: vec!["Please try again".to_string()],
        }
    }
}

/// Result of a full tailoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoringResult {
    pub sections: Vec<TailoredSection>,
    pub job_fit_score: JobFitScore,
    pub summary: String,
}

impl TailoringResult {
    /// Join tailored sections into one resume text (`name\ncontent`, blank line between).
    pub fn tailored_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| format!("{}\n{}", s.name, s.tailored))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    /// Lowercase role name as sent to the chat service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::System => "system",
        }
    }
}

/// One message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ChatMessage {
    /// Create a message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Attach a millisecond timestamp.
    pub fn with_timestamp(mut self, millis: i64) -> Self {
        self.timestamp = Some(millis);
        self
    }
}

/// A coach reply split into its explanation and the rewritten resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Text after `EXPLANATION:`, or the whole reply when no markers are present
    pub explanation: String,
    /// Text after `UPDATED_RESUME:`, if present
    pub updated_resume: Option<String>,
}

/// Contact details for resume creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// One past position for resume creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceInput {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

/// One degree for resume creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationInput {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Structured input for writing a resume from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experience: Vec<ExperienceInput>,
    #[serde(default)]
    pub education: Vec<EducationInput>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_listed() {
        assert!(find_model(DEFAULT_MODEL).is_some());
        assert!(find_model("unknown").is_none());
    }

    #[test]
    fn test_job_fit_score_partial_json() {
        let score: JobFitScore = serde_json::from_str(r#"{"overall": 72, "gaps": ["Kubernetes"]}"#).unwrap();
        assert_eq!(score.overall, 72);
        assert_eq!(score.keyword_match, 0);
        assert_eq!(score.gaps, vec!["Kubernetes"]);
    }

    #[test]
    fn test_tailored_text() {
        let result = TailoringResult {
            sections: vec![
                TailoredSection {
                    name: "Summary".into(),
                    original: "a".into(),
                    tailored: "Backend engineer".into(),
                    keywords: vec![],
                },
                TailoredSection {
                    name: "Skills".into(),
                    original: "b".into(),
                    tailored: "Rust, SQL".into(),
                    keywords: vec![],
                },
            ],
            job_fit_score: JobFitScore::unavailable(),
            summary: String::new(),
        };
        assert_eq!(
            result.tailored_text(),
            "Summary\nBackend engineer\n\nSkills\nRust, SQL"
        );
    }

    #[test]
    fn test_chat_message_serialization() {
        let msg = ChatMessage::assistant("Done");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"Done"}"#);
    }
}
