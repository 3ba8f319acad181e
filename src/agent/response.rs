//! Parsing of free-form model replies.

use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ChatReply;

const EXPLANATION_MARKER: &str = "EXPLANATION:";
const UPDATED_RESUME_MARKER: &str = "UPDATED_RESUME:";

fn fenced_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:json)?\s*((?s:.*?))\s*```").unwrap())
}

fn object_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)(\{.*\})").unwrap())
}

/// Requirements extracted from a job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRequirements {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub culture_fit: Vec<String>,
}

/// Extract JSON from a model reply that may wrap it in prose or a code fence.
///
/// Tries the whole reply, then the first fenced code block, then the
/// outermost `{...}` span.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let direct = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let candidates = [
        fenced_block()
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim()),
        object_span()
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim()),
    ];

    let mut last_error = direct;
    for candidate in candidates.into_iter().flatten() {
        match serde_json::from_str(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = e,
        }
    }

    Err(Error::ResponseFormat(last_error.to_string()))
}

/// Like [`extract_json`], but logs the failure and returns `default`.
pub fn safe_parse_json<T: DeserializeOwned>(text: &str, default: T) -> T {
    extract_json(text).unwrap_or_else(|e| {
        warn!("Falling back to default after unparseable model reply: {}", e);
        default
    })
}

/// Split a coach reply into its explanation and updated resume.
///
/// Without an `UPDATED_RESUME:` marker the whole reply (minus a leading
/// `EXPLANATION:`) is the explanation.
pub fn parse_chat_reply(reply: &str) -> ChatReply {
    let (head, updated_resume) = match reply.find(UPDATED_RESUME_MARKER) {
        Some(pos) => {
            let resume = reply[pos + UPDATED_RESUME_MARKER.len()..].trim();
            (&reply[..pos], Some(resume.to_string()))
        }
        None => (reply, None),
    };

    let explanation = match head.find(EXPLANATION_MARKER) {
        Some(pos) => &head[pos + EXPLANATION_MARKER.len()..],
        None => head,
    };

    ChatReply {
        explanation: explanation.trim().to_string(),
        updated_resume: updated_resume.filter(|r| !r.is_empty()),
    }
}
