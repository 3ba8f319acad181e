//! Key-value persistence for resumes, chat histories and tailoring runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ChatMessage, Feedback, JobInfo, TailoringResult};

/// String key-value storage service.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Remove `key`. Returns whether it existed.
    fn delete(&self, key: &str) -> Result<bool>;
}

/// In-process store backed by a sorted map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .lock()?
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

/// A stored resume and the job it targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub id: String,
    pub resume_path: String,
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_resume_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_enhanced: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_generated: bool,
    pub feedback: Option<Feedback>,
}

/// A saved tailoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoredRecord {
    pub original_resume_id: String,
    pub job_info: JobInfo,
    /// RFC 3339 UTC timestamp
    pub tailored_at: String,
    pub result: TailoringResult,
}

/// Typed access to resume data over a [`KeyValueStore`].
pub struct ResumeStore<S> {
    store: S,
}

impl<S: KeyValueStore> ResumeStore<S> {
    /// Wrap a key-value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Save a resume under `resume:{id}`.
    pub fn save_resume(&self, record: &ResumeRecord) -> Result<()> {
        let json = to_json(record)?;
        self.store.set(&resume_key(&record.id), &json)
    }

    /// Load a resume; `None` when the key is missing.
    pub fn load_resume(&self, id: &str) -> Result<Option<ResumeRecord>> {
        match self.store.get(&resume_key(id))? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| Error::Storage(format!("resume {}: {}", id, e))),
            None => Ok(None),
        }
    }

    /// Every stored resume, skipping records that fail to parse.
    pub fn list_resumes(&self) -> Result<Vec<ResumeRecord>> {
        let mut records = Vec::new();
        for key in self.store.list("resume:")? {
            let Some(json) = self.store.get(&key)? else {
                continue;
            };
            match serde_json::from_str(&json) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable record {}: {}", key, e),
            }
        }
        Ok(records)
    }

    /// Replace the chat history for a resume.
    pub fn save_chat_history(&self, resume_id: &str, messages: &[ChatMessage]) -> Result<()> {
        let json = to_json(&messages)?;
        self.store.set(&chat_key(resume_id), &json)
    }

    /// Chat history for a resume. Missing or malformed history is empty.
    pub fn load_chat_history(&self, resume_id: &str) -> Result<Vec<ChatMessage>> {
        let Some(json) = self.store.get(&chat_key(resume_id))? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("Discarding malformed chat history for {}: {}", resume_id, e);
            Vec::new()
        }))
    }

    /// Save a tailoring run under `tailored:{id}:{millis}` and return the key.
    pub fn save_tailored(
        &self,
        resume_id: &str,
        result: &TailoringResult,
        job: &JobInfo,
    ) -> Result<String> {
        let now = Utc::now();
        let record = TailoredRecord {
            original_resume_id: resume_id.to_string(),
            job_info: job.clone(),
            tailored_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            result: result.clone(),
        };

        let key = format!("tailored:{}:{}", resume_id, now.timestamp_millis());
        self.store.set(&key, &to_json(&record)?)?;
        Ok(key)
    }

    /// Saved tailoring runs for a resume, oldest first.
    pub fn list_tailored(&self, resume_id: &str) -> Result<Vec<TailoredRecord>> {
        let prefix = format!("tailored:{}:", resume_id);
        let mut keyed = Vec::new();
        for key in self.store.list(&prefix)? {
            let millis: i64 = key[prefix.len()..].parse().unwrap_or_default();
            if let Some(json) = self.store.get(&key)? {
                match serde_json::from_str::<TailoredRecord>(&json) {
                    Ok(record) => keyed.push((millis, record)),
                    Err(e) => warn!("Skipping unreadable record {}: {}", key, e),
                }
            }
        }
        keyed.sort_by_key(|(millis, _)| *millis);
        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }
}

fn resume_key(id: &str) -> String {
    format!("resume:{}", id)
}

fn chat_key(id: &str) -> String {
    format!("chat:{}", id)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChatRole, JobFitScore};

    fn sample_result() -> TailoringResult {
        TailoringResult {
            sections: Vec::new(),
            job_fit_score: JobFitScore::unavailable(),
            summary: "done".to_string(),
        }
    }

    #[test]
    fn test_memory_store_prefix_listing() {
        let store = MemoryStore::new();
        store.set("resume:2", "b").unwrap();
        store.set("resume:1", "a").unwrap();
        store.set("chat:1", "[]").unwrap();

        assert_eq!(store.list("resume:").unwrap(), vec!["resume:1", "resume:2"]);
        assert!(store.delete("resume:1").unwrap());
        assert!(!store.delete("resume:1").unwrap());
        assert_eq!(store.get("resume:1").unwrap(), None);
    }

    #[test]
    fn test_resume_round_trip() {
        let store = ResumeStore::new(MemoryStore::new());
        let record = ResumeRecord {
            id: "abc".into(),
            job_title: "Engineer".into(),
            ..ResumeRecord::default()
        };
        store.save_resume(&record).unwrap();

        let raw = store.inner().get("resume:abc").unwrap().unwrap();
        assert!(raw.contains("\"jobTitle\":\"Engineer\""));
        assert!(!raw.contains("isEnhanced"));

        assert_eq!(store.load_resume("abc").unwrap(), Some(record));
        assert_eq!(store.load_resume("missing").unwrap(), None);
        assert_eq!(store.list_resumes().unwrap().len(), 1);
    }

    #[test]
    fn test_chat_history() {
        let store = ResumeStore::new(MemoryStore::new());
        assert!(store.load_chat_history("r1").unwrap().is_empty());

        let messages = vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")];
        store.save_chat_history("r1", &messages).unwrap();
        let loaded = store.load_chat_history("r1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_malformed_chat_history_is_empty() {
        let store = ResumeStore::new(MemoryStore::new());
        store.inner().set("chat:r1", "not json").unwrap();
        assert!(store.load_chat_history("r1").unwrap().is_empty());
    }

    #[test]
    fn test_save_tailored() {
        let store = ResumeStore::new(MemoryStore::new());
        let job = JobInfo::new("Acme", "Engineer", "Rust");
        let key = store.save_tailored("r1", &sample_result(), &job).unwrap();
        assert!(key.starts_with("tailored:r1:"));

        let raw = store.inner().get(&key).unwrap().unwrap();
        assert!(raw.contains("\"originalResumeId\":\"r1\""));
        assert!(raw.contains("\"tailoredAt\""));

        let records = store.list_tailored("r1").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].job_info, job);
        assert!(records[0].tailored_at.ends_with('Z'));
        assert!(store.list_tailored("r2").unwrap().is_empty());
    }
}
