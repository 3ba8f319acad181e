//! Integration tests for the agent pipelines and resume storage.

use std::sync::Mutex;

use resumind::agent::{
    parse_chat_reply, Agent, AgentOptions, ChatBackend, CompositeObserver, MemoryStore,
    ResumeRecord, ResumeStore, TailorObserver,
};
use resumind::error::{Error, Result};
use resumind::model::{find_model, ChatMessage, ChatRole, JobInfo, DEFAULT_MODEL};
use resumind::{export_pdf, RenderOptions};

const RESUME: &str = "Jane Doe
Software Engineer
jane@example.com
SUMMARY
Backend engineer.
EXPERIENCE
Developer at Acme
- Built APIs
";

/// Answers by prompt type and streams replies word by word.
struct KeywordBackend {
    calls: Mutex<Vec<String>>,
}

impl KeywordBackend {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ChatBackend for KeywordBackend {
    fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String> {
        let prompt = &messages.last().unwrap().content;
        self.calls.lock().unwrap().push(model.to_string());

        let reply = if prompt.starts_with("You are a job requirements analyst") {
            r#"{"keywords": ["payments", "rust"], "softSkills": ["mentoring"]}"#.to_string()
        } else if prompt.starts_with("You are an ATS and job fit expert") {
            "Analysis:\n```json\n{\"overall\": 88, \"keywordMatch\": 90, \"skillsMatch\": 85, \"experienceMatch\": 80, \"gaps\": [], \"suggestions\": [\"Add metrics\"]}\n```".to_string()
        } else if prompt.starts_with("You are an expert resume writer. Tailor") {
            "Rust payments engineer".to_string()
        } else if prompt.starts_with("You are an expert resume coach") {
            "EXPLANATION:\nAdded a metric.\n\nUPDATED_RESUME:\nJane Doe\nEngineer\nSUMMARY\nCut latency 40%".to_string()
        } else {
            return Err(Error::Backend("unexpected prompt".to_string()));
        };
        Ok(reply)
    }

    fn stream(
        &self,
        messages: &[ChatMessage],
        model: &str,
        on_token: &mut dyn FnMut(&str),
    ) -> Result<String> {
        let reply = self.complete(messages, model)?;
        for (i, word) in reply.split(' ').enumerate() {
            if i > 0 {
                on_token(" ");
            }
            on_token(word);
        }
        Ok(reply)
    }
}

struct TokenCollector(&'static Mutex<String>);

impl TailorObserver for TokenCollector {
    fn on_token(&mut self, token: &str) {
        self.0.lock().unwrap().push_str(token);
    }
}

struct ProgressCollector(&'static Mutex<Vec<f32>>);

impl TailorObserver for ProgressCollector {
    fn on_progress(&mut self, _message: &str, percent: f32) {
        self.0.lock().unwrap().push(percent);
    }
}

#[test]
fn test_tailor_then_export() {
    static TOKENS: Mutex<String> = Mutex::new(String::new());
    static PROGRESS: Mutex<Vec<f32>> = Mutex::new(Vec::new());

    let agent = Agent::with_options(
        KeywordBackend::new(),
        AgentOptions::new().with_model("claude-3-7-sonnet-latest"),
    );
    let job = JobInfo::new("Acme", "Payments Engineer", "Rust payments platform");
    let mut observer = CompositeObserver::new()
        .with_observer(TokenCollector(&TOKENS))
        .with_observer(ProgressCollector(&PROGRESS));

    let result = agent.tailor_resume(RESUME, &job, &mut observer).unwrap();

    let names: Vec<&str> = result.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Header", "Summary", "Experience"]);
    assert!(result
        .sections
        .iter()
        .all(|s| s.tailored == "Rust payments engineer"));
    assert_eq!(result.sections[0].keywords, vec!["payments", "rust"]);
    assert_eq!(result.job_fit_score.overall, 88);
    assert_eq!(result.job_fit_score.suggestions, vec!["Add metrics"]);
    assert_eq!(
        result.summary,
        "Your resume has been tailored for Payments Engineer at Acme. Overall fit score: 88%"
    );

    assert_eq!(
        *TOKENS.lock().unwrap(),
        "Rust payments engineer".repeat(3)
    );
    let progress = PROGRESS.lock().unwrap();
    assert_eq!(progress.first(), Some(&10.0));
    assert_eq!(progress.last(), Some(&100.0));
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));

    let calls = agent.backend().calls.lock().unwrap();
    assert_eq!(calls.len(), 5);
    assert!(calls.iter().all(|m| m == "claude-3-7-sonnet-latest"));

    let pdf = export_pdf(&result.tailored_text(), &RenderOptions::default()).unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF-"));
}

#[test]
fn test_chat_round_persists_history() {
    let agent = Agent::new(KeywordBackend::new());
    let store = ResumeStore::new(MemoryStore::new());
    store
        .save_resume(&ResumeRecord {
            id: "r1".to_string(),
            job_title: "Engineer".to_string(),
            ..ResumeRecord::default()
        })
        .unwrap();

    let mut history = store.load_chat_history("r1").unwrap();
    assert!(history.is_empty());

    let request = "Add a metric";
    let reply = agent
        .chat_enhance(RESUME, &history, request, &mut resumind::agent::NoopObserver)
        .unwrap();
    let parsed = parse_chat_reply(&reply);
    assert_eq!(parsed.explanation, "Added a metric.");
    let updated = parsed.updated_resume.unwrap();
    assert!(updated.ends_with("Cut latency 40%"));

    history.push(ChatMessage::user(request));
    history.push(ChatMessage::assistant(parsed.explanation));
    store.save_chat_history("r1", &history).unwrap();

    let reloaded = store.load_chat_history("r1").unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].role, ChatRole::User);

    let plan = resumind::classify(&updated);
    assert_eq!(plan.name(), Some("Jane Doe"));
}

#[test]
fn test_save_and_list_tailored_runs() {
    let agent = Agent::new(KeywordBackend::new());
    let store = ResumeStore::new(MemoryStore::new());
    let job = JobInfo::new("Acme", "Engineer", "Rust");

    let result = agent
        .tailor_resume(RESUME, &job, &mut resumind::agent::NoopObserver)
        .unwrap();
    let key = store.save_tailored("r1", &result, &job).unwrap();
    assert!(key.starts_with("tailored:r1:"));

    let runs = store.list_tailored("r1").unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].original_resume_id, "r1");
    assert_eq!(runs[0].result, result);
}

#[test]
fn test_backend_failure_surfaces() {
    let agent = Agent::new(KeywordBackend::new());
    let err = agent
        .create_resume(&resumind::model::ResumeInput::default())
        .unwrap_err();
    assert!(matches!(err, Error::Backend(_)));
}

#[test]
fn test_default_model_is_listed() {
    let agent = Agent::new(KeywordBackend::new());
    assert_eq!(agent.model(), DEFAULT_MODEL);
    let model = find_model(agent.model()).unwrap();
    assert_eq!(model.id, DEFAULT_MODEL);
    assert!(find_model("no-such-model").is_none());
}
