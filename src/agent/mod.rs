//! AI-assisted tailoring, scoring and coaching.
//!
//! The agent never talks to a network service itself. Callers supply a
//! [`ChatBackend`] that turns a conversation into a reply; the agent builds
//! the prompts, sequences the calls and parses what comes back.
//!
//! # Example
//!
//! ```
//! use resumind::agent::{Agent, ChatBackend, NoopObserver};
//! use resumind::model::{ChatMessage, JobInfo};
//!
//! struct Canned;
//!
//! impl ChatBackend for Canned {
//!     fn complete(&self, _messages: &[ChatMessage], _model: &str) -> resumind::Result<String> {
//!         Ok(r#"{"overall": 80, "keywords": ["rust"]}"#.to_string())
//!     }
//! }
//!
//! let agent = Agent::new(Canned);
//! let job = JobInfo::new("Acme", "Engineer", "Write Rust");
//! let result = agent
//!     .tailor_resume("Skills\nRust, SQL", &job, &mut NoopObserver)
//!     .unwrap();
//! assert_eq!(result.job_fit_score.overall, 80);
//! ```

mod observer;
pub mod prompts;
mod response;
mod store;

pub use observer::{CompositeObserver, NoopObserver, TailorObserver};
pub use response::{extract_json, parse_chat_reply, safe_parse_json, JobRequirements};
pub use store::{KeyValueStore, MemoryStore, ResumeRecord, ResumeStore, TailoredRecord};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::model::{
    find_model, ChatMessage, Feedback, JobFitScore, JobInfo, ResumeInput, TailoredSection,
    TailoringResult, DEFAULT_MODEL,
};
use crate::parser::split_sections;

/// A chat completion service.
pub trait ChatBackend: Send + Sync {
    /// Send a conversation and return the full reply.
    fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String>;

    /// Send a conversation and report the reply as it arrives.
    ///
    /// Returns the concatenation of every token passed to `on_token`.
    /// Backends without streaming report the whole reply as one token.
    fn stream(
        &self,
        messages: &[ChatMessage],
        model: &str,
        on_token: &mut dyn FnMut(&str),
    ) -> Result<String> {
        let reply = self.complete(messages, model)?;
        on_token(&reply);
        Ok(reply)
    }
}

impl<B: ChatBackend + ?Sized> ChatBackend for Box<B> {
    fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String> {
        (**self).complete(messages, model)
    }

    fn stream(
        &self,
        messages: &[ChatMessage],
        model: &str,
        on_token: &mut dyn FnMut(&str),
    ) -> Result<String> {
        (**self).stream(messages, model, on_token)
    }
}

/// Options for agent pipelines.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Model identifier passed to the backend
    pub model: String,
}

impl AgentOptions {
    /// Create options with the default model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Runs resume pipelines against a chat backend.
pub struct Agent<B> {
    backend: B,
    options: AgentOptions,
}

impl<B: ChatBackend> Agent<B> {
    /// Create an agent with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, AgentOptions::default())
    }

    /// Create an agent with custom options.
    pub fn with_options(backend: B, options: AgentOptions) -> Self {
        if find_model(&options.model).is_none() {
            debug!("Model {} is not in the known model list", options.model);
        }
        Self { backend, options }
    }

    /// The configured model.
    pub fn model(&self) -> &str {
        &self.options.model
    }

    /// The chat backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ask the model what a job posting requires.
    ///
    /// An unparseable reply yields empty requirements.
    pub fn analyze_job(&self, job: &JobInfo) -> Result<JobRequirements> {
        let reply = self.ask(prompts::analyze_job(job))?;
        Ok(safe_parse_json(&reply, JobRequirements::default()))
    }

    /// Rewrite every section of a resume for a job and score the result.
    ///
    /// Progress runs 10 (job analysis), 30 to 70 (one step per section),
    /// 80 (fit measurement) and 100. Section rewrites are streamed through
    /// `observer.on_token`.
    pub fn tailor_resume(
        &self,
        resume: &str,
        job: &JobInfo,
        observer: &mut dyn TailorObserver,
    ) -> Result<TailoringResult> {
        observer.on_progress("Analyzing job requirements...", 10.0);
        let requirements = self.analyze_job(job)?;
        debug!(
            "Job requires {} keywords, {} technical skills",
            requirements.keywords.len(),
            requirements.technical_skills.len()
        );

        observer.on_progress("Tailoring resume sections...", 30.0);
        let sections = split_sections(resume);
        let requirements_json = serde_json::to_string(&requirements)
            .map_err(|e| Error::Other(e.to_string()))?;

        let total = sections.len();
        let mut tailored_sections = Vec::with_capacity(total);
        for (i, section) in sections.into_iter().enumerate() {
            let percent = 30.0 + ((i + 1) as f32 / total as f32) * 40.0;
            observer.on_progress(&format!("Tailoring {}...", section.name), percent);

            let prompt = prompts::tailor_section(&section.name, &section.content, &requirements_json);
            let tailored = self.backend.stream(
                &[ChatMessage::user(prompt)],
                &self.options.model,
                &mut |token: &str| observer.on_token(token),
            )?;

            tailored_sections.push(TailoredSection {
                name: section.name,
                original: section.content,
                tailored,
                keywords: requirements.keywords.clone(),
            });
        }

        observer.on_progress("Measuring job fit...", 80.0);
        let combined = tailored_sections
            .iter()
            .map(|s| format!("{}:\n{}", s.name, s.tailored))
            .collect::<Vec<_>>()
            .join("\n\n");
        let job_fit_score = self.measure_job_fit(&combined, job)?;

        observer.on_progress("Complete!", 100.0);
        info!(
            "Tailored {} sections for {} at {} (fit {}%)",
            tailored_sections.len(),
            job.job_title,
            job.company_name,
            job_fit_score.overall
        );

        let summary = format!(
            "Your resume has been tailored for {} at {}. Overall fit score: {}%",
            job.job_title, job.company_name, job_fit_score.overall
        );

        Ok(TailoringResult {
            sections: tailored_sections,
            job_fit_score,
            summary,
        })
    }

    /// Score how well a resume matches a job.
    ///
    /// An unparseable reply yields [`JobFitScore::unavailable`].
    pub fn measure_job_fit(&self, resume: &str, job: &JobInfo) -> Result<JobFitScore> {
        let reply = self.ask(prompts::measure_fit(resume, job))?;
        Ok(safe_parse_json(&reply, JobFitScore::unavailable()))
    }

    /// Continue a coaching conversation, streaming the reply.
    ///
    /// The reply follows the `EXPLANATION:` / `UPDATED_RESUME:` layout; see
    /// [`parse_chat_reply`].
    pub fn chat_enhance(
        &self,
        resume: &str,
        history: &[ChatMessage],
        user_message: &str,
        observer: &mut dyn TailorObserver,
    ) -> Result<String> {
        let messages = [
            ChatMessage::system(prompts::CHAT_SYSTEM_PROMPT),
            ChatMessage::user(prompts::chat_enhance(resume, history, user_message)),
        ];
        self.backend
            .stream(&messages, &self.options.model, &mut |token: &str| {
                observer.on_token(token)
            })
    }

    /// Ask for ATS feedback on a resume.
    ///
    /// Fails with [`crate::Error::ResponseFormat`] when the reply holds no
    /// feedback object.
    pub fn analyze_resume(
        &self,
        resume: &str,
        job_title: &str,
        job_description: &str,
    ) -> Result<Feedback> {
        let prompt = format!(
            "{}\n\nResume:\n{}",
            prompts::ats_feedback(job_title, job_description),
            resume
        );
        let reply = self.ask(prompt)?;
        extract_json(&reply)
    }

    /// Rewrite a whole resume using earlier feedback.
    pub fn enhance_resume(
        &self,
        resume: &str,
        feedback: &Feedback,
        job_title: &str,
        job_description: &str,
    ) -> Result<String> {
        let reply = self.ask(prompts::enhance_resume(
            feedback,
            job_title,
            job_description,
            resume,
        ))?;
        Ok(reply.trim().to_string())
    }

    /// Write a new resume from structured input.
    pub fn create_resume(&self, input: &ResumeInput) -> Result<String> {
        let reply = self.ask(prompts::create_resume(input))?;
        Ok(reply.trim().to_string())
    }

    fn ask(&self, prompt: String) -> Result<String> {
        self.backend
            .complete(&[ChatMessage::user(prompt)], &self.options.model)
    }
}
