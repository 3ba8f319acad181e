//! Data model for classified resumes and AI exchanges.
//!
//! [`LayoutPlan`] is the intermediate representation between the line
//! classifier and the document renderers; it carries no rendering state
//! so both export formats can share one plan.

pub mod agent;
mod catalog;
mod feedback;
mod layout;

pub use agent::{
    find_model, AgentModel, ChatMessage, ChatReply, ChatRole, EducationInput, ExperienceInput,
    JobFitScore, JobInfo, PersonalInfo, ResumeInput, ResumeSection, TailoredSection,
    TailoringResult, AVAILABLE_MODELS, DEFAULT_MODEL,
};
pub use catalog::{HeaderMatch, SectionHeaderCatalog, SECTION_HEADERS};
pub use feedback::{Category, Feedback, Tip, TipKind};
pub use layout::{Alignment, ClassifiedLine, LayoutPlan, LineRole, LineStyle};
