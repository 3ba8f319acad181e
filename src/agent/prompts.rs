//! Prompt builders for the chat model.
//!
//! Every builder is a pure function of its inputs so prompts can be
//! inspected and tested without a backend.

use serde::Serialize;

use crate::model::{ChatMessage, Feedback, JobInfo, ResumeInput};

/// System prompt for interactive coaching.
pub const CHAT_SYSTEM_PROMPT: &str = "You are an expert resume coach. Help users improve their resumes through conversation. Be helpful, specific, and encouraging.";

/// Shape of the feedback object requested by [`ats_feedback`].
pub const FEEDBACK_FORMAT: &str = r#"
      interface Feedback {
      overallScore: number; //max 100
      ATS: {
        score: number; //rate based on ATS suitability
        tips: {
          type: "good" | "improve";
          tip: string; //give 3-4 tips
        }[];
      };
      toneAndStyle: {
        score: number; //max 100
        tips: {
          type: "good" | "improve";
          tip: string; //make it a short "title" for the actual explanation
          explanation: string; //explain in detail here
        }[]; //give 3-4 tips
      };
      content: {
        score: number; //max 100
        tips: {
          type: "good" | "improve";
          tip: string; //make it a short "title" for the actual explanation
          explanation: string; //explain in detail here
        }[]; //give 3-4 tips
      };
      structure: {
        score: number; //max 100
        tips: {
          type: "good" | "improve";
          tip: string; //make it a short "title" for the actual explanation
          explanation: string; //explain in detail here
        }[]; //give 3-4 tips
      };
      skills: {
        score: number; //max 100
        tips: {
          type: "good" | "improve";
          tip: string; //make it a short "title" for the actual explanation
          explanation: string; //explain in detail here
        }[]; //give 3-4 tips
      };
    }"#;

/// Ask for the requirements of a job posting as JSON.
pub fn analyze_job(job: &JobInfo) -> String {
    format!(
        r#"You are a job requirements analyst. Analyze the following job posting and extract:
1. Key technical skills required
2. Soft skills required
3. Experience level needed
4. Important keywords for ATS
5. Company culture indicators

Company: {}
Job Title: {}
Job Description:
{}

Return a JSON object with these fields:
{{
    "technicalSkills": string[],
    "softSkills": string[],
    "experienceLevel": string,
    "keywords": string[],
    "cultureFit": string[]
}}

Return ONLY the JSON, no other text."#,
        job.company_name, job.job_title, job.job_description
    )
}

/// Ask for one section rewritten against serialized job requirements.
pub fn tailor_section(section: &str, content: &str, requirements: &str) -> String {
    format!(
        r#"You are an expert resume writer. Tailor the following resume section to better match the job requirements.

Section: {}
Original Content:
{}

Job Requirements:
{}

Rules:
1. DO NOT invent or fabricate information
2. Reword to incorporate relevant keywords naturally
3. Highlight relevant experience that matches requirements
4. Use strong action verbs
5. Keep it concise and professional

Return ONLY the tailored content, no explanations."#,
        section, content, requirements
    )
}

/// Ask for a JSON fit score of a resume against a job.
pub fn measure_fit(resume: &str, job: &JobInfo) -> String {
    format!(
        r#"You are an ATS and job fit expert. Analyze how well this resume matches the job posting.

Resume:
{}

Job:
Company: {}
Title: {}
Description: {}

Provide a detailed analysis in this JSON format:
{{
    "overall": number (0-100),
    "keywordMatch": number (0-100),
    "skillsMatch": number (0-100),
    "experienceMatch": number (0-100),
    "gaps": string[] (what's missing),
    "suggestions": string[] (how to improve)
}}

Return ONLY the JSON, no other text."#,
        resume, job.company_name, job.job_title, job.job_description
    )
}

/// Ask the coach to apply a user request and return the full updated resume.
pub fn chat_enhance(resume: &str, history: &[ChatMessage], user_message: &str) -> String {
    let conversation = history
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert resume coach helping a job seeker improve their resume.

Current Resume:
{}

Previous Conversation:
{}

User's Request: {}

IMPORTANT: After making the requested changes, you MUST respond in this exact format:

EXPLANATION:
[Briefly explain what changes you made and why they help]

UPDATED_RESUME:
[The complete updated resume with all the changes applied]

Make sure to include the full resume content after UPDATED_RESUME:, not just the changed sections."#,
        resume, conversation, user_message
    )
}

/// Ask for ATS feedback in the [`FEEDBACK_FORMAT`] shape.
pub fn ats_feedback(job_title: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert in ATS (Applicant Tracking System) and resume analysis.
      Please analyze and rate this resume and suggest how to improve it.
      The rating can be low if the resume is bad.
      Be thorough and detailed. Don't be afraid to point out any mistakes or areas for improvement.
      If there is a lot to improve, don't hesitate to give low scores. This is to help the user to improve their resume.
      If available, use the job description for the job user is applying to to give more detailed feedback.
      If provided, take the job description into consideration.
      The job title is: {}
      The job description is: {}
      Provide the feedback using the following format:
      {}
      Return the analysis as an JSON object, without any other text and without the backticks.
      Do not include any other text or comments."#,
        job_title, job_description, FEEDBACK_FORMAT
    )
}

/// Ask for a whole resume rewritten from earlier feedback.
pub fn enhance_resume(
    feedback: &Feedback,
    job_title: &str,
    job_description: &str,
    resume: &str,
) -> String {
    let feedback_json = serde_json::to_string_pretty(feedback).unwrap_or_else(|_| "{}".into());

    format!(
        r#"
# Resume Enhancement Task

You are an expert resume writer and career coach who helps job seekers create compelling, ATS-friendly resumes that get interviews.
Your goal is to transform the given resume into a **more professional, ATS-optimized, and better-structured version**,
but you must **never invent or fabricate** any information not present in the original content.

---

## IMPORTANT RULES

1. **DO NOT make up details**: never add new companies, job titles, projects, technologies, or achievements that are not explicitly mentioned in the original resume.
2. **Enhance only structure and clarity**: you may reword, reorder, and tighten language, but the meaning must remain faithful to the original.
3. **If data is missing**, leave placeholders like [Add metric here] or [Clarify responsibility].
4. **Focus on improving presentation, formatting, and ATS alignment.**

---

## CONTEXT

**Job Title:** {}
**Job Description:** {}

**Original Resume Content:**
{}

**Original AI Feedback:**
{}

---

## TASK

Using the principles above:
- Keep all factual information intact.
- Restructure and polish the resume according to best practices.
- Improve clarity, action verbs, and consistency.
- Follow the structure Header, Experience, Education, Skills.
- Return the final result as plain text or markdown (no JSON or explanations).

Return **only** the enhanced resume content, no commentary or extra text.
"#,
        job_title, job_description, resume, feedback_json
    )
}

/// Ask for a new resume written from structured input.
pub fn create_resume(input: &ResumeInput) -> String {
    let or_unspecified = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or("Not specified")
            .to_string()
    };

    format!(
        r#"You are an expert resume writer specializing in ATS-optimized resumes.

TARGET JOB (if provided):
- Job Title: {}
- Job Description: {}

USER INFORMATION:
Personal Info: {}
Experience: {}
Education: {}
Skills: {}

TASK:
Create a professional, ATS-optimized resume using the information provided.
- Use a clean, modern format
- Optimize for ATS scanning
- Use action verbs and quantifiable achievements
- Tailor content to the target job (if provided)
- Include a compelling professional summary
- Format: Plain text or markdown

Return ONLY the resume content in a professional format.
No explanations, no comments, just the resume."#,
        or_unspecified(&input.job_title),
        or_unspecified(&input.job_description),
        to_json(&input.personal_info),
        to_json(&input.experience),
        to_json(&input.education),
        input.skills.join(", ")
    )
}

/// Compact JSON for a prompt field.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceInput, PersonalInfo};

    fn job() -> JobInfo {
        JobInfo::new("Acme", "Backend Engineer", "Rust and Postgres")
    }

    #[test]
    fn test_analyze_job_embeds_posting() {
        let prompt = analyze_job(&job());
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Job Title: Backend Engineer"));
        assert!(prompt.contains("Job Description:\nRust and Postgres"));
        assert!(prompt.contains("\"technicalSkills\": string[]"));
        assert!(prompt.ends_with("Return ONLY the JSON, no other text."));
    }

    #[test]
    fn test_tailor_section_layout() {
        let prompt = tailor_section("Skills", "Rust\n", "{\"keywords\":[]}");
        assert!(prompt.contains("Section: Skills\nOriginal Content:\nRust\n"));
        assert!(prompt.contains("Job Requirements:\n{\"keywords\":[]}"));
    }

    #[test]
    fn test_measure_fit_embeds_resume() {
        let prompt = measure_fit("Skills:\nRust", &job());
        assert!(prompt.contains("Resume:\nSkills:\nRust"));
        assert!(prompt.contains("Title: Backend Engineer"));
    }

    #[test]
    fn test_chat_enhance_history() {
        let history = vec![
            ChatMessage::user("Shorter please"),
            ChatMessage::assistant("Done"),
        ];
        let prompt = chat_enhance("Jane Doe", &history, "Add metrics");
        assert!(prompt.contains("Previous Conversation:\nuser: Shorter please\nassistant: Done"));
        assert!(prompt.contains("User's Request: Add metrics"));
        assert!(prompt.contains("UPDATED_RESUME:"));
    }

    #[test]
    fn test_ats_feedback_includes_format() {
        let prompt = ats_feedback("Engineer", "Build things");
        assert!(prompt.contains("The job title is: Engineer"));
        assert!(prompt.contains("interface Feedback"));
    }

    #[test]
    fn test_enhance_resume_embeds_feedback() {
        let feedback = Feedback {
            overall_score: 42,
            ..Feedback::default()
        };
        let prompt = enhance_resume(&feedback, "Engineer", "Build", "Jane");
        assert!(prompt.contains("\"overallScore\": 42"));
        assert!(prompt.contains("**Original Resume Content:**\nJane"));
    }

    #[test]
    fn test_create_resume_defaults() {
        let input = ResumeInput {
            personal_info: PersonalInfo {
                name: "Jane".into(),
                ..PersonalInfo::default()
            },
            experience: vec![ExperienceInput {
                title: "Dev".into(),
                company: "Acme".into(),
                duration: "2020-2024".into(),
                description: "APIs".into(),
            }],
            skills: vec!["Rust".into(), "SQL".into()],
            ..ResumeInput::default()
        };

        let prompt = create_resume(&input);
        assert!(prompt.contains("- Job Title: Not specified"));
        assert!(prompt.contains("- Job Description: Not specified"));
        assert!(prompt.contains("\"name\":\"Jane\""));
        assert!(prompt.contains("\"company\":\"Acme\""));
        assert!(prompt.contains("Education: []"));
        assert!(prompt.contains("Skills: Rust, SQL"));
    }
}
