//! In-process model backend for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::llm_client::{LlmBackend, LlmError};
use crate::pipeline::prompts::{
    CANDIDATE_EXTRACTION_SYSTEM, JOB_EXTRACTION_SYSTEM, SKILL_GRADING_SYSTEM,
};

pub const CANDIDATE_JSON: &str = r#"{
    "name": "Asha Rao",
    "contact": {"email": "made-up@example.com", "phone": "", "linkedin": "", "github": "", "portfolio": "", "other_links": []},
    "education": [{"degree": "Bachelor of Technology", "stream": "Information Technology"}],
    "experience": [{"type": "Full Time", "role": "Backend Engineer", "duration_months": 24}],
    "skills": {"technical": ["Rust", "SQL"], "tools": ["Docker"]},
    "projects": [{"name": "matcher"}],
    "certifications": []
}"#;

pub const JOB_JSON: &str = r#"{
    "job_title": "Backend Engineer",
    "skills_required": ["Rust"],
    "skills_optional": ["Kafka"],
    "tools_and_technologies": ["Docker"],
    "responsibilities": ["Build services"],
    "experience_required": "2+ years",
    "education_required": "Bachelor"
}"#;

pub const GRADING_JSON: &str = r#"{"final_skill_match_score": 0.8, "missing_skills": ["Kafka"]}"#;

/// Answers each of the three prompts with a fixed reply and counts calls.
pub struct ScriptedBackend {
    pub candidate: String,
    pub job: String,
    pub grading: String,
    pub fail: bool,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(candidate: &str, job: &str, grading: &str) -> Self {
        Self {
            candidate: candidate.to_string(),
            job: job.to_string(),
            grading: grading.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn happy() -> Self {
        Self::new(CANDIDATE_JSON, JOB_JSON, GRADING_JSON)
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::happy()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete_json(&self, system: &str, _user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LlmError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            });
        }

        let reply = if system.starts_with(CANDIDATE_EXTRACTION_SYSTEM) {
            &self.candidate
        } else if system.starts_with(JOB_EXTRACTION_SYSTEM) {
            &self.job
        } else if system.starts_with(SKILL_GRADING_SYSTEM) {
            &self.grading
        } else {
            return Err(LlmError::EmptyContent);
        };
        Ok(reply.clone())
    }
}
