//! The three model calls of a match run. Each returns what the model said,
//! already converted; only a failure to reach the model is an error.

use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::with_json_only;
use crate::llm_client::LlmBackend;
use crate::models::candidate::{CandidateProfile, Contact};
use crate::models::extracted::Extracted;
use crate::models::job::JobRequirements;
use crate::models::links::ExtractedLinks;
use crate::pipeline::prompts::{
    CANDIDATE_EXTRACTION_SYSTEM, JOB_EXTRACTION_SYSTEM, SKILL_GRADING_SYSTEM,
};
use crate::scoring::skills::{SkillMatch, SkillPayload};

/// Extracts the candidate profile. The contact block always comes from the
/// links found in the document, never from the model.
pub async fn extract_candidate(
    llm: &dyn LlmBackend,
    raw_text: &str,
    links: &ExtractedLinks,
) -> Result<Extracted<CandidateProfile>, AppError> {
    let links_json = serde_json::to_string_pretty(links)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Serializing links failed: {e}")))?;
    let user = format!("RAW RESUME TEXT:\n\n{raw_text}\n\nEXTRACTED LINKS JSON:\n{links_json}");

    let raw = llm
        .complete_json(&with_json_only(CANDIDATE_EXTRACTION_SYSTEM), &user)
        .await
        .map_err(|e| AppError::Llm(format!("Candidate extraction failed: {e}")))?;
    debug!("Candidate extraction returned {} bytes", raw.len());

    let contact = Contact::from_links(links);
    Ok(Extracted::<CandidateProfile>::from_llm_output(&raw).map(|p| p.with_contact(contact)))
}

pub async fn extract_job(
    llm: &dyn LlmBackend,
    job_description: &str,
) -> Result<Extracted<JobRequirements>, AppError> {
    let raw = llm
        .complete_json(&with_json_only(JOB_EXTRACTION_SYSTEM), job_description)
        .await
        .map_err(|e| AppError::Llm(format!("Job description extraction failed: {e}")))?;
    debug!("Job extraction returned {} bytes", raw.len());

    Ok(Extracted::from_llm_output(&raw))
}

pub async fn grade_skills(
    llm: &dyn LlmBackend,
    payload: &SkillPayload,
) -> Result<SkillMatch, AppError> {
    let user = serde_json::to_string(payload)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Serializing skill payload failed: {e}")))?;

    let raw = llm
        .complete_json(&with_json_only(SKILL_GRADING_SYSTEM), &user)
        .await
        .map_err(|e| AppError::Llm(format!("Skill grading failed: {e}")))?;

    Ok(SkillMatch::from_grader_output(&raw))
}
