//! Matching pipeline: candidate extraction, job extraction, then scoring.
//!
//! A run is strictly sequential and owns its `MatchContext`. Pipelines are
//! cheap to clone; independent runs share only the model backend and the
//! scoring config, both read-only.

pub mod context;
pub mod handlers;
pub mod prompts;
pub mod stages;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::LlmBackend;
use crate::models::extracted::Extracted;
use crate::models::job::JobRequirements;
use crate::pipeline::context::{MatchContext, MatchInput, MatchOutcome, StageDelta};
use crate::scoring::config::ScoringConfig;
use crate::scoring::skills::build_payload;
use crate::scoring::{score_match, ScoreBundle};

#[derive(Clone)]
pub struct MatchingPipeline {
    llm: Arc<dyn LlmBackend>,
    config: Arc<ScoringConfig>,
}

impl MatchingPipeline {
    pub fn new(llm: Arc<dyn LlmBackend>, config: Arc<ScoringConfig>) -> Self {
        Self { llm, config }
    }

    /// Runs every stage in order and returns the scored outcome.
    /// Fails only when the model cannot be reached.
    pub async fn run(&self, input: MatchInput) -> Result<MatchOutcome, AppError> {
        let ctx = MatchContext::new(input);
        let run_id = ctx.run_id;
        info!(%run_id, "Match run started");

        let delta = self.candidate_stage(&ctx).await?;
        let ctx = advance(ctx, delta)?;
        info!(%run_id, "Candidate extracted");

        let delta = self.job_stage(&ctx).await?;
        let ctx = advance(ctx, delta)?;
        info!(%run_id, "Job description extracted");

        let delta = self.matching_stage(&ctx).await?;
        let ctx = advance(ctx, delta)?;

        let outcome = ctx
            .into_outcome()
            .map_err(|e| AppError::Internal(e.into()))?;
        info!(
            %run_id,
            final_match_score = outcome.final_match_score,
            "Match run finished"
        );
        Ok(outcome)
    }

    /// Job description extraction on its own, outside a match run.
    pub async fn extract_job(
        &self,
        job_description: &str,
    ) -> Result<Extracted<JobRequirements>, AppError> {
        stages::extract_job(self.llm.as_ref(), job_description).await
    }

    async fn candidate_stage(&self, ctx: &MatchContext) -> Result<StageDelta, AppError> {
        let candidate =
            stages::extract_candidate(self.llm.as_ref(), &ctx.input.raw_text, &ctx.input.links)
                .await?;
        Ok(StageDelta::CandidateExtracted(candidate))
    }

    async fn job_stage(&self, ctx: &MatchContext) -> Result<StageDelta, AppError> {
        let job = stages::extract_job(self.llm.as_ref(), &ctx.input.job_description).await?;
        Ok(StageDelta::JobExtracted(job))
    }

    async fn matching_stage(&self, ctx: &MatchContext) -> Result<StageDelta, AppError> {
        let candidate = record_or_default(ctx.candidate.as_ref(), "candidate", ctx);
        let job = record_or_default(ctx.job.as_ref(), "job description", ctx);

        let payload = build_payload(&candidate, &job);
        let skill_match = stages::grade_skills(self.llm.as_ref(), &payload).await?;
        let bundle: ScoreBundle = score_match(&candidate, &job, skill_match, &self.config);

        info!(
            run_id = %ctx.run_id,
            experience_score = bundle.experience_score,
            education_score = bundle.education_score,
            skill_score = bundle.skill_match_score.final_skill_match_score,
            "Scores computed"
        );
        Ok(StageDelta::Matched(bundle))
    }
}

fn advance(ctx: MatchContext, delta: StageDelta) -> Result<MatchContext, AppError> {
    ctx.apply(delta).map_err(|e| AppError::Internal(e.into()))
}

/// Degraded or missing records score as if every field were empty.
fn record_or_default<T: Clone + Default>(
    record: Option<&Extracted<T>>,
    what: &str,
    ctx: &MatchContext,
) -> T {
    match record {
        Some(Extracted::Parsed(value)) => value.clone(),
        Some(Extracted::Degraded(d)) => {
            warn!(run_id = %ctx.run_id, "Scoring with empty {what}: {}", d.error);
            T::default()
        }
        None => T::default(),
    }
}
