//! Per-run pipeline context.
//!
//! The context is a value, not a shared mutable record: every stage reads
//! the current context and returns a `StageDelta`, and `apply` produces the
//! next context. Stages run in a fixed order and `apply` rejects a delta that
//! does not belong to the next stage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::candidate::CandidateProfile;
use crate::models::extracted::Extracted;
use crate::models::job::JobRequirements;
use crate::models::links::ExtractedLinks;
use crate::scoring::experience::ExperienceBreakdown;
use crate::scoring::skills::SkillMatch;
use crate::scoring::ScoreBundle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    CandidateExtracted,
    JobExtracted,
    Matched,
}

/// Raw inputs of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchInput {
    pub raw_text: String,
    pub links: ExtractedLinks,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageDelta {
    CandidateExtracted(Extracted<CandidateProfile>),
    JobExtracted(Extracted<JobRequirements>),
    Matched(ScoreBundle),
}

impl StageDelta {
    fn target(&self) -> Stage {
        match self {
            StageDelta::CandidateExtracted(_) => Stage::CandidateExtracted,
            StageDelta::JobExtracted(_) => Stage::JobExtracted,
            StageDelta::Matched(_) => Stage::Matched,
        }
    }
}

#[derive(Debug, Error)]
#[error("cannot move pipeline from {from:?} to {to:?}")]
pub struct StageOrderError {
    pub from: Stage,
    pub to: Stage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub run_id: Uuid,
    pub input: MatchInput,
    pub candidate: Option<Extracted<CandidateProfile>>,
    pub job: Option<Extracted<JobRequirements>>,
    pub scores: Option<ScoreBundle>,
}

impl MatchContext {
    pub fn new(input: MatchInput) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            input,
            candidate: None,
            job: None,
            scores: None,
        }
    }

    pub fn stage(&self) -> Stage {
        match (&self.candidate, &self.job, &self.scores) {
            (_, _, Some(_)) => Stage::Matched,
            (_, Some(_), None) => Stage::JobExtracted,
            (Some(_), None, None) => Stage::CandidateExtracted,
            (None, None, None) => Stage::Start,
        }
    }

    fn next_stage(&self) -> Option<Stage> {
        match self.stage() {
            Stage::Start => Some(Stage::CandidateExtracted),
            Stage::CandidateExtracted => Some(Stage::JobExtracted),
            Stage::JobExtracted => Some(Stage::Matched),
            Stage::Matched => None,
        }
    }

    /// Returns the context that follows this one once `delta` is merged in.
    pub fn apply(self, delta: StageDelta) -> Result<Self, StageOrderError> {
        let from = self.stage();
        let to = delta.target();
        if self.next_stage() != Some(to) {
            return Err(StageOrderError { from, to });
        }

        Ok(match delta {
            StageDelta::CandidateExtracted(candidate) => Self {
                candidate: Some(candidate),
                ..self
            },
            StageDelta::JobExtracted(job) => Self {
                job: Some(job),
                ..self
            },
            StageDelta::Matched(scores) => Self {
                scores: Some(scores),
                ..self
            },
        })
    }

    /// Final result of a run. Only available once the context reached `Matched`.
    pub fn into_outcome(self) -> Result<MatchOutcome, StageOrderError> {
        let from = self.stage();
        match (self.candidate, self.job, self.scores) {
            (Some(candidate_info), Some(job_info), Some(scores)) => Ok(MatchOutcome {
                run_id: self.run_id,
                candidate_info,
                job_info,
                experience_score: scores.experience_score,
                education_score: scores.education_score,
                skill_match_score: scores.skill_match_score,
                final_match_score: scores.final_match_score,
                experience_breakdown: scores.experience_breakdown,
                matched_at: Utc::now(),
            }),
            _ => Err(StageOrderError {
                from,
                to: Stage::Matched,
            }),
        }
    }
}

/// What a caller gets back from one run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub run_id: Uuid,
    pub candidate_info: Extracted<CandidateProfile>,
    pub job_info: Extracted<JobRequirements>,
    pub experience_score: f64,
    pub education_score: f64,
    pub skill_match_score: SkillMatch,
    pub final_match_score: f64,
    pub experience_breakdown: ExperienceBreakdown,
    pub matched_at: DateTime<Utc>,
}
