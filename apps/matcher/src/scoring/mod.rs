//! Scoring engine: pure functions from a candidate profile, job requirements
//! and an already-graded skill verdict to a match score bundle.
//!
//! Nothing in here performs I/O. The grading call itself lives in the pipeline.

pub mod combiner;
pub mod config;
pub mod education;
pub mod experience;
pub mod skills;

use serde::Serialize;

use crate::models::candidate::CandidateProfile;
use crate::models::job::JobRequirements;
use crate::scoring::combiner::combine;
use crate::scoring::config::ScoringConfig;
use crate::scoring::education::degree_match;
use crate::scoring::experience::{aggregate, experience_match, ExperienceBreakdown};
use crate::scoring::skills::SkillMatch;

/// All sub-scores and the combined score for one candidate/job pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBundle {
    pub experience_score: f64,
    pub education_score: f64,
    pub skill_match_score: SkillMatch,
    /// Rounded to 3 decimals.
    pub final_match_score: f64,
    pub experience_breakdown: ExperienceBreakdown,
}

pub fn score_match(
    candidate: &CandidateProfile,
    jd: &JobRequirements,
    skill_match: SkillMatch,
    config: &ScoringConfig,
) -> ScoreBundle {
    let experience_breakdown = aggregate(&candidate.experience, &config.experience);
    let experience_score =
        experience_match(experience_breakdown.effective_years, &jd.experience_required);

    let (degree, stream) = candidate
        .primary_education()
        .map(|e| (e.degree.as_str(), e.stream.as_str()))
        .unwrap_or(("", ""));
    let education_score = degree_match(degree, stream, &jd.education_required, &config.education);

    let final_match_score = round_to(
        combine(
            experience_score,
            education_score,
            skill_match.final_skill_match_score,
            &config.weights,
        ),
        3,
    );

    ScoreBundle {
        experience_score,
        education_score,
        skill_match_score: skill_match,
        final_match_score,
        experience_breakdown,
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
