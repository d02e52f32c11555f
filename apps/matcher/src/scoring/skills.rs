//! Skill scoring adapter.
//!
//! Skill alignment is graded by the language model, not computed here. This
//! module only shapes the grading payload and reads the verdict back out of
//! whatever the grader returned.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::models::candidate::{CandidateProfile, ExperienceRecord};
use crate::models::extracted::INVALID_JSON;
use crate::models::job::JobRequirements;

pub const SCORE_FIELD: &str = "final_skill_match_score";

/// The grader's only input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillPayload {
    pub jd_required_skills: Vec<String>,
    pub jd_optional_skills: Vec<String>,
    pub jd_tools: Vec<String>,
    pub jd_responsibilities: Vec<String>,
    /// Technical skills followed by tools.
    pub candidate_skills: Vec<String>,
    pub candidate_tools: Vec<String>,
    pub candidate_projects: Vec<Value>,
    pub candidate_experience: Vec<ExperienceRecord>,
    pub candidate_certifications: Vec<Value>,
}

pub fn build_payload(candidate: &CandidateProfile, jd: &JobRequirements) -> SkillPayload {
    let skills = &candidate.skills;
    let candidate_skills = skills
        .technical
        .iter()
        .chain(skills.tools.iter())
        .cloned()
        .collect();

    SkillPayload {
        jd_required_skills: jd.skills_required.clone(),
        jd_optional_skills: jd.skills_optional.clone(),
        jd_tools: jd.tools_and_technologies.clone(),
        jd_responsibilities: jd.responsibilities.clone(),
        candidate_skills,
        candidate_tools: skills.tools.clone(),
        candidate_projects: candidate.projects.clone(),
        candidate_experience: candidate.experience.clone(),
        candidate_certifications: candidate.certifications.clone(),
    }
}

/// Reads the grader's verdict. A list is reduced to its first element; a
/// missing or non-numeric score reads as 0. The result is kept inside [0, 1].
pub fn extract_skill_score(result: &Value) -> f64 {
    let record = match result {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    let score = record
        .and_then(|r| r.get(SCORE_FIELD))
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(0.0);

    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Grader verdict plus whatever else the grader said, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub final_skill_match_score: f64,
    pub detail: Value,
}

impl SkillMatch {
    /// Never fails: text that is not JSON becomes an error record scoring 0.
    pub fn from_grader_output(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                warn!("Skill grader returned invalid JSON: {e}");
                Self {
                    final_skill_match_score: 0.0,
                    detail: json!({ "error": INVALID_JSON, "raw_output": raw }),
                }
            }
        }
    }

    pub fn from_value(value: Value) -> Self {
        let detail = match value {
            Value::Array(items) => items
                .into_iter()
                .next()
                .unwrap_or_else(|| Value::Object(Map::new())),
            other => other,
        };

        if detail.get(SCORE_FIELD).is_none() {
            warn!("Skill grader result has no {SCORE_FIELD}; scoring 0");
        }

        Self {
            final_skill_match_score: extract_skill_score(&detail),
            detail,
        }
    }

    /// The grader's object with the normalized score written into it.
    pub fn to_value(&self) -> Value {
        let mut object = match &self.detail {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("raw_output".to_string(), other.clone());
                map
            }
        };
        object.insert(SCORE_FIELD.to_string(), json!(self.final_skill_match_score));
        Value::Object(object)
    }
}

impl Serialize for SkillMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
