//! Tunable scoring data: sub-score weights, experience bucket weights,
//! degree synonyms and the technical-field keyword list.
//!
//! Loaded from a TOML file at startup (`SCORING_CONFIG_PATH`). Any table or
//! key left out of the file keeps its built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringConfigError {
    #[error("Failed to read scoring config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scoring config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid scoring config: {0}")]
    Invalid(String),
}

/// Weights of the three sub-scores in the final match score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub experience: f64,
    pub education: f64,
    pub skills: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            experience: 0.20,
            education: 0.10,
            skills: 0.70,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.experience + self.education + self.skills
    }
}

/// Multipliers applied to each experience bucket (in years) to get effective years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceWeights {
    pub industry: f64,
    pub internship: f64,
    pub apprentice: f64,
    pub part_time: f64,
    pub freelance: f64,
    /// Share of an unrecognized record's months credited to the apprentice bucket.
    pub unclassified_factor: f64,
}

impl Default for ExperienceWeights {
    fn default() -> Self {
        Self {
            industry: 1.0,
            internship: 0.5,
            apprentice: 0.6,
            part_time: 0.4,
            freelance: 0.7,
            unclassified_factor: 0.5,
        }
    }
}

/// Lower-case substrings that identify each degree level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegreeSynonyms {
    pub bachelor: Vec<String>,
    pub master: Vec<String>,
    pub phd: Vec<String>,
    pub diploma: Vec<String>,
}

impl Default for DegreeSynonyms {
    fn default() -> Self {
        Self {
            bachelor: strings(&[
                "b.tech", "btech", "b tech", "b.e", "b.sc", "bsc", "bca", "bachelor",
            ]),
            master: strings(&[
                "m.tech", "mtech", "m tech", "m.e", "m.sc", "msc", "m.s", "mba", "mca", "master",
            ]),
            phd: strings(&["phd", "ph.d", "doctor", "doctorate", "doctoral"]),
            diploma: strings(&["diploma", "polytechnic"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationConfig {
    pub level_weight: f64,
    pub field_weight: f64,
    pub relevant_field_score: f64,
    pub other_field_score: f64,
    /// Substrings of a candidate's stream that mark it as a technical field.
    pub relevant_fields: Vec<String>,
    pub degrees: DegreeSynonyms,
}

impl Default for EducationConfig {
    fn default() -> Self {
        Self {
            level_weight: 0.7,
            field_weight: 0.3,
            relevant_field_score: 0.9,
            other_field_score: 0.5,
            relevant_fields: strings(&[
                "computer",
                "cs",
                "cse",
                "it",
                "information technology",
                "ai",
                "ml",
                "data",
                "data science",
                "ds",
                "ece",
                "eee",
                "electronics",
                "csbs",
            ]),
            degrees: DegreeSynonyms::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Free-form label echoed in logs so a score can be traced to the data that produced it.
    pub version: String,
    pub weights: ScoreWeights,
    pub experience: ExperienceWeights,
    pub education: EducationConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            version: "builtin-1".to_string(),
            weights: ScoreWeights::default(),
            experience: ExperienceWeights::default(),
            education: EducationConfig::default(),
        }
    }
}

impl ScoringConfig {
    pub fn load(path: &Path) -> Result<Self, ScoringConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ScoringConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("weights.experience", w.experience),
            ("weights.education", w.education),
            ("weights.skills", w.skills),
        ] {
            check_unit(name, value)?;
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(ScoringConfigError::Invalid(format!(
                "weights must sum to 1.0, got {}",
                w.sum()
            )));
        }

        let e = &self.experience;
        for (name, value) in [
            ("experience.industry", e.industry),
            ("experience.internship", e.internship),
            ("experience.apprentice", e.apprentice),
            ("experience.part_time", e.part_time),
            ("experience.freelance", e.freelance),
            ("experience.unclassified_factor", e.unclassified_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let edu = &self.education;
        for (name, value) in [
            ("education.level_weight", edu.level_weight),
            ("education.field_weight", edu.field_weight),
            ("education.relevant_field_score", edu.relevant_field_score),
            ("education.other_field_score", edu.other_field_score),
        ] {
            check_unit(name, value)?;
        }
        if (edu.level_weight + edu.field_weight - 1.0).abs() > 1e-6 {
            return Err(ScoringConfigError::Invalid(
                "education.level_weight + education.field_weight must equal 1.0".to_string(),
            ));
        }

        for (name, list) in [
            ("education.relevant_fields", &edu.relevant_fields),
            ("education.degrees.bachelor", &edu.degrees.bachelor),
            ("education.degrees.master", &edu.degrees.master),
            ("education.degrees.phd", &edu.degrees.phd),
            ("education.degrees.diploma", &edu.degrees.diploma),
        ] {
            if list.iter().all(|s| s.trim().is_empty()) {
                return Err(ScoringConfigError::Invalid(format!(
                    "{name} must contain at least one entry"
                )));
            }
        }

        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> Result<(), ScoringConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScoringConfigError::Invalid(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
