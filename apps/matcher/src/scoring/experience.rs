//! Experience scoring.
//!
//! Work history arrives as a list of engagements of mixed kinds. Months are
//! summed per kind, converted to years, then weighted into a single
//! "effective years" figure that is compared with the posting's stated minimum.

use serde::Serialize;

use crate::models::candidate::ExperienceRecord;
use crate::scoring::config::ExperienceWeights;
use crate::scoring::round_to;

/// Candidates within this many years below the requirement score `NEAR_MISS_SCORE`.
const NEAR_MISS_BAND_YEARS: f64 = 1.0;
const NEAR_MISS_SCORE: f64 = 0.6;
const SHORTFALL_SCORE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceKind {
    Internship,
    Apprentice,
    FullTime,
    PartTime,
    Freelance,
    Unclassified,
}

impl ExperienceKind {
    /// Case-insensitive, whitespace-trimmed match on the recognized labels.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "internship" => ExperienceKind::Internship,
            "apprentice" => ExperienceKind::Apprentice,
            "full time" => ExperienceKind::FullTime,
            "part time" => ExperienceKind::PartTime,
            "free lance" => ExperienceKind::Freelance,
            _ => ExperienceKind::Unclassified,
        }
    }
}

/// Years per bucket plus the weighted total, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExperienceBreakdown {
    pub internship_years: f64,
    pub apprentice_years: f64,
    pub industry_years: f64,
    pub part_time_years: f64,
    pub freelance_years: f64,
    pub effective_years: f64,
}

/// Aggregates a work history into per-kind years and effective years.
///
/// Unclassified records are not dropped: a fixed share of their months
/// (`unclassified_factor`) is credited to the apprentice bucket.
pub fn aggregate(records: &[ExperienceRecord], weights: &ExperienceWeights) -> ExperienceBreakdown {
    let mut internship = 0.0;
    let mut apprentice = 0.0;
    let mut industry = 0.0;
    let mut part_time = 0.0;
    let mut freelance = 0.0;

    for record in records {
        let months = record.duration_months;
        match ExperienceKind::from_label(&record.kind) {
            ExperienceKind::Internship => internship += months,
            ExperienceKind::Apprentice => apprentice += months,
            ExperienceKind::FullTime => industry += months,
            ExperienceKind::PartTime => part_time += months,
            ExperienceKind::Freelance => freelance += months,
            ExperienceKind::Unclassified => apprentice += weights.unclassified_factor * months,
        }
    }

    let [internship, apprentice, industry, part_time, freelance] =
        [internship, apprentice, industry, part_time, freelance].map(|months| months / 12.0);

    let effective = weights.industry * industry
        + weights.internship * internship
        + weights.apprentice * apprentice
        + weights.part_time * part_time
        + weights.freelance * freelance;

    ExperienceBreakdown {
        internship_years: round_to(internship, 2),
        apprentice_years: round_to(apprentice, 2),
        industry_years: round_to(industry, 2),
        part_time_years: round_to(part_time, 2),
        freelance_years: round_to(freelance, 2),
        effective_years: round_to(effective, 2),
    }
}

/// Scores effective years against a free-text requirement such as "3+ years".
///
/// No number in the requirement means no requirement, which scores 1.0.
pub fn experience_match(effective_years: f64, requirement: &str) -> f64 {
    let Some(required) = required_years(requirement) else {
        return 1.0;
    };

    if effective_years >= required {
        1.0
    } else if effective_years >= required - NEAR_MISS_BAND_YEARS {
        NEAR_MISS_SCORE
    } else {
        SHORTFALL_SCORE
    }
}

/// First contiguous run of ASCII digits, so "2-4 years" reads as 2.
fn required_years(requirement: &str) -> Option<f64> {
    let digits: String = requirement
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        None
    } else {
        digits.parse::<f64>().ok()
    }
}
