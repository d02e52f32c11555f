//! Education scoring: ordinal degree-level match blended with a coarse
//! field-relevance check on the candidate's stream.

use std::fmt;

use crate::scoring::config::{DegreeSynonyms, EducationConfig};
use crate::scoring::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeLevel {
    Bachelor,
    Master,
    Phd,
    Diploma,
    Unknown,
}

impl DegreeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLevel::Bachelor => "bachelor",
            DegreeLevel::Master => "master",
            DegreeLevel::Phd => "phd",
            DegreeLevel::Diploma => "diploma",
            DegreeLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps free-text degree names to a level by substring match.
///
/// Levels are tried in the order bachelor, master, phd, diploma; the first
/// synonym list with a hit wins.
pub fn normalize_degree(text: &str, synonyms: &DegreeSynonyms) -> DegreeLevel {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return DegreeLevel::Unknown;
    }

    let ordered = [
        (DegreeLevel::Bachelor, &synonyms.bachelor),
        (DegreeLevel::Master, &synonyms.master),
        (DegreeLevel::Phd, &synonyms.phd),
        (DegreeLevel::Diploma, &synonyms.diploma),
    ];

    ordered
        .into_iter()
        .find(|(_, list)| contains_any(&text, list))
        .map(|(level, _)| level)
        .unwrap_or(DegreeLevel::Unknown)
}

/// 1.0 when the posting states no requirement, otherwise a fixed score for
/// technical vs. non-technical streams.
pub fn field_relevance(candidate_stream: &str, requirement: &str, config: &EducationConfig) -> f64 {
    if requirement.trim().is_empty() {
        return 1.0;
    }

    if contains_any(&candidate_stream.to_lowercase(), &config.relevant_fields) {
        config.relevant_field_score
    } else {
        config.other_field_score
    }
}

/// Level score from the ordinal comparison table.
fn level_score(candidate: DegreeLevel, required: DegreeLevel) -> f64 {
    use DegreeLevel::*;

    match (candidate, required) {
        (c, r) if c == r => 1.0,
        (Master, Bachelor) => 1.0,
        (Bachelor, Master) => 0.6,
        (Diploma, Bachelor) => 0.5,
        _ => 0.4,
    }
}

/// Education score in [0, 1], rounded to 3 decimals.
pub fn degree_match(
    candidate_degree: &str,
    candidate_stream: &str,
    requirement: &str,
    config: &EducationConfig,
) -> f64 {
    if requirement.trim().is_empty() {
        return 1.0;
    }

    let candidate_level = normalize_degree(candidate_degree, &config.degrees);
    let required_level = normalize_degree(requirement, &config.degrees);
    let level = level_score(candidate_level, required_level);
    let field = field_relevance(candidate_stream, requirement, config);

    round_to(config.level_weight * level + config.field_weight * field, 3)
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| {
        let needle = needle.trim().to_lowercase();
        !needle.is_empty() && haystack.contains(&needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> DegreeLevel {
        normalize_degree(text, &DegreeSynonyms::default())
    }

    fn score(degree: &str, stream: &str, required: &str) -> f64 {
        degree_match(degree, stream, required, &EducationConfig::default())
    }

    #[test]
    fn test_normalize_common_degrees() {
        assert_eq!(normalize("B.Tech"), DegreeLevel::Bachelor);
        assert_eq!(normalize("Bachelor of Engineering"), DegreeLevel::Bachelor);
        assert_eq!(normalize("M.Tech in VLSI"), DegreeLevel::Master);
        assert_eq!(normalize("MBA"), DegreeLevel::Master);
        assert_eq!(normalize("PhD in CS"), DegreeLevel::Phd);
        assert_eq!(normalize("Doctorate"), DegreeLevel::Phd);
        assert_eq!(normalize("Diploma"), DegreeLevel::Diploma);
    }

    #[test]
    fn test_normalize_empty_or_unmatched_is_unknown() {
        assert_eq!(normalize(""), DegreeLevel::Unknown);
        assert_eq!(normalize("   "), DegreeLevel::Unknown);
        assert_eq!(normalize("High School"), DegreeLevel::Unknown);
    }

    #[test]
    fn test_normalize_diploma_in_mechanical_is_not_master() {
        assert_eq!(normalize("Diploma in Mechanical Engineering"), DegreeLevel::Diploma);
    }

    #[test]
    fn test_degree_level_displays_lowercase() {
        assert_eq!(DegreeLevel::Phd.as_str(), "phd");
        assert_eq!(DegreeLevel::Bachelor.to_string(), "bachelor");
    }

    #[test]
    fn test_blank_requirement_scores_one() {
        assert_eq!(score("B.Tech", "Computer Science", ""), 1.0);
        assert_eq!(score("", "", ""), 1.0);
        assert_eq!(score("Diploma", "Arts", "   "), 1.0);
    }

    #[test]
    fn test_bachelor_in_cs_for_bachelor_role() {
        assert_eq!(score("B.Tech", "Computer Science", "Bachelor"), 0.97);
    }

    #[test]
    fn test_diploma_mechanical_for_bachelor_role() {
        assert_eq!(score("Diploma", "Mechanical", "Bachelor"), 0.5);
    }

    #[test]
    fn test_master_accepted_for_bachelor_role() {
        assert_eq!(score("M.Tech", "Data Science", "Bachelor's degree"), 0.97);
    }

    #[test]
    fn test_bachelor_for_master_role() {
        // 0.7 * 0.6 + 0.3 * 0.9
        assert_eq!(score("B.E", "Electronics", "Master's in Electronics"), 0.69);
    }

    #[test]
    fn test_other_mismatch_scores_point_four_level() {
        // phd candidate for a diploma requirement: 0.7 * 0.4 + 0.3 * 0.5
        assert_eq!(score("PhD", "History", "Diploma"), 0.43);
    }

    #[test]
    fn test_field_relevance() {
        let config = EducationConfig::default();
        assert_eq!(field_relevance("Information Technology", "Bachelor", &config), 0.9);
        assert_eq!(field_relevance("Mechanical", "Bachelor", &config), 0.5);
        assert_eq!(field_relevance("", "Bachelor", &config), 0.5);
        assert_eq!(field_relevance("Mechanical", "", &config), 1.0);
    }

    #[test]
    fn test_level_table() {
        use DegreeLevel::*;
        assert_eq!(level_score(Phd, Phd), 1.0);
        assert_eq!(level_score(Unknown, Unknown), 1.0);
        assert_eq!(level_score(Master, Bachelor), 1.0);
        assert_eq!(level_score(Bachelor, Master), 0.6);
        assert_eq!(level_score(Diploma, Bachelor), 0.5);
        assert_eq!(level_score(Phd, Bachelor), 0.4);
        assert_eq!(level_score(Bachelor, Phd), 0.4);
    }
}
