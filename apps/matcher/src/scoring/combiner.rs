use crate::scoring::config::ScoreWeights;

/// Weighted sum of the three sub-scores. With the default weights skills
/// dominate (0.70); experience (0.20) and education (0.10) are secondary.
pub fn combine(experience: f64, education: f64, skills: f64, weights: &ScoreWeights) -> f64 {
    weights.experience * experience + weights.education * education + weights.skills * skills
}
