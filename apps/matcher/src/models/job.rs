//! Job requirements as produced by job-description extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::extracted::{first_record, LlmRecord};
use crate::models::lenient::{lenient_string, lenient_strings};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub skills_required: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub skills_optional: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tools_and_technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub responsibilities: Vec<String>,
    /// Free text such as "3+ years"; may carry no number at all.
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience_required: String,
    /// Free-text degree requirement; empty when the posting states none.
    #[serde(default, deserialize_with = "lenient_string")]
    pub education_required: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LlmRecord for JobRequirements {
    fn from_llm_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(first_record(value))
    }
}
