//! Candidate profile as produced by résumé extraction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::extracted::{first_record, LlmRecord};
use crate::models::lenient::{
    lenient_months, lenient_string, lenient_strings, lenient_values, null_as_default,
};
use crate::models::links::ExtractedLinks;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub github: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub portfolio: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub other_links: Vec<String>,
}

impl Contact {
    /// Contact block taken from the document's own links rather than from the
    /// model, which tends to mangle URLs. The first two non-profile links are
    /// read as GitHub and portfolio.
    pub fn from_links(links: &ExtractedLinks) -> Self {
        let profile = &links.profile_info;
        Self {
            email: profile.mail.clone(),
            phone: profile.contact.join(", "),
            linkedin: profile.linkedin.clone(),
            github: links.projects.first().cloned().unwrap_or_default(),
            portfolio: links.projects.get(1).cloned().unwrap_or_default(),
            other_links: links.projects.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub stream: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One engagement from the work history. `kind` is free text; the
/// aggregator decides which category it falls in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_months")]
    pub duration_months: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub technical: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tools: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Skills,
    #[serde(default, deserialize_with = "lenient_values")]
    pub projects: Vec<Value>,
    #[serde(default, deserialize_with = "lenient_values")]
    pub certifications: Vec<Value>,
    /// Fields the scoring path does not read (name, summary, ...), kept for the caller.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateProfile {
    /// Only the first education entry counts for matching.
    pub fn primary_education(&self) -> Option<&EducationEntry> {
        self.education.first()
    }

    pub fn with_contact(self, contact: Contact) -> Self {
        Self { contact, ..self }
    }
}

impl LlmRecord for CandidateProfile {
    /// Accepts the profile object itself or an array whose first element is the profile.
    fn from_llm_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(first_record(value))
    }
}
