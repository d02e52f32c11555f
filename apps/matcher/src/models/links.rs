use serde::{Deserialize, Serialize};

/// Profile links and phone numbers pulled out of the résumé document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileInfo {
    pub linkedin: String,
    pub mail: String,
    pub medium: String,
    pub contact: Vec<String>,
    pub location: String,
}

/// Everything the document extractor found besides the text itself.
/// Links that are not a known profile host land in `projects`, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedLinks {
    pub profile_info: ProfileInfo,
    pub projects: Vec<String>,
}
