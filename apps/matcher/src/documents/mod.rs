//! Résumé document extraction: text plus the profile links and phone
//! numbers found in it. Runs ahead of the matching pipeline.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::links::ExtractedLinks;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Document contains no extractable text")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub raw_text: String,
    pub links: ExtractedLinks,
}

pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// Extracts a PDF held in memory. CPU-bound; call from a blocking task.
pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedDocument, DocumentError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(DocumentError::Empty);
    }

    Ok(extract_from_text(&text))
}

/// Cleans document text and collects links and phone numbers from it.
///
/// Links are read from the text before cleaning, since cleaning blanks out
/// the punctuation URLs are made of.
pub fn extract_from_text(text: &str) -> ExtractedDocument {
    let mut links = harvest_links(text);
    let raw_text = clean_text(text);
    links.profile_info.contact = phone_numbers(&raw_text);

    ExtractedDocument { raw_text, links }
}

static NON_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^a-zA-Z0-9'"\s]"#).expect("valid regex"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-9]{10}\b").expect("valid regex"));

// A URL-like token (ending on a non-punctuation char) or a bare e-mail address.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:https?://|www\.|mailto:)[^\s<>()\[\]"']*[^\s<>()\[\]"'.,;:]|[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}"#,
    )
    .expect("valid regex")
});

const URL_PREFIXES: [&str; 4] = ["http://", "https://", "www.", "mailto:"];

/// Replaces everything but ASCII letters, digits, quotes and whitespace with a space.
fn clean_text(text: &str) -> String {
    NON_TEXT.replace_all(text, " ").into_owned()
}

/// Standalone ten-digit numbers, deduplicated in order of appearance.
fn phone_numbers(clean: &str) -> Vec<String> {
    let mut numbers: Vec<String> = Vec::new();
    for m in PHONE.find_iter(clean) {
        if !numbers.iter().any(|n| n == m.as_str()) {
            numbers.push(m.as_str().to_string());
        }
    }
    numbers
}

fn harvest_links(text: &str) -> ExtractedLinks {
    let mut links = ExtractedLinks::default();

    for m in LINK.find_iter(text) {
        let link = m.as_str();
        let lower = link.to_lowercase();
        let is_email = !URL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix));

        let profile = &mut links.profile_info;
        if is_email || lower.starts_with("mailto:") || lower.contains("gmail") {
            if profile.mail.is_empty() {
                let mail = if lower.starts_with("mailto:") {
                    link.get("mailto:".len()..).unwrap_or(link)
                } else {
                    link
                };
                profile.mail = mail.to_string();
            }
        } else if lower.contains("linkedin") {
            if profile.linkedin.is_empty() {
                profile.linkedin = link.to_string();
            }
        } else if lower.contains("medium") {
            if profile.medium.is_empty() {
                profile.medium = link.to_string();
            }
        } else if !links.projects.iter().any(|p| p == link) {
            links.projects.push(link.to_string());
        }
    }

    links
}
