//! Result type for structured-extraction output.
//!
//! A model call that comes back as something other than the requested JSON
//! does not fail the run: it yields a `Degraded` record carrying the raw text,
//! and scoring continues on defaulted fields. Callers can tell the two cases
//! apart without sniffing for an `error` key.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const INVALID_JSON: &str = "Invalid JSON returned";

/// Marker left in place of a record the model failed to produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegradedRecord {
    pub error: String,
    pub raw_output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Extracted<T> {
    Parsed(T),
    Degraded(DegradedRecord),
}

/// Conversion from the model's JSON value into a typed record.
/// Implementors decide which JSON shapes they tolerate.
pub trait LlmRecord: Sized {
    fn from_llm_value(value: Value) -> Result<Self, serde_json::Error>;
}

impl<T: LlmRecord> Extracted<T> {
    /// Parses raw model output. Non-JSON text and JSON of the wrong shape both
    /// degrade; neither is an error.
    pub fn from_llm_output(raw: &str) -> Self {
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!("Extraction returned invalid JSON: {e}");
                return Self::degraded(INVALID_JSON, raw);
            }
        };

        match T::from_llm_value(value) {
            Ok(record) => Extracted::Parsed(record),
            Err(e) => {
                warn!("Extraction returned JSON of unexpected shape: {e}");
                Self::degraded(format!("Unexpected JSON shape returned: {e}"), raw)
            }
        }
    }
}

impl<T> Extracted<T> {
    pub fn degraded(error: impl Into<String>, raw_output: &str) -> Self {
        Extracted::Degraded(DegradedRecord {
            error: error.into(),
            raw_output: raw_output.to_string(),
        })
    }

    pub fn parsed(&self) -> Option<&T> {
        match self {
            Extracted::Parsed(record) => Some(record),
            Extracted::Degraded(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Extracted::Degraded(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Parsed(record) => Extracted::Parsed(f(record)),
            Extracted::Degraded(d) => Extracted::Degraded(d),
        }
    }
}

/// Models sometimes wrap the record in a one-element array.
/// An empty array reads as an empty object.
pub(crate) fn first_record(value: Value) -> Value {
    match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .unwrap_or_else(|| Value::Object(Default::default())),
        other => other,
    }
}
