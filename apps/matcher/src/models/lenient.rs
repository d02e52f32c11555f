//! Serde helpers for model-generated JSON.
//!
//! Extraction output is noisy: nulls where lists belong, numbers quoted as
//! strings, a single string where an array was asked for. These helpers fold
//! that noise into the defaults the scoring code expects instead of failing
//! the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` (or a missing field, together with `#[serde(default)]`) becomes `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a string, a number, a bool or a list of those. Anything else is "".
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_string).unwrap_or_default())
}

/// Accepts a list of scalars or a single scalar. Nulls and nested objects are dropped.
pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(other) => {
            let single = value_to_string(&other);
            if single.is_empty() {
                vec![]
            } else {
                vec![single]
            }
        }
        None => vec![],
    })
}

/// Pass-through records (projects, certifications). A lone object or scalar
/// is wrapped into a one-element list; nulls and blank strings are dropped.
pub fn lenient_values<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let keep = |v: &Value| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    };
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter(keep).collect(),
        Some(other) if keep(&other) => vec![other],
        _ => vec![],
    })
}

/// Non-negative number; quoted numbers are parsed, anything unparseable is 0.
pub fn lenient_months<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let months = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if months.is_finite() { months.max(0.0) } else { 0.0 })
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => String::new(),
    }
}
