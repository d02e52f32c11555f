use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-oss-20b";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    /// Unset means the built-in scoring weights and keyword lists.
    pub scoring_config_path: Option<PathBuf>,
    pub batch_concurrency: usize,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_api_key = get("LLM_API_KEY")
            .with_context(|| "Required environment variable 'LLM_API_KEY' is not set")?;

        let timeout_secs: u64 = parse_var(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", 120)?;
        let batch_concurrency: usize = parse_var(get("BATCH_CONCURRENCY"), "BATCH_CONCURRENCY", 4)?;
        let max_upload_mb: usize = parse_var(get("MAX_UPLOAD_MB"), "MAX_UPLOAD_MB", 10)?;

        if batch_concurrency == 0 {
            anyhow::bail!("BATCH_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            llm_api_key,
            llm_base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout: Duration::from_secs(timeout_secs),
            scoring_config_path: get("SCORING_CONFIG_PATH").map(PathBuf::from),
            batch_concurrency,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            port: parse_var(get("PORT"), "PORT", 8000)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_var<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = Config::from_lookup(lookup(&[("LLM_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.llm_api_key, "sk-test");
        assert_eq!(config.llm_base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.llm_timeout, Duration::from_secs(120));
        assert!(config.scoring_config_path.is_none());
        assert_eq!(config.batch_concurrency, 4);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("LLM_API_KEY"));

        // blank counts as missing
        assert!(Config::from_lookup(lookup(&[("LLM_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LLM_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "http://localhost:11434/v1"),
            ("LLM_MODEL", "llama3"),
            ("LLM_TIMEOUT_SECS", "30"),
            ("SCORING_CONFIG_PATH", "/etc/matcher/scoring.toml"),
            ("BATCH_CONCURRENCY", "8"),
            ("MAX_UPLOAD_MB", "2"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.llm_model, "llama3");
        assert_eq!(config.llm_timeout, Duration::from_secs(30));
        assert_eq!(
            config.scoring_config_path,
            Some(PathBuf::from("/etc/matcher/scoring.toml"))
        );
        assert_eq!(config.batch_concurrency, 8);
        assert_eq!(config.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_numbers_fail() {
        let err = Config::from_lookup(lookup(&[("LLM_API_KEY", "k"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(
            Config::from_lookup(lookup(&[("LLM_API_KEY", "k"), ("BATCH_CONCURRENCY", "0")]))
                .is_err()
        );
    }
}
