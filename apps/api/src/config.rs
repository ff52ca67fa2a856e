use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup only when a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing key is not fatal: generation calls fail until it is provided.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub session_idle_timeout: Duration,
    pub session_sweep_interval: Duration,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            port: parse_env("PORT", 8080)?,
            session_idle_timeout: Duration::from_secs(parse_env(
                "SESSION_IDLE_TIMEOUT_SECS",
                3600,
            )?),
            session_sweep_interval: Duration::from_secs(require_nonzero(
                "SESSION_SWEEP_INTERVAL_SECS",
                parse_env("SESSION_SWEEP_INTERVAL_SECS", 60)?,
            )?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'"))
}

fn require_nonzero(key: &str, value: u64) -> Result<u64> {
    if value == 0 {
        bail!("Environment variable '{key}' must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_padded_number() {
        let port: u16 = parse_value("PORT", " 9000 ").unwrap();
        assert_eq!(port, 9000);
    }

    #[test]
    fn test_parse_value_rejects_garbage_with_key_in_message() {
        let err = parse_value::<u64>("SESSION_IDLE_TIMEOUT_SECS", "soon").unwrap_err();
        assert!(err.to_string().contains("SESSION_IDLE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("INTERVIEW_API_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_zero_sweep_interval_is_rejected() {
        let err = require_nonzero("SESSION_SWEEP_INTERVAL_SECS", 0).unwrap_err();
        assert!(err.to_string().contains("SESSION_SWEEP_INTERVAL_SECS"));
        assert_eq!(require_nonzero("SESSION_SWEEP_INTERVAL_SECS", 60).unwrap(), 60);
    }
}
