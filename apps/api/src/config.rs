use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on backend calls in flight for one scoring batch.
    pub scoring_concurrency: usize,
    pub max_upload_bytes: usize,
}

/// Everything the generation backend client needs. Passed to `LlmClient::new`
/// explicitly so nothing reads backend settings from ambient state.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_bytes = upload_limit_bytes(env_or("MAX_UPLOAD_MB", 25)?)?;

        Ok(Config {
            llm: LlmConfig {
                endpoint: require_env("AZURE_OPENAI_ENDPOINT")?,
                api_key: require_env("AZURE_OPENAI_API_KEY")?,
                deployment: require_env("AZURE_OPENAI_DEPLOYMENT")?,
                api_version: std::env::var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|_| "2024-02-01".to_string()),
                timeout_secs: env_or("LLM_TIMEOUT_SECS", 120)?,
            },
            port: env_or("PORT", 8038)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring_concurrency: env_or::<usize>("SCORING_CONCURRENCY", 4)?.max(1),
            max_upload_bytes,
        })
    }
}

fn upload_limit_bytes(max_upload_mb: usize) -> Result<usize> {
    max_upload_mb
        .checked_mul(1024 * 1024)
        .with_context(|| format!("MAX_UPLOAD_MB is too large: {max_upload_mb}"))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}
