use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "https://api.deepseek.com/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Application configuration loaded from environment variables.
///
/// Only `PORT` and `BODY_LIMIT_MB` can fail startup. A missing
/// `DEEPSEEK_API_KEY` is tolerated here and surfaces later as fallback
/// completions; the gateway re-reads it on every call.
#[derive(Debug, Clone)]
pub struct Config {
    pub deepseek_api_key: Option<String>,
    pub deepseek_api_url: String,
    pub deepseek_model: String,
    /// Explicit browser executable, checked before the well-known install paths.
    pub chrome_path: Option<String>,
    pub body_limit_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let body_limit_mb = std::env::var("BODY_LIMIT_MB")
            .unwrap_or_else(|_| "50".to_string())
            .parse::<usize>()
            .context("BODY_LIMIT_MB must be a whole number of megabytes")?;

        Ok(Config {
            deepseek_api_key: optional_env(API_KEY_ENV),
            deepseek_api_url: optional_env("DEEPSEEK_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            deepseek_model: optional_env("DEEPSEEK_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            chrome_path: optional_env("CHROME_PATH")
                .or_else(|| optional_env("PUPPETEER_EXECUTABLE_PATH")),
            body_limit_bytes: body_limit_mb * 1024 * 1024,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating empty or whitespace-only values as unset.
pub fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Config used by router tests: no credential, no browser override.
    pub fn for_tests() -> Self {
        Config {
            deepseek_api_key: None,
            deepseek_api_url: DEFAULT_API_URL.to_string(),
            deepseek_model: DEFAULT_MODEL.to_string(),
            chrome_path: None,
            body_limit_bytes: 50 * 1024 * 1024,
            port: 3001,
            rust_log: "info".to_string(),
        }
    }
}
