//! Configuration management for the task gateway.
//!
//! Configuration can be set via environment variables:
//! - `OPENROUTER_API_KEY` - Optional. Your OpenRouter API key. Without it every
//!   generation request fails with `missing_api_key`.
//! - `OPENROUTER_MODEL` - Optional. The LLM model to use. Defaults to `openrouter/sherlock-dash-alpha`.
//! - `OPENROUTER_API_URL` - Optional. Chat-completion endpoint. Defaults to the OpenRouter API.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "openrouter/sherlock-dash-alpha";
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Gateway configuration, assembled once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key (`None` when unset or empty)
    pub api_key: Option<String>,

    /// LLM model identifier (OpenRouter format)
    pub model: String,

    /// Chat-completion endpoint
    pub api_url: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENROUTER_API_KEY").filter(|key| !key.trim().is_empty());

        let model = lookup("OPENROUTER_MODEL")
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_url = lookup("OPENROUTER_API_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        Ok(Self {
            api_key,
            model,
            api_url,
            host,
            port,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            api_key,
            model,
            api_url: DEFAULT_API_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}
