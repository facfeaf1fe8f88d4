use thiserror::Error;

use crate::config_env::{
    optional_trimmed_env, parse_u64_env, parse_usize_env, require_non_empty_env,
};
use crate::sessions::DEFAULT_MAX_HISTORY_TURNS;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub history_max_turns: usize,
    pub llm: OpenAiGatewayConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiGatewayConfig {
    pub chat_completions_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    MissingVar(String),
    #[error("invalid integer in env var {key}: {value}")]
    ParseInt { key: String, value: String },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
    #[error("failed to build model api http client: {0}")]
    HttpClient(String),
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            bind_addr: optional_trimmed_env("API_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            history_max_turns: parse_usize_env(
                "CHAT_HISTORY_MAX_TURNS",
                DEFAULT_MAX_HISTORY_TURNS,
            )?,
            llm: OpenAiGatewayConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_max_turns == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "CHAT_HISTORY_MAX_TURNS must be at least 1".to_string(),
            ));
        }
        self.llm.validate()
    }
}

impl OpenAiGatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            chat_completions_url: optional_trimmed_env("OPENAI_CHAT_COMPLETIONS_URL")
                .unwrap_or_else(|| DEFAULT_CHAT_COMPLETIONS_URL.to_string()),
            api_key: require_non_empty_env("OPENAI_API_KEY")?,
            model: optional_trimmed_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_ms: parse_u64_env("OPENAI_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar("OPENAI_API_KEY".to_string()));
        }
        if !self.chat_completions_url.starts_with("http://")
            && !self.chat_completions_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidConfiguration(
                "OPENAI_CHAT_COMPLETIONS_URL must start with http:// or https://".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "OPENAI_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads variables from a `.env` file in the working directory (or a parent)
/// without overriding values already present in the process environment.
/// A missing file is not an error.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}
