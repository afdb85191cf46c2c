//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Interview assistant configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    /// Ollama model used for both question generation and responses.
    pub model: String,
    /// Base URL of the Ollama server.
    pub ollama_url: String,
    /// Path to the SQLite database file.
    pub db_path: String,
    /// How many technical questions to request per interview.
    pub question_count: usize,
    /// Bound on each LLM request.
    pub request_timeout: Duration,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            model: "mistral-small3.2".to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            db_path: "./data/interviews.db".to_string(),
            question_count: 3,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl InterviewConfig {
    /// Build a config from `THEODORE_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let question_count = match std::env::var("THEODORE_QUESTION_COUNT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "THEODORE_QUESTION_COUNT".to_string(),
                message: format!("expected a positive integer, got {raw:?}"),
            })?,
            Err(_) => defaults.question_count,
        };

        let request_timeout = match std::env::var("THEODORE_LLM_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "THEODORE_LLM_TIMEOUT_SECS".to_string(),
                    message: format!("expected seconds as an integer, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.request_timeout,
        };

        Ok(Self {
            model: std::env::var("THEODORE_MODEL").unwrap_or(defaults.model),
            ollama_url: std::env::var("THEODORE_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            db_path: std::env::var("THEODORE_DB_PATH").unwrap_or(defaults.db_path),
            question_count,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = InterviewConfig::default();
        assert_eq!(config.model, "mistral-small3.2");
        assert_eq!(config.question_count, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }
}
