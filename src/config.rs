use anyhow::{bail, Result};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Runtime configuration for the relay, sourced from the environment.
///
/// The API key is mandatory; the process refuses to start without one.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl Config {
    /// Reads `OPENAI_API_KEY`, `OPENAI_API_BASE`, and `DEBATE_MODEL` from the
    /// process environment. Call `dotenvy::dotenv()` first if a `.env` file
    /// should be honored.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            env::var("OPENAI_API_KEY").ok(),
            env::var("OPENAI_API_BASE").ok(),
            env::var("DEBATE_MODEL").ok(),
        )
    }

    fn from_vars(
        api_key: Option<String>,
        api_base: Option<String>,
        model: Option<String>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => bail!(
                "No API key found. Set OPENAI_API_KEY in the environment or in a .env file \
                 in the working directory:\n\n    OPENAI_API_KEY=sk-proj-your-key-here\n\n\
                 The relay will not start without a completion-API credential."
            ),
        };

        let prefix: String = api_key.chars().take(10).collect();
        tracing::info!(key_prefix = %prefix, "API key loaded");

        Ok(Self {
            api_key,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_fatal() {
        let err = Config::from_vars(None, None, None).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn blank_key_is_fatal() {
        assert!(Config::from_vars(Some("   ".to_string()), None, None).is_err());
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_vars(Some("sk-test".to_string()), None, None).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn overrides_win() {
        let config = Config::from_vars(
            Some("sk-test".to_string()),
            Some("http://localhost:9999/v1".to_string()),
            Some("gpt-4o-mini".to_string()),
        )
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:9999/v1");
        assert_eq!(config.model, "gpt-4o-mini");
    }
}
