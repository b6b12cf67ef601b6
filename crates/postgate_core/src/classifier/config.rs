//! Chat-completion classifier settings.
//!
//! # Invariants
//! - The API key is held as a secret and redacted from `Debug` output.
//! - `timeout` bounds the whole outbound call.

use crate::config::{env_lookup, optional, parsed, required, ConfigError};
use secrecy::SecretString;
use std::time::Duration;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "POSTGATE_CLASSIFIER_BASE_URL";
pub const ENV_MODEL: &str = "POSTGATE_CLASSIFIER_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "POSTGATE_CLASSIFIER_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for [`super::OpenAiClassifier`].
#[derive(Debug)]
pub struct ClassifierConfig {
    pub(crate) api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl ClassifierConfig {
    /// Creates settings with defaults and the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads settings from process environment.
    ///
    /// # Errors
    /// - `MissingVar` when `OPENAI_API_KEY` is unset or blank.
    /// - `InvalidValue` when the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Same as [`Self::from_env`] with an injected variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(required(&lookup, ENV_API_KEY)?);
        if let Some(base_url) = optional(&lookup, ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = optional(&lookup, ENV_MODEL) {
            config.model = model;
        }
        if let Some(secs) = parsed::<_, u64>(&lookup, ENV_TIMEOUT_SECS)? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: secs.to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Completions endpoint derived from `base_url`.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::{ClassifierConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT, ENV_API_KEY, ENV_TIMEOUT_SECS};
    use crate::config::ConfigError;
    use std::time::Duration;

    #[test]
    fn missing_api_key_is_reported() {
        let err = ClassifierConfig::from_lookup(|_| None).expect_err("api key is required");
        assert_eq!(err, ConfigError::MissingVar(ENV_API_KEY));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = ClassifierConfig::from_lookup(|key| {
            (key == ENV_API_KEY).then(|| "sk-test".to_string())
        })
        .expect("config from key only");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = ClassifierConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "POSTGATE_CLASSIFIER_BASE_URL" => Some("http://localhost:9000/v1/".to_string()),
            "POSTGATE_CLASSIFIER_MODEL" => Some("gpt-4o-mini".to_string()),
            "POSTGATE_CLASSIFIER_TIMEOUT_SECS" => Some("3".to_string()),
            _ => None,
        })
        .expect("config with overrides");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(
            config.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ClassifierConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-test".to_string()),
            "POSTGATE_CLASSIFIER_TIMEOUT_SECS" => Some("0".to_string()),
            _ => None,
        })
        .expect_err("zero timeout must fail");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key, .. } if key == ENV_TIMEOUT_SECS
        ));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ClassifierConfig::new("sk-very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
    }
}
