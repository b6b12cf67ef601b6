//! Semantic classifier capability.
//!
//! # Responsibility
//! - Define the single-call classifier seam used by the relevance gate.
//! - Provide the chat-completion backed implementation and its config.
//!
//! # Invariants
//! - One `classify` call issues at most one outbound request.
//! - Implementations return the raw free-text reply; interpretation belongs
//!   to the gate.

use crate::config::ConfigError;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub mod config;
pub mod openai;
pub mod prompt;

pub use config::ClassifierConfig;
pub use openai::OpenAiClassifier;

/// Result type for classifier calls.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Classifier failures. All of them are recovered by the gate's failure policy.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Missing API key, invalid settings, client construction failure.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failure before a response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Undecodable body or missing reply text.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClassifierError {
    /// Stable code for log records.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "classifier_config",
            Self::Network(_) => "classifier_network",
            Self::Timeout(_) => "classifier_timeout",
            Self::Api { .. } => "classifier_api",
            Self::Parse(_) => "classifier_parse",
        }
    }
}

impl From<ConfigError> for ClassifierError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}

/// Language the classifier is asked to answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    /// The literal token the classifier is told to answer with when off-topic.
    pub fn negative_token(self) -> &'static str {
        match self {
            Self::Russian => "нет",
            Self::English => "no",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Russian => "ru",
            Self::English => "en",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ru" | "russian" => Ok(Self::Russian),
            "en" | "english" => Ok(Self::English),
            other => Err(format!("unsupported language `{other}`; expected ru|en")),
        }
    }
}

/// One topic-match question for the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub declared_topic: String,
    pub candidate_text: String,
    pub language: Language,
}

impl ClassificationRequest {
    pub fn new(
        declared_topic: impl Into<String>,
        candidate_text: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            declared_topic: declared_topic.into(),
            candidate_text: candidate_text.into(),
            language,
        }
    }
}

/// External semantic classifier, request in, free-text reply out.
pub trait Classifier: Send + Sync {
    fn classify(&self, request: &ClassificationRequest) -> ClassifierResult<String>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, request: &ClassificationRequest) -> ClassifierResult<String> {
        (**self).classify(request)
    }
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn classify(&self, request: &ClassificationRequest) -> ClassifierResult<String> {
        (**self).classify(request)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, request: &ClassificationRequest) -> ClassifierResult<String> {
        (**self).classify(request)
    }
}
