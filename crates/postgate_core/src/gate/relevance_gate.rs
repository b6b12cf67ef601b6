//! Content relevance gate.
//!
//! # Responsibility
//! - Ask the classifier whether submitted text matches its declared topic.
//! - Turn the free-text reply into a `Verdict`.
//! - Apply the failure policy when the classifier cannot answer.
//!
//! # Invariants
//! - Exactly one classifier call per evaluation.
//! - Classifier errors never escape `evaluate`/`assess`.
//! - The gate holds no mutable state; one instance may serve many threads.

use crate::classifier::{ClassificationRequest, Classifier, Language};
use crate::config::{env_lookup, parsed, ConfigError};
use crate::gate::negative_forms::NegativeForms;
use crate::logging::sanitize_message;
use crate::model::verdict::Verdict;
use log::{info, warn};
use std::str::FromStr;
use std::time::Instant;

pub const ENV_GATE_POLICY: &str = "POSTGATE_GATE_POLICY";
pub const ENV_GATE_LANGUAGE: &str = "POSTGATE_GATE_LANGUAGE";

/// User-facing message for a rejected submission.
pub const REJECTION_MESSAGE: &str = "Текст не соответствует выбранной теме.";
/// User-facing message when the gate could not decide under fail-closed.
pub const UNDETERMINED_MESSAGE: &str =
    "Не удалось проверить соответствие текста теме. Попробуйте ещё раз позже.";

const MAX_LOGGED_ERROR_CHARS: usize = 160;

/// What the gate returns when the classifier fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Degrade to `Accept`. Moderation is bypassed during an outage.
    #[default]
    FailOpen,
    /// Degrade to `Undetermined`, which does not permit publication.
    FailClosed,
}

impl FailurePolicy {
    pub fn fallback_verdict(self) -> Verdict {
        match self {
            Self::FailOpen => Verdict::Accept,
            Self::FailClosed => Verdict::Undetermined,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailOpen => "fail_open",
            Self::FailClosed => "fail_closed",
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_open" | "open" => Ok(Self::FailOpen),
            "fail_closed" | "closed" => Ok(Self::FailClosed),
            other => Err(format!(
                "unsupported failure policy `{other}`; expected fail_open|fail_closed"
            )),
        }
    }
}

/// Gate settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateConfig {
    pub policy: FailurePolicy,
    pub negative_forms: NegativeForms,
    pub language: Language,
}

impl GateConfig {
    /// Reads `POSTGATE_GATE_POLICY` and `POSTGATE_GATE_LANGUAGE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(policy) = parsed::<_, FailurePolicy>(&lookup, ENV_GATE_POLICY)? {
            config.policy = policy;
        }
        if let Some(language) = parsed::<_, Language>(&lookup, ENV_GATE_LANGUAGE)? {
            config.language = language;
        }
        Ok(config)
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_negative_forms(mut self, negative_forms: NegativeForms) -> Self {
        self.negative_forms = negative_forms;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Verdict plus whether the failure policy produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    pub verdict: Verdict,
    pub degraded: bool,
}

/// Topic-relevance gate over an injected classifier.
#[derive(Debug)]
pub struct RelevanceGate<C: Classifier> {
    classifier: C,
    config: GateConfig,
}

impl<C: Classifier> RelevanceGate<C> {
    /// Creates a gate with default config (fail-open, Russian, default forms).
    pub fn new(classifier: C) -> Self {
        Self::with_config(classifier, GateConfig::default())
    }

    pub fn with_config(classifier: C, config: GateConfig) -> Self {
        Self { classifier, config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Judges whether `candidate_text` fits `declared_topic`.
    pub fn evaluate(&self, candidate_text: &str, declared_topic: &str) -> Verdict {
        self.assess(candidate_text, declared_topic).verdict
    }

    /// Like [`Self::evaluate`], also reporting whether the policy fired.
    pub fn assess(&self, candidate_text: &str, declared_topic: &str) -> GateOutcome {
        let started_at = Instant::now();
        let request =
            ClassificationRequest::new(declared_topic, candidate_text, self.config.language);

        match self.classifier.classify(&request) {
            Ok(reply) => {
                let verdict = self.config.negative_forms.interpret(&reply);
                info!(
                    "event=gate_evaluate module=gate status=ok verdict={} text_chars={} duration_ms={}",
                    verdict.as_str(),
                    candidate_text.chars().count(),
                    started_at.elapsed().as_millis()
                );
                GateOutcome {
                    verdict,
                    degraded: false,
                }
            }
            Err(err) => {
                let verdict = self.config.policy.fallback_verdict();
                warn!(
                    "event=gate_evaluate module=gate status=degraded policy={} verdict={} error_code={} error={} duration_ms={}",
                    self.config.policy.as_str(),
                    verdict.as_str(),
                    err.error_code(),
                    sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS),
                    started_at.elapsed().as_millis()
                );
                GateOutcome {
                    verdict,
                    degraded: true,
                }
            }
        }
    }
}

/// User-facing message for a verdict that blocks publication.
pub fn blocking_message(verdict: Verdict) -> Option<&'static str> {
    match verdict {
        Verdict::Accept => None,
        Verdict::Reject => Some(REJECTION_MESSAGE),
        Verdict::Undetermined => Some(UNDETERMINED_MESSAGE),
    }
}
