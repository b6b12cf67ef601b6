//! Chat-completion backed classifier.
//!
//! # Responsibility
//! - Send one topic-match prompt to an OpenAI-compatible completions API.
//! - Map transport/HTTP/decoding failures onto `ClassifierError`.
//!
//! # Invariants
//! - The HTTP client carries the configured timeout on every request.
//! - Request bodies and replies are never logged; only sizes and status.

use super::config::ClassifierConfig;
use super::prompt::build_topic_prompt;
use super::{ClassificationRequest, Classifier, ClassifierError, ClassifierResult};
use crate::logging::sanitize_message;
use log::{debug, warn};
use reqwest::blocking::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Classifier over an OpenAI-compatible `/chat/completions` endpoint.
///
/// Uses a blocking client; do not construct or call it from inside an async
/// executor thread.
#[derive(Debug)]
pub struct OpenAiClassifier {
    http: Client,
    config: ClassifierConfig,
}

impl OpenAiClassifier {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(config: ClassifierConfig) -> ClassifierResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ClassifierError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self { http, config })
    }

    /// Builds a classifier from `OPENAI_API_KEY` and `POSTGATE_CLASSIFIER_*`.
    pub fn from_env() -> ClassifierResult<Self> {
        Self::new(ClassifierConfig::from_env()?)
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

impl Classifier for OpenAiClassifier {
    fn classify(&self, request: &ClassificationRequest) -> ClassifierResult<String> {
        let started_at = Instant::now();
        let prompt = build_topic_prompt(request);
        let body = ChatRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system.as_str(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.user.as_str(),
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().unwrap_or_default();
            warn!(
                "event=classifier_call module=classifier status=error error_code=classifier_api http_status={} duration_ms={}",
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message: sanitize_message(&body_text, MAX_ERROR_BODY_CHARS),
            });
        }

        let parsed: ChatResponse = response.json().map_err(|err| {
            ClassifierError::Parse(format!("failed to decode completion response: {err}"))
        })?;
        let reply = first_reply(parsed)?;

        debug!(
            "event=classifier_call module=classifier status=ok model={} reply_chars={} duration_ms={}",
            self.config.model,
            reply.chars().count(),
            started_at.elapsed().as_millis()
        );
        Ok(reply)
    }
}

fn first_reply(response: ChatResponse) -> ClassifierResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ClassifierError::Parse("completion response has no reply text".to_string()))
}

fn map_transport_error(err: reqwest::Error) -> ClassifierError {
    if err.is_timeout() {
        ClassifierError::Timeout(err.to_string())
    } else if err.is_decode() {
        ClassifierError::Parse(err.to_string())
    } else {
        ClassifierError::Network(err.to_string())
    }
}
