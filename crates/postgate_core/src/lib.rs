//! Core decision logic for the postgate blogging backend.
//! The request-handling layer calls into this crate to screen submissions
//! and to select posts for listings.

pub mod classifier;
pub mod config;
pub mod gate;
pub mod logging;
pub mod model;
pub mod selection;
pub mod service;
pub mod store;

pub use classifier::{
    ClassificationRequest, Classifier, ClassifierConfig, ClassifierError, ClassifierResult,
    Language, OpenAiClassifier,
};
pub use config::ConfigError;
pub use gate::{
    FailurePolicy, GateConfig, GateOutcome, NegativeForms, RelevanceGate, REJECTION_MESSAGE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryCatalog, CategoryId, DEFAULT_CATEGORY_LABELS};
pub use model::post::{AuthorId, NewPost, Post, PostDraft, PostId, PostValidationError};
pub use model::verdict::Verdict;
pub use selection::{select, select_posts, PostFeed, SelectionError, SelectionRequest};
pub use service::{SubmissionError, SubmissionOutcome, SubmissionService};
pub use store::{
    CategoryLookup, InMemoryPostStore, PostSink, PostSource, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
