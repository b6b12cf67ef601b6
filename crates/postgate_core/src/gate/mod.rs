//! Content relevance gate.
//!
//! # Responsibility
//! - Decide whether a submission's text matches its declared topic.
//! - Keep reply interpretation in one normalization+match function.
//!
//! # Invariants
//! - The gate is a pure function of its inputs plus one classifier call.
//! - Classifier failures are absorbed by the configured `FailurePolicy`.

pub mod negative_forms;
pub mod relevance_gate;

pub use negative_forms::{normalize_reply, NegativeForms, DEFAULT_NEGATIVE_TOKENS};
pub use relevance_gate::{
    blocking_message, FailurePolicy, GateConfig, GateOutcome, RelevanceGate, REJECTION_MESSAGE,
    UNDETERMINED_MESSAGE,
};
