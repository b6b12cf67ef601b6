//! Core use-case services.
//!
//! # Responsibility
//! - Compose the gate and the storage collaborator into submission flows.
//! - Keep request-handling layers decoupled from gate and storage details.

pub mod submission_service;

pub use submission_service::{SubmissionError, SubmissionOutcome, SubmissionService};
