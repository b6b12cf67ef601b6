//! Domain model for posts, categories and gate verdicts.
//!
//! # Responsibility
//! - Define the record shapes consumed from the persistence collaborator.
//! - Define the transient decision values produced by the core.
//!
//! # Invariants
//! - A post references a category by id; categories are never owned by posts.
//! - Categories are immutable once seeded.

pub mod category;
pub mod post;
pub mod verdict;
