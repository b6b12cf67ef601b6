//! Post selection engine.
//!
//! # Responsibility
//! - Filter the post corpus by requested category ids.
//! - Compose listings over the post source collaborator.
//!
//! # Invariants
//! - Ordering is supplied by the source; selection only preserves it.

pub mod engine;
pub mod feed;

pub use engine::{
    order_most_recent_first, select, select_posts, select_refs, SelectionError, SelectionRequest,
};
pub use feed::PostFeed;
