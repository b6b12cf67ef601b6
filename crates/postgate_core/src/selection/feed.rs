//! Listing composition over the post source.
//!
//! # Invariants
//! - Listings keep the source's most-recent-first order.
//! - Source failures are returned, never replaced by an empty listing.

use crate::model::post::{AuthorId, Post};
use crate::selection::engine::{select_posts, SelectionRequest};
use crate::store::{PostSource, StoreResult};

/// Read-side facade that fetches posts and applies selection.
pub struct PostFeed<S: PostSource> {
    source: S,
}

impl<S: PostSource> PostFeed<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Main listing: all posts, optionally narrowed to the requested categories.
    pub fn listing(&self, request: &SelectionRequest) -> StoreResult<Vec<Post>> {
        let posts = self.source.get_all_posts()?;
        Ok(select_posts(&posts, request))
    }

    /// Profile listing: one author's posts, most recent first.
    pub fn by_author(&self, author_id: AuthorId) -> StoreResult<Vec<Post>> {
        Ok(self
            .source
            .get_all_posts()?
            .into_iter()
            .filter(|post| post.is_authored_by(author_id))
            .collect())
    }
}
