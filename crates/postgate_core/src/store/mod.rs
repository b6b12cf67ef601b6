//! Persistence collaborator contracts.
//!
//! # Responsibility
//! - Define the read/write surface the core consumes from storage.
//! - Keep storage details out of selection and submission logic.
//!
//! # Invariants
//! - `get_all_posts` returns posts most-recent-first.
//! - Write paths must call `Post::validate()` before mutating storage.
//! - Write paths reject a `category_id` that is not in the seeded catalog.
//! - Semantic misses (`NotFound`) are distinct from backend failures.

use crate::model::category::{Category, CategoryCatalog, CategoryId};
use crate::model::post::{NewPost, Post, PostId, PostValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;

pub use memory::InMemoryPostStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage collaborator error.
#[derive(Debug)]
pub enum StoreError {
    Validation(PostValidationError),
    /// `category_id` does not reference a seeded category.
    UnknownCategory(CategoryId),
    NotFound(PostId),
    /// Backend could not serve the call.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnknownCategory(id) => write!(f, "unknown category id: {id}"),
            Self::NotFound(id) => write!(f, "post not found: {id}"),
            Self::Unavailable(message) => write!(f, "post store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UnknownCategory(_) => None,
            Self::NotFound(_) => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<PostValidationError> for StoreError {
    fn from(value: PostValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Read access to the whole post corpus.
pub trait PostSource {
    /// All posts, most recent first.
    fn get_all_posts(&self) -> StoreResult<Vec<Post>>;
}

/// Category resolution by label.
pub trait CategoryLookup {
    fn get_category_by_label(&self, label: &str) -> StoreResult<Option<Category>>;
}

/// Post writes used by the submission workflow.
pub trait PostSink {
    /// Persists a new post and returns it with assigned `id`/`created_at`.
    fn insert_post(&self, new_post: &NewPost) -> StoreResult<Post>;
    /// Replaces heading/content/category of an existing post.
    fn update_post(&self, post: &Post) -> StoreResult<()>;
    fn get_post(&self, id: PostId) -> StoreResult<Option<Post>>;
}

impl CategoryLookup for CategoryCatalog {
    fn get_category_by_label(&self, label: &str) -> StoreResult<Option<Category>> {
        Ok(self.get_by_label(label).cloned())
    }
}

impl<T: PostSource + ?Sized> PostSource for &T {
    fn get_all_posts(&self) -> StoreResult<Vec<Post>> {
        (**self).get_all_posts()
    }
}

impl<T: CategoryLookup + ?Sized> CategoryLookup for &T {
    fn get_category_by_label(&self, label: &str) -> StoreResult<Option<Category>> {
        (**self).get_category_by_label(label)
    }
}

impl<T: PostSink + ?Sized> PostSink for &T {
    fn insert_post(&self, new_post: &NewPost) -> StoreResult<Post> {
        (**self).insert_post(new_post)
    }

    fn update_post(&self, post: &Post) -> StoreResult<()> {
        (**self).update_post(post)
    }

    fn get_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        (**self).get_post(id)
    }
}
