//! Post domain model.
//!
//! # Responsibility
//! - Define the post record shared by the gate, the selection engine and
//!   the persistence collaborator.
//! - Provide write-time validation for author-submitted fields.
//!
//! # Invariants
//! - `id` is assigned by the persistence layer and never reused.
//! - `author_id` and `created_at` never change after creation.
//! - `category_id` references a seeded category at creation time.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Persistence-assigned post identifier.
pub type PostId = i64;

/// Stable identifier of the account that wrote a post.
pub type AuthorId = Uuid;

/// Canonical post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Topic label chosen by the author; the gate checks `content` against it.
    pub heading: String,
    pub content: String,
    pub category_id: CategoryId,
    pub author_id: AuthorId,
    /// Unix epoch milliseconds. Insertion order for posts created in the same
    /// millisecond is recovered from `id`.
    pub created_at: i64,
}

/// Author-submitted fields for create/edit, before ids are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub heading: String,
    pub content: String,
    /// Category label as picked from the fixed catalog.
    pub category_label: String,
}

impl PostDraft {
    pub fn new(
        heading: impl Into<String>,
        content: impl Into<String>,
        category_label: impl Into<String>,
    ) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
            category_label: category_label.into(),
        }
    }

    /// Rejects blank fields before the draft reaches the gate.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        if self.heading.trim().is_empty() {
            return Err(PostValidationError::EmptyHeading);
        }
        if self.content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        if self.category_label.trim().is_empty() {
            return Err(PostValidationError::EmptyCategoryLabel);
        }
        Ok(())
    }
}

/// Resolved fields for a post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub heading: String,
    pub content: String,
    pub category_id: CategoryId,
    pub author_id: AuthorId,
}

impl NewPost {
    /// Materializes the stored record once storage assigns identity.
    pub fn into_post(self, id: PostId, created_at: i64) -> Post {
        Post {
            id,
            heading: self.heading,
            content: self.content,
            category_id: self.category_id,
            author_id: self.author_id,
            created_at,
        }
    }
}

/// Validation failures for post fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyHeading,
    EmptyContent,
    EmptyCategoryLabel,
    InvalidCategoryId(CategoryId),
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHeading => write!(f, "post heading must not be empty"),
            Self::EmptyContent => write!(f, "post content must not be empty"),
            Self::EmptyCategoryLabel => write!(f, "post category must be selected"),
            Self::InvalidCategoryId(id) => write!(f, "invalid category id: {id}"),
        }
    }
}

impl Error for PostValidationError {}

impl Post {
    /// Validates author-controlled fields.
    ///
    /// # Errors
    /// - `EmptyHeading` / `EmptyContent` when the field is blank.
    /// - `InvalidCategoryId` when `category_id` is not a positive key.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        if self.heading.trim().is_empty() {
            return Err(PostValidationError::EmptyHeading);
        }
        if self.content.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        if self.category_id <= 0 {
            return Err(PostValidationError::InvalidCategoryId(self.category_id));
        }
        Ok(())
    }

    /// Returns whether this post belongs to `author_id`.
    pub fn is_authored_by(&self, author_id: AuthorId) -> bool {
        self.author_id == author_id
    }
}
