//! Post submission use-cases.
//!
//! # Responsibility
//! - Run the relevance gate once per create/edit submission.
//! - Resolve category labels and persist accepted submissions.
//!
//! # Invariants
//! - Nothing is written unless the verdict permits publication.
//! - Authorship is checked before the classifier is called.
//! - Edits never change `author_id` or `created_at`.

use crate::classifier::Classifier;
use crate::gate::{blocking_message, RelevanceGate, REJECTION_MESSAGE};
use crate::model::category::Category;
use crate::model::post::{AuthorId, NewPost, Post, PostDraft, PostId, PostValidationError};
use crate::model::verdict::Verdict;
use crate::store::{CategoryLookup, PostSink, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Submission failures that are not gate decisions.
#[derive(Debug)]
pub enum SubmissionError {
    /// Draft fields are blank or invalid.
    Validation(PostValidationError),
    /// Draft names a category label that was never seeded.
    CategoryNotFound(String),
    /// Target post does not exist.
    PostNotFound(PostId),
    /// Editor is not the post author.
    NotAuthor { post_id: PostId, editor_id: AuthorId },
    /// Storage collaborator failure.
    Store(StoreError),
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CategoryNotFound(label) => write!(f, "category not found: `{label}`"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::NotAuthor { post_id, editor_id } => {
                write!(f, "user {editor_id} is not the author of post {post_id}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PostValidationError> for SubmissionError {
    fn from(value: PostValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for SubmissionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::PostNotFound(id),
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Result of a submission that reached the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Accepted and persisted.
    Published(Post),
    /// Blocked by the gate; nothing was written.
    Rejected {
        verdict: Verdict,
        message: &'static str,
    },
}

impl SubmissionOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Gate-then-persist workflow over injected collaborators.
pub struct SubmissionService<C: Classifier, S> {
    gate: RelevanceGate<C>,
    store: S,
}

impl<C, S> SubmissionService<C, S>
where
    C: Classifier,
    S: PostSink + CategoryLookup,
{
    pub fn new(gate: RelevanceGate<C>, store: S) -> Self {
        Self { gate, store }
    }

    pub fn gate(&self) -> &RelevanceGate<C> {
        &self.gate
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a post if its content passes the gate.
    ///
    /// # Errors
    /// - `Validation` for blank draft fields (checked before the gate).
    /// - `CategoryNotFound` when the label is unknown (checked after the gate).
    /// - `Store` for collaborator failures.
    pub fn create_post(
        &self,
        author_id: AuthorId,
        draft: &PostDraft,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        draft.validate()?;
        if let Some(rejected) = self.screen(draft) {
            return Ok(rejected);
        }

        let category = self.resolve_category(&draft.category_label)?;
        let post = self.store.insert_post(&NewPost {
            heading: draft.heading.clone(),
            content: draft.content.clone(),
            category_id: category.id,
            author_id,
        })?;
        info!(
            "event=post_create module=service status=ok post_id={} category_id={}",
            post.id, post.category_id
        );
        Ok(SubmissionOutcome::Published(post))
    }

    /// Replaces heading/content/category of the editor's own post.
    ///
    /// # Errors
    /// - `PostNotFound` when `post_id` does not exist.
    /// - `NotAuthor` when `editor_id` did not write the post.
    /// - Same draft/category/store errors as [`Self::create_post`].
    pub fn edit_post(
        &self,
        editor_id: AuthorId,
        post_id: PostId,
        draft: &PostDraft,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let existing = self
            .store
            .get_post(post_id)?
            .ok_or(SubmissionError::PostNotFound(post_id))?;
        if !existing.is_authored_by(editor_id) {
            return Err(SubmissionError::NotAuthor { post_id, editor_id });
        }

        draft.validate()?;
        if let Some(rejected) = self.screen(draft) {
            return Ok(rejected);
        }

        let category = self.resolve_category(&draft.category_label)?;
        let updated = Post {
            heading: draft.heading.clone(),
            content: draft.content.clone(),
            category_id: category.id,
            ..existing
        };
        self.store.update_post(&updated)?;
        info!(
            "event=post_edit module=service status=ok post_id={} category_id={}",
            updated.id, updated.category_id
        );
        Ok(SubmissionOutcome::Published(updated))
    }

    fn screen(&self, draft: &PostDraft) -> Option<SubmissionOutcome> {
        let verdict = self.gate.evaluate(&draft.content, &draft.heading);
        if verdict.permits_publication() {
            return None;
        }
        info!(
            "event=post_screen module=service status=blocked verdict={}",
            verdict.as_str()
        );
        Some(SubmissionOutcome::Rejected {
            verdict,
            message: blocking_message(verdict).unwrap_or(REJECTION_MESSAGE),
        })
    }

    fn resolve_category(&self, label: &str) -> Result<Category, SubmissionError> {
        self.store
            .get_category_by_label(label)?
            .ok_or_else(|| SubmissionError::CategoryNotFound(label.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{SubmissionOutcome, SubmissionService};
    use crate::classifier::{ClassificationRequest, Classifier, ClassifierResult};
    use crate::gate::{blocking_message, RelevanceGate};
    use crate::model::post::PostDraft;
    use crate::store::InMemoryPostStore;
    use uuid::Uuid;

    struct Replying(&'static str);

    impl Classifier for Replying {
        fn classify(&self, _request: &ClassificationRequest) -> ClassifierResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn screen_follows_permits_publication() {
        for reply in ["да", "нет"] {
            let service = SubmissionService::new(
                RelevanceGate::new(Replying(reply)),
                InMemoryPostStore::default(),
            );
            let draft = PostDraft::new("Наука", "Про кометы", "Наука");
            let verdict = service.gate().evaluate(&draft.content, &draft.heading);

            match service.screen(&draft) {
                None => assert!(verdict.permits_publication()),
                Some(SubmissionOutcome::Rejected { verdict: blocked, message }) => {
                    assert!(!blocked.permits_publication());
                    assert_eq!(Some(message), blocking_message(blocked));
                }
                Some(other) => panic!("screen must not publish: {other:?}"),
            }
        }
    }

    #[test]
    fn accepted_draft_is_stored_once() {
        let service = SubmissionService::new(
            RelevanceGate::new(Replying("да")),
            InMemoryPostStore::default(),
        );
        let outcome = service
            .create_post(
                Uuid::new_v4(),
                &PostDraft::new("Наука", "Про кометы", "Наука"),
            )
            .expect("create");
        assert!(outcome.is_published());
        assert_eq!(service.store().len().expect("len"), 1);
    }
}
