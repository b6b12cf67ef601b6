//! Category-filtered post selection.
//!
//! # Responsibility
//! - Filter a post sequence by a set of category ids.
//! - Parse listing-form filter values into a selection request.
//!
//! # Invariants
//! - Selection never reorders: output order is input order.
//! - An empty request selects every post.
//! - Unknown category ids match nothing and are not an error.

use crate::model::category::CategoryId;
use crate::model::post::Post;
use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Filter-value parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    InvalidCategoryId(String),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategoryId(value) => write!(f, "invalid category id filter: `{value}`"),
        }
    }
}

impl Error for SelectionError {}

/// Requested category ids; empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    category_ids: BTreeSet<CategoryId>,
}

impl SelectionRequest {
    /// The no-filter sentinel.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            category_ids: ids.into_iter().collect(),
        }
    }

    /// Parses raw listing-form values, one category id per value.
    ///
    /// # Errors
    /// - `InvalidCategoryId` for the first value that is not an integer.
    pub fn parse_filters<S: AsRef<str>>(values: &[S]) -> Result<Self, SelectionError> {
        values
            .iter()
            .map(|value| {
                let raw = value.as_ref().trim();
                raw.parse::<CategoryId>()
                    .map_err(|_| SelectionError::InvalidCategoryId(raw.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|category_ids| Self { category_ids })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category_ids.is_empty()
    }

    pub fn category_ids(&self) -> &BTreeSet<CategoryId> {
        &self.category_ids
    }

    /// Whether a post in `category_id` belongs to the selection.
    pub fn admits(&self, category_id: CategoryId) -> bool {
        self.is_unfiltered() || self.category_ids.contains(&category_id)
    }
}

/// Stable filter of `posts` by `category_ids`; empty set returns everything.
pub fn select(posts: &[Post], category_ids: &BTreeSet<CategoryId>) -> Vec<Post> {
    if category_ids.is_empty() {
        return posts.to_vec();
    }
    posts
        .iter()
        .filter(|post| category_ids.contains(&post.category_id))
        .cloned()
        .collect()
}

/// Owned selection for a parsed request.
pub fn select_posts(posts: &[Post], request: &SelectionRequest) -> Vec<Post> {
    let selected = select(posts, request.category_ids());
    debug!(
        "event=select_posts module=selection status=ok filters={} input={} output={}",
        request.category_ids().len(),
        posts.len(),
        selected.len()
    );
    selected
}

/// Borrowed selection for read-only rendering.
pub fn select_refs<'a>(posts: &'a [Post], request: &SelectionRequest) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|post| request.admits(post.category_id))
        .collect()
}

/// Sorts into the order listings expect: `created_at DESC, id DESC`.
pub fn order_most_recent_first(posts: &mut [Post]) {
    posts.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.id.cmp(&left.id))
    });
}

#[cfg(test)]
mod tests {
    use super::{order_most_recent_first, select_refs, SelectionError, SelectionRequest};
    use crate::model::post::Post;
    use uuid::Uuid;

    fn post(id: i64, category_id: i64, created_at: i64) -> Post {
        Post {
            id,
            heading: format!("heading {id}"),
            content: format!("content {id}"),
            category_id,
            author_id: Uuid::nil(),
            created_at,
        }
    }

    #[test]
    fn parse_filters_collects_unique_ids() {
        let request = SelectionRequest::parse_filters(&["1", " 3 ", "1"]).expect("valid filters");
        assert_eq!(
            request.category_ids().iter().copied().collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn parse_filters_rejects_non_integer() {
        let err = SelectionRequest::parse_filters(&["2", "science"]).expect_err("bad filter");
        assert_eq!(err, SelectionError::InvalidCategoryId("science".to_string()));
    }

    #[test]
    fn empty_filter_list_is_unfiltered() {
        let request = SelectionRequest::parse_filters::<&str>(&[]).expect("empty filters");
        assert!(request.is_unfiltered());
        assert!(request.admits(42));
    }

    #[test]
    fn select_refs_borrows_in_input_order() {
        let posts = vec![post(3, 1, 30), post(2, 2, 20), post(1, 1, 10)];
        let selected = select_refs(&posts, &SelectionRequest::from_ids([1]));
        let ids: Vec<i64> = selected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn order_most_recent_first_breaks_ties_by_id() {
        let mut posts = vec![post(1, 1, 10), post(3, 1, 20), post(2, 1, 20)];
        order_most_recent_first(&mut posts);
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
