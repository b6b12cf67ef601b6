//! In-process post store.
//!
//! # Responsibility
//! - Back the collaborator traits for tests and the CLI probe.
//! - Assign post ids and creation timestamps monotonically.
//!
//! # Invariants
//! - Ids start at 1 and are never reused.
//! - `created_at` never decreases across inserts.
//! - Updates never touch `id`, `author_id` or `created_at`.
//! - Stored posts always reference a category in `catalog`.

use crate::model::category::{Category, CategoryCatalog, CategoryId};
use crate::model::post::{NewPost, Post, PostId};
use crate::selection::engine::order_most_recent_first;
use crate::store::{CategoryLookup, PostSink, PostSource, StoreError, StoreResult};
use log::info;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
struct StoreState {
    posts: Vec<Post>,
    next_id: PostId,
    last_created_at: i64,
}

/// Thread-safe in-memory implementation of the storage traits.
#[derive(Debug)]
pub struct InMemoryPostStore {
    catalog: CategoryCatalog,
    state: RwLock<StoreState>,
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new(CategoryCatalog::with_defaults())
    }
}

impl InMemoryPostStore {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self {
            catalog,
            state: RwLock::new(StoreState {
                next_id: 1,
                ..StoreState::default()
            }),
        }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Number of stored posts.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.posts.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.posts.is_empty())
    }

    fn ensure_category(&self, category_id: CategoryId) -> StoreResult<()> {
        match self.catalog.get(category_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::UnknownCategory(category_id)),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("post store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("post store lock poisoned".to_string()))
    }
}

impl PostSource for InMemoryPostStore {
    fn get_all_posts(&self) -> StoreResult<Vec<Post>> {
        let mut posts = self.read()?.posts.clone();
        order_most_recent_first(&mut posts);
        Ok(posts)
    }
}

impl CategoryLookup for InMemoryPostStore {
    fn get_category_by_label(&self, label: &str) -> StoreResult<Option<Category>> {
        self.catalog.get_category_by_label(label)
    }
}

impl PostSink for InMemoryPostStore {
    fn insert_post(&self, new_post: &NewPost) -> StoreResult<Post> {
        let mut state = self.write()?;
        let created_at = now_epoch_ms().max(state.last_created_at);
        let post = new_post.clone().into_post(state.next_id, created_at);
        post.validate()?;
        self.ensure_category(post.category_id)?;

        state.next_id += 1;
        state.last_created_at = created_at;
        state.posts.push(post.clone());
        info!(
            "event=post_insert module=store status=ok post_id={} category_id={}",
            post.id, post.category_id
        );
        Ok(post)
    }

    fn update_post(&self, post: &Post) -> StoreResult<()> {
        post.validate()?;
        self.ensure_category(post.category_id)?;

        let mut state = self.write()?;
        let stored = state
            .posts
            .iter_mut()
            .find(|stored| stored.id == post.id)
            .ok_or(StoreError::NotFound(post.id))?;
        stored.heading = post.heading.clone();
        stored.content = post.content.clone();
        stored.category_id = post.category_id;
        info!(
            "event=post_update module=store status=ok post_id={} category_id={}",
            post.id, post.category_id
        );
        Ok(())
    }

    fn get_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        Ok(self
            .read()?
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, epoch_ms)
}

/// Saturates at `i64::MAX` instead of wrapping.
fn epoch_ms(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}
