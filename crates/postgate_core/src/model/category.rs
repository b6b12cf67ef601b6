//! Category catalog.
//!
//! # Responsibility
//! - Declare the fixed category label set.
//! - Seed categories once with stable ids and serve exact-label lookups.
//!
//! # Invariants
//! - Ids are assigned `1..=N` in declaration order.
//! - Seeding an already-seeded catalog is a no-op.
//! - Categories are never mutated or removed after seeding.

use log::info;
use serde::{Deserialize, Serialize};

/// Persistence-assigned category identifier.
pub type CategoryId = i64;

/// Fixed category label set seeded at startup.
pub const DEFAULT_CATEGORY_LABELS: &[&str] = &[
    "Программирование",
    "Дизайн",
    "Английский язык",
    "Наука",
    "Финансы",
    "Маркетинг",
    "Юриспруденция",
];

/// One seeded category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

/// Seeded, read-only set of categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Creates an empty, unseeded catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with [`DEFAULT_CATEGORY_LABELS`].
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.seed(DEFAULT_CATEGORY_LABELS);
        catalog
    }

    /// Inserts labels that are not yet present, assigning the next free ids.
    ///
    /// Returns how many categories were added. Blank labels are skipped.
    pub fn seed<S: AsRef<str>>(&mut self, labels: &[S]) -> usize {
        let mut added = 0;
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || self.get_by_label(label).is_some() {
                continue;
            }
            let id = self.next_id();
            self.categories.push(Category {
                id,
                label: label.to_string(),
            });
            added += 1;
        }
        if added > 0 {
            info!(
                "event=category_seed module=model status=ok added={} total={}",
                added,
                self.categories.len()
            );
        }
        added
    }

    /// Exact label lookup; surrounding whitespace on the query is ignored.
    pub fn get_by_label(&self, label: &str) -> Option<&Category> {
        let label = label.trim();
        self.categories
            .iter()
            .find(|category| category.label == label)
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Categories in seeding order.
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn next_id(&self) -> CategoryId {
        self.categories
            .iter()
            .map(|category| category.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}
