use std::collections::HashSet;

use hnscout_storage::{PostStore, StoreError};

/// Titles already known to a run: everything the store holds plus what this run collected.
pub struct SeenTitles<'a> {
    store: &'a dyn PostStore,
    in_run: HashSet<String>,
}

impl<'a> SeenTitles<'a> {
    pub fn new(store: &'a dyn PostStore) -> Self {
        Self {
            store,
            in_run: HashSet::new(),
        }
    }

    /// Exact title match against this run first, then the store.
    pub async fn is_duplicate(&self, title: &str) -> Result<bool, StoreError> {
        if self.in_run.contains(title) {
            return Ok(true);
        }
        self.store.title_exists(title).await
    }

    pub fn mark_seen(&mut self, title: &str) {
        self.in_run.insert(title.to_string());
    }

    pub fn len(&self) -> usize {
        self.in_run.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_run.is_empty()
    }
}
