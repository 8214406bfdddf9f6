//! In-memory collection snapshots.
//!
//! Mutation responses are spliced into these stores instead of refetching:
//! a create appends, an update replaces in place, a delete removes. The
//! asset page is the one exception (server-side ordering and counters) and
//! keeps its own snapshot in the service.

use inv_core::entities::Identified;

/// Ordered snapshot of one collection, keyed by record id.
#[derive(Debug, Clone)]
pub struct CollectionStore<T> {
    items: Vec<T>,
}

impl<T> Default for CollectionStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> CollectionStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot with a fresh fetch.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Append a newly created record.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the record with the same id, keeping its position. Returns
    /// `false` (and changes nothing) when the id is not in the snapshot.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|held| held.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
