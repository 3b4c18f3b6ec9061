//! The user's saved movies, persisted as one JSON array after every change.

use std::collections::HashSet;

use scenero_api::traits::MovieSummary;

use crate::storage::KeyValueStore;

/// Storage key of the watchlist blob.
pub const WATCHLIST_KEY: &str = "watchlist";

/// Ordered set of saved movies keyed by `MovieSummary::id`.
pub struct Watchlist {
    items: Vec<MovieSummary>,
    ids: HashSet<String>,
    store: Box<dyn KeyValueStore>,
    /// Cleared after the first failed write; the list then lives in memory only.
    persistent: bool,
}

impl Watchlist {
    /// Load the saved list. Missing or unreadable data yields an empty list.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let items = match store.get(WATCHLIST_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<MovieSummary>>(&blob) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("Ignoring malformed watchlist: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read watchlist: {e}");
                Vec::new()
            }
        };

        let mut ids = HashSet::with_capacity(items.len());
        let items: Vec<_> = items
            .into_iter()
            .filter(|m| ids.insert(m.id.clone()))
            .collect();
        tracing::debug!(count = items.len(), "watchlist loaded");

        Self {
            items,
            ids,
            store,
            persistent: true,
        }
    }

    /// Remove `movie` if saved, otherwise append it. Persists the whole list.
    pub fn toggle(&mut self, movie: &MovieSummary) -> &[MovieSummary] {
        if self.ids.remove(&movie.id) {
            self.items.retain(|m| m.id != movie.id);
            tracing::debug!(id = %movie.id, "removed from watchlist");
        } else {
            self.ids.insert(movie.id.clone());
            self.items.push(movie.clone());
            tracing::debug!(id = %movie.id, "added to watchlist");
        }
        self.persist();
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether changes are still being written to storage.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        let result = serde_json::to_string(&self.items)
            .map_err(Into::into)
            .and_then(|blob| self.store.set(WATCHLIST_KEY, &blob));
        if let Err(e) = result {
            tracing::warn!("Failed to save watchlist, keeping it in memory for this session: {e}");
            self.persistent = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::{movie, FailingStore};

    fn blob(store: &MemoryStore) -> Option<String> {
        store.get(WATCHLIST_KEY).unwrap()
    }

    #[test]
    fn test_load_missing_is_empty() {
        let list = Watchlist::load(Box::new(MemoryStore::new()));
        assert!(list.is_empty());
        assert!(list.is_persistent());
    }

    #[test]
    fn test_load_corrupted_is_empty() {
        let store = MemoryStore::new();
        store.set(WATCHLIST_KEY, "{not json").unwrap();
        assert!(Watchlist::load(Box::new(store.clone())).is_empty());

        store.set(WATCHLIST_KEY, r#"{"imdbID":"tt1"}"#).unwrap();
        assert!(Watchlist::load(Box::new(store)).is_empty());
    }

    #[test]
    fn test_load_unreadable_store_is_empty() {
        let list = Watchlist::load(Box::new(FailingStore));
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let store = MemoryStore::new();
        let blob = serde_json::to_string(&[movie("tt1", "A"), movie("tt2", "B"), movie("tt1", "C")])
            .unwrap();
        store.set(WATCHLIST_KEY, &blob).unwrap();

        let list = Watchlist::load(Box::new(store));
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].title, "A");
        assert!(list.contains("tt2"));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let store = MemoryStore::new();
        let mut list = Watchlist::load(Box::new(store.clone()));

        let items = list.toggle(&movie("tt1", "Batman Begins"));
        assert_eq!(items.len(), 1);
        assert!(list.contains("tt1"));
        let saved: Vec<MovieSummary> = serde_json::from_str(&blob(&store).unwrap()).unwrap();
        assert_eq!(saved[0].id, "tt1");

        list.toggle(&movie("tt1", "Batman Begins"));
        assert!(!list.contains("tt1"));
        assert_eq!(blob(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn test_double_toggle_restores_blob() {
        let store = MemoryStore::new();
        let mut list = Watchlist::load(Box::new(store.clone()));
        list.toggle(&movie("tt1", "A"));
        list.toggle(&movie("tt2", "B"));
        let before = blob(&store);

        // Not yet saved: add then remove.
        list.toggle(&movie("tt3", "C"));
        list.toggle(&movie("tt3", "C"));
        assert!(!list.contains("tt3"));
        assert_eq!(blob(&store), before);

        // Last saved entry: remove then re-add.
        list.toggle(&movie("tt2", "B"));
        list.toggle(&movie("tt2", "B"));
        assert!(list.contains("tt2"));
        assert_eq!(blob(&store), before);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut list = Watchlist::load(Box::new(MemoryStore::new()));
        for (id, title) in [("tt3", "C"), ("tt1", "A"), ("tt2", "B")] {
            list.toggle(&movie(id, title));
        }
        list.toggle(&movie("tt1", "A"));
        let ids: Vec<_> = list.items().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["tt3", "tt2"]);
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let mut list = Watchlist::load(Box::new(FailingStore));
        list.toggle(&movie("tt1", "A"));
        assert!(!list.is_persistent());
        assert!(list.contains("tt1"));

        list.toggle(&movie("tt2", "B"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_reload_sees_saved_items() {
        let store = MemoryStore::new();
        let mut list = Watchlist::load(Box::new(store.clone()));
        list.toggle(&movie("tt1", "A"));
        list.toggle(&movie("tt2", "B"));

        let reloaded = Watchlist::load(Box::new(store));
        assert_eq!(reloaded.items(), list.items());
    }
}
