//! In-process providers and stores for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use scenero_api::traits::{
    CatalogItem, CatalogProvider, Category, MovieSummary, SearchHit, SearchOutcome,
    SearchProvider,
};

use crate::error::SceneroError;
use crate::storage::KeyValueStore;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StubError(pub String);

pub fn movie(id: &str, title: &str) -> MovieSummary {
    let mut movie = MovieSummary::new(id, title, "2005");
    movie.rating = Some("7.5".into());
    movie
}

fn hit(id: &str) -> SearchHit {
    SearchHit {
        id: id.to_string(),
        title: format!("hit {id}"),
        year: "2005".into(),
        kind: Some("movie".into()),
        poster: None,
    }
}

/// Store whose reads and writes always fail.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, SceneroError> {
        Err(SceneroError::Storage("quota exceeded".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SceneroError> {
        Err(SceneroError::Storage("quota exceeded".into()))
    }
}

/// Search provider answering from tables.
#[derive(Default)]
pub struct StubSearch {
    searches: HashMap<String, Result<SearchOutcome, String>>,
    details: HashMap<String, MovieSummary>,
    failing_details: HashSet<String>,
    search_delays: HashMap<String, Duration>,
    detail_delays: HashMap<String, Duration>,
    queries: Mutex<Vec<String>>,
    detail_calls: AtomicUsize,
}

impl StubSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `query` finds `ids`, each with a successful detail record.
    pub fn with_hits(mut self, query: &str, ids: &[&str]) -> Self {
        let hits = ids.iter().map(|id| hit(id)).collect();
        self.searches
            .insert(query.to_string(), Ok(SearchOutcome::Found(hits)));
        for id in ids {
            self.details
                .entry(id.to_string())
                .or_insert_with(|| movie(id, &format!("Movie {id}")));
        }
        self
    }

    pub fn with_not_found(mut self, query: &str, message: Option<&str>) -> Self {
        self.searches.insert(
            query.to_string(),
            Ok(SearchOutcome::NotFound(message.map(str::to_string))),
        );
        self
    }

    pub fn with_search_error(mut self, query: &str, message: &str) -> Self {
        self.searches
            .insert(query.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_failing_detail(mut self, id: &str) -> Self {
        self.failing_details.insert(id.to_string());
        self
    }

    pub fn with_search_delay(mut self, query: &str, delay: Duration) -> Self {
        self.search_delays.insert(query.to_string(), delay);
        self
    }

    pub fn with_detail_delay(mut self, id: &str, delay: Duration) -> Self {
        self.detail_delays.insert(id.to_string(), delay);
        self
    }

    /// Queries passed to `search`, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

impl SearchProvider for StubSearch {
    type Error = StubError;

    async fn search(&self, query: &str) -> Result<SearchOutcome, StubError> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        match self.searches.get(query) {
            Some(Ok(outcome)) => Ok(outcome.clone()),
            Some(Err(message)) => Err(StubError(message.clone())),
            None => Ok(SearchOutcome::NotFound(None)),
        }
    }

    async fn detail(&self, id: &str) -> Result<MovieSummary, StubError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.detail_delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_details.contains(id) {
            return Err(StubError("connection reset".into()));
        }
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| StubError(format!("no detail for {id}")))
    }
}

/// Catalog provider answering from a table. Unlisted categories fail.
#[derive(Default)]
pub struct StubCatalog {
    rows: HashMap<Category, Vec<CatalogItem>>,
    calls: AtomicUsize,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, category: Category, titles: &[&str]) -> Self {
        let items = titles
            .iter()
            .enumerate()
            .map(|(i, title)| CatalogItem {
                id: i as u64 + 1,
                title: title.to_string(),
                poster_path: Some(format!("/{i}.jpg")),
                release_date: None,
                vote_average: None,
            })
            .collect();
        self.rows.insert(category, items);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogProvider for StubCatalog {
    type Error = StubError;

    async fn list_by_category(&self, category: Category) -> Result<Vec<CatalogItem>, StubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .get(&category)
            .cloned()
            .ok_or_else(|| StubError(format!("{} unavailable", category.as_path())))
    }
}
