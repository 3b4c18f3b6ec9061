//! Two-phase search (title search, then per-title detail) and the session
//! state it feeds.

use futures::future::try_join_all;

use scenero_api::traits::{MovieSummary, SearchOutcome, SearchProvider};

/// Shown when the provider reports no match without saying why.
pub const NO_RESULTS_MESSAGE: &str = "No results found";
/// Shown when an error has no message of its own.
pub const GENERIC_ERROR: &str = "Error";

/// Search `query` and enrich every hit with its detail record.
///
/// Details are fetched concurrently and returned in search order. Any failure
/// fails the whole search; the error is already a display string.
pub async fn run_search<P: SearchProvider>(
    provider: &P,
    query: &str,
) -> Result<Vec<MovieSummary>, String> {
    let hits = match provider.search(query).await {
        Ok(SearchOutcome::Found(hits)) => hits,
        Ok(SearchOutcome::NotFound(message)) => {
            return Err(message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string()));
        }
        Err(e) => return Err(error_message(&e)),
    };

    tracing::debug!(query, hits = hits.len(), "enriching search hits");
    try_join_all(hits.iter().map(|hit| provider.detail(&hit.id)))
        .await
        .map_err(|e| error_message(&e))
}

fn error_message(error: &dyn std::error::Error) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message
    }
}

/// Where the latest search cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Query text, results and progress of the search box.
///
/// Each started cycle gets a sequence number; only the latest cycle may
/// publish, so a slow response cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct SearchSession {
    raw_query: String,
    committed_query: String,
    results: Vec<MovieSummary>,
    loading: bool,
    error: String,
    phase: SearchPhase,
    issued: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw_query(&mut self, raw: String) {
        self.raw_query = raw;
    }

    /// Record a committed query. Starts a cycle and returns its sequence
    /// number unless the query is empty.
    pub fn commit(&mut self, query: String) -> Option<u64> {
        self.committed_query = query;
        if self.committed_query.is_empty() {
            return None;
        }

        self.issued += 1;
        self.loading = true;
        self.error.clear();
        self.results.clear();
        self.phase = SearchPhase::Loading;
        tracing::debug!(seq = self.issued, query = %self.committed_query, "search started");
        Some(self.issued)
    }

    /// Publish the outcome of cycle `seq`. Returns `false` if a newer cycle
    /// has started, in which case nothing changes.
    pub fn finish(&mut self, seq: u64, result: Result<Vec<MovieSummary>, String>) -> bool {
        if seq != self.issued {
            tracing::debug!(seq, latest = self.issued, "discarding stale search result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(results) => {
                tracing::debug!(seq, count = results.len(), "search finished");
                self.results = results;
                self.phase = SearchPhase::Success;
            }
            Err(error) => {
                tracing::debug!(seq, %error, "search failed");
                self.error = error;
                self.phase = SearchPhase::Failed;
            }
        }
        true
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Empty when there is no error.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }
}
