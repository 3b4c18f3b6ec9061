//! Turns keystroke-rate query edits into at most one commit per pause.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Quiet period before a query is committed.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// A trimmed query that survived the quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub generation: u64,
    pub query: String,
}

/// Restartable commit timer.
///
/// Every [`push`](Self::push) aborts the pending timer and starts a new one.
/// Commits are delivered on the channel wrapped by `wrap`. A commit may still
/// arrive after a newer push if its timer fired before the abort; callers
/// drop those with [`is_current`](Self::is_current).
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<T>,
    wrap: fn(Committed) -> T,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<T>, wrap: fn(Committed) -> T) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
            tx,
            wrap,
        }
    }

    /// Restart the timer for `raw`. Must be called within a tokio runtime.
    pub fn push(&mut self, raw: &str) -> u64 {
        self.cancel();
        self.generation += 1;

        let committed = Committed {
            generation: self.generation,
            query: raw.trim().to_string(),
        };
        let delay = self.delay;
        let tx = self.tx.clone();
        let wrap = self.wrap;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(generation = committed.generation, query = %committed.query, "query committed");
            let _ = tx.send(wrap(committed));
        }));
        self.generation
    }

    /// Abort the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
