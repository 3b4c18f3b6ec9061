//! Top-level controller owning all view-facing state.
//!
//! Input and async completions arrive as [`Message`]s and are applied one at
//! a time by [`App::update`]. Work that suspends (the debounce timer, provider
//! calls) runs in spawned tasks that report back on the channel returned by
//! [`App::new`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use scenero_api::traits::{CatalogItem, CatalogProvider, Category, MovieSummary, SearchProvider};

use crate::catalog::{self, CatalogRows};
use crate::config::AppConfig;
use crate::debounce::{Committed, Debouncer, SEARCH_DEBOUNCE_MS};
use crate::search::{self, SearchSession};
use crate::storage::KeyValueStore;
use crate::view::{self, Card, ViewState};
use crate::watchlist::Watchlist;

#[derive(Debug)]
pub enum Message {
    /// The search field changed. Both search inputs write this one value.
    QueryChanged(String),
    QueryCommitted(Committed),
    SearchFinished {
        seq: u64,
        result: Result<Vec<MovieSummary>, String>,
    },
    RowLoaded(Category, Vec<CatalogItem>),
    /// Open the detail modal for the result at this index.
    Select(usize),
    CloseModal,
    /// Toggle watchlist membership of the result at this index.
    ToggleWatchlist(usize),
    /// Toggle watchlist membership of the movie in the open modal.
    ToggleWatchlistSelected,
    ToggleTheme,
}

pub struct App<S, C> {
    search_provider: Arc<S>,
    catalog_provider: Arc<C>,
    session: SearchSession,
    debouncer: Debouncer<Message>,
    watchlist: Watchlist,
    view: ViewState,
    rows: CatalogRows,
    image_base: String,
    tx: mpsc::UnboundedSender<Message>,
}

impl<S, C> App<S, C>
where
    S: SearchProvider + 'static,
    C: CatalogProvider + 'static,
{
    /// Build the controller and load the watchlist from `store`.
    ///
    /// The receiver yields messages produced by background work; feed each
    /// one back into [`update`](Self::update).
    pub fn new(
        config: &AppConfig,
        search_provider: Arc<S>,
        catalog_provider: Arc<C>,
        store: Box<dyn KeyValueStore>,
    ) -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(
            Duration::from_millis(SEARCH_DEBOUNCE_MS),
            tx.clone(),
            Message::QueryCommitted,
        );

        let app = Self {
            search_provider,
            catalog_provider,
            session: SearchSession::new(),
            debouncer,
            watchlist: Watchlist::load(store),
            view: ViewState::new(config.ui.theme),
            rows: CatalogRows::default(),
            image_base: config.tmdb.image_base.clone(),
            tx,
        };
        (app, rx)
    }

    /// Start loading the catalog rows. Each row reports back on its own.
    pub fn mount(&self) {
        tracing::info!("loading catalog rows");
        for &category in Category::ALL {
            let provider = Arc::clone(&self.catalog_provider);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let items = catalog::load_row(provider.as_ref(), category).await;
                let _ = tx.send(Message::RowLoaded(category, items));
            });
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::QueryChanged(raw) => {
                self.debouncer.push(&raw);
                self.session.set_raw_query(raw);
            }
            Message::QueryCommitted(committed) => {
                if !self.debouncer.is_current(committed.generation) {
                    tracing::debug!(generation = committed.generation, "dropping superseded commit");
                    return;
                }
                if let Some(seq) = self.session.commit(committed.query) {
                    self.spawn_search(seq);
                }
            }
            Message::SearchFinished { seq, result } => {
                self.session.finish(seq, result);
            }
            Message::RowLoaded(category, items) => {
                self.rows.set(category, items);
            }
            Message::Select(index) => match self.session.results().get(index) {
                Some(movie) => self.view.select(movie.clone()),
                None => tracing::debug!(index, "select out of range"),
            },
            Message::CloseModal => self.view.close_modal(),
            Message::ToggleWatchlist(index) => match self.session.results().get(index) {
                Some(movie) => {
                    let movie = movie.clone();
                    self.watchlist.toggle(&movie);
                }
                None => tracing::debug!(index, "toggle out of range"),
            },
            Message::ToggleWatchlistSelected => {
                if let Some(movie) = self.view.modal().cloned() {
                    self.watchlist.toggle(&movie);
                }
            }
            Message::ToggleTheme => self.view.toggle_theme(),
        }
    }

    fn spawn_search(&self, seq: u64) {
        let provider = Arc::clone(&self.search_provider);
        let query = self.session.committed_query().to_string();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = search::run_search(provider.as_ref(), &query).await;
            let _ = tx.send(Message::SearchFinished { seq, result });
        });
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn rows(&self) -> &CatalogRows {
        &self.rows
    }

    /// Prefix for catalog poster paths.
    pub fn image_base(&self) -> &str {
        &self.image_base
    }

    /// Result cards with watchlist state resolved now.
    pub fn cards(&self) -> Vec<Card<'_>> {
        view::cards(self.session.results(), &self.watchlist)
    }
}
