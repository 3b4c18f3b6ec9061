//! Selection, modal visibility and theme, plus the per-card render data.

use serde::{Deserialize, Serialize};

use scenero_api::traits::MovieSummary;

use crate::watchlist::Watchlist;

/// Poster shown on a result card when the movie has none.
pub const CARD_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";
/// Poster shown in the detail modal when the movie has none.
pub const MODAL_PLACEHOLDER: &str = "https://via.placeholder.com/400x600?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Which movie the detail modal shows, and whether it is open.
#[derive(Debug, Default)]
pub struct ViewState {
    selected: Option<MovieSummary>,
    modal_visible: bool,
    theme: Theme,
}

impl ViewState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    pub fn select(&mut self, movie: MovieSummary) {
        self.selected = Some(movie);
        self.modal_visible = true;
    }

    /// Hide the modal. The last selection is kept until the next `select`.
    pub fn close_modal(&mut self) {
        self.modal_visible = false;
    }

    /// The movie to show in the modal, if it is open.
    pub fn modal(&self) -> Option<&MovieSummary> {
        self.selected.as_ref().filter(|_| self.modal_visible)
    }

    pub fn selected(&self) -> Option<&MovieSummary> {
        self.selected.as_ref()
    }

    pub fn is_modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }
}

/// Everything a result card needs, derived at render time.
#[derive(Debug, Clone, Copy)]
pub struct Card<'a> {
    pub movie: &'a MovieSummary,
    pub poster: &'a str,
    pub in_watchlist: bool,
}

pub fn cards<'a>(results: &'a [MovieSummary], watchlist: &Watchlist) -> Vec<Card<'a>> {
    results
        .iter()
        .map(|movie| Card {
            movie,
            poster: movie.poster_or(CARD_PLACEHOLDER),
            in_watchlist: watchlist.contains(&movie.id),
        })
        .collect()
}
