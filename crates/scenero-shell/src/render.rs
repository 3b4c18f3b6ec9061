//! Text rendering of the controller state.

use std::io::{self, Write};

use scenero_api::traits::{available, MovieSummary};
use scenero_core::catalog::CatalogRows;
use scenero_core::search::SearchSession;
use scenero_core::view::{self, ViewState, MODAL_PLACEHOLDER};
use scenero_core::watchlist::Watchlist;

const LOADING: &str = "Lights, camera... fetching your movies";

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Scenero: Lights. Camera. Search.")?;
    writeln!(out, "Type a title to search, or :help for commands.")
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "  <text>      search for <text>")?;
    writeln!(out, "  :open N     show details for result N")?;
    writeln!(out, "  :close      close the details")?;
    writeln!(out, "  :fav N      add or remove result N from the watchlist")?;
    writeln!(out, "  :fav        add or remove the movie being shown")?;
    writeln!(out, "  :list       show the watchlist")?;
    writeln!(out, "  :rows       show upcoming, popular and top rated movies")?;
    writeln!(out, "  :theme      switch between dark and light")?;
    writeln!(out, "  :quit       exit")
}

/// Search status, result cards, and the modal when it is open.
pub fn screen(
    out: &mut impl Write,
    session: &SearchSession,
    watchlist: &Watchlist,
    view: &ViewState,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{} theme]", view.theme())?;
    if session.is_loading() {
        writeln!(out, "{LOADING}")?;
    }
    if !session.error().is_empty() {
        writeln!(out, "! {}", session.error())?;
    }

    for (i, card) in view::cards(session.results(), watchlist).iter().enumerate() {
        let heart = if card.in_watchlist { "♥" } else { "♡" };
        writeln!(
            out,
            "{:>3}. {heart} {} ({})  ⭐ {}",
            i + 1,
            card.movie.title,
            card.movie.year,
            available(&card.movie.rating).unwrap_or("N/A"),
        )?;
    }

    if let Some(movie) = view.modal() {
        modal(out, movie, watchlist.contains(&movie.id))?;
    }
    Ok(())
}

fn modal(out: &mut impl Write, movie: &MovieSummary, saved: bool) -> io::Result<()> {
    fn field(value: &Option<String>) -> &str {
        available(value).unwrap_or("N/A")
    }

    writeln!(out, "┌ {}{}", movie.title, if saved { "  ♥" } else { "" })?;
    writeln!(out, "│ Year:    {}", movie.year)?;
    writeln!(out, "│ Genre:   {}", field(&movie.genre))?;
    writeln!(out, "│ Runtime: {}", field(&movie.runtime))?;
    writeln!(out, "│ IMDb:    ⭐ {}", field(&movie.rating))?;
    writeln!(out, "│ Actors:  {}", field(&movie.actors))?;
    writeln!(out, "│ Poster:  {}", movie.poster_or(MODAL_PLACEHOLDER))?;
    if let Some(plot) = available(&movie.plot) {
        writeln!(out, "│")?;
        writeln!(out, "│ {plot}")?;
    }
    writeln!(out, "└ :close  :fav")
}

pub fn watchlist(out: &mut impl Write, watchlist: &Watchlist) -> io::Result<()> {
    writeln!(out)?;
    if watchlist.is_empty() {
        return writeln!(out, "Your watchlist is empty.");
    }
    writeln!(out, "Watchlist ({}):", watchlist.len())?;
    for movie in watchlist.items() {
        writeln!(out, "  ♥ {} ({})", movie.title, movie.year)?;
    }
    if !watchlist.is_persistent() {
        writeln!(out, "  (not saved: changes last until you quit)")?;
    }
    Ok(())
}

pub fn rows(out: &mut impl Write, rows: &CatalogRows, image_base: &str) -> io::Result<()> {
    for (category, items) in rows.iter() {
        writeln!(out)?;
        writeln!(out, "{}", category.to_string().to_uppercase())?;
        if items.is_empty() {
            writeln!(out, "  (nothing to show)")?;
        }
        for item in items {
            let year = item
                .release_date
                .map(|d| format!(" ({})", d.format("%Y")))
                .unwrap_or_default();
            let poster = item.poster_url(image_base).unwrap_or_default();
            writeln!(out, "  {}{year}  {poster}", item.title)?;
        }
    }
    Ok(())
}
