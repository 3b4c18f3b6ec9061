//! Line input. Plain lines replace the search text; `:` lines are actions.

use scenero_core::app::Message;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// New contents of the search field.
    Edit(String),
    /// 1-based result index.
    Open(usize),
    Close,
    /// 1-based result index, or the movie in the open modal.
    Fav(Option<usize>),
    Watchlist,
    Rows,
    Theme,
    Help,
    Quit,
}

impl Command {
    /// The controller message for this command, if it has one.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Self::Edit(raw) => Some(Message::QueryChanged(raw)),
            Self::Open(n) => Some(Message::Select(n - 1)),
            Self::Close => Some(Message::CloseModal),
            Self::Fav(Some(n)) => Some(Message::ToggleWatchlist(n - 1)),
            Self::Fav(None) => Some(Message::ToggleWatchlistSelected),
            Self::Theme => Some(Message::ToggleTheme),
            Self::Watchlist | Self::Rows | Self::Help | Self::Quit => None,
        }
    }
}

pub fn parse(line: &str) -> Result<Command, String> {
    let Some(action) = line.trim_start().strip_prefix(':') else {
        return Ok(Command::Edit(line.to_string()));
    };

    let mut parts = action.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match name {
        "open" | "o" => Ok(Command::Open(index(arg)?)),
        "close" | "c" => Ok(Command::Close),
        "fav" | "f" => match arg {
            Some(_) => Ok(Command::Fav(Some(index(arg)?))),
            None => Ok(Command::Fav(None)),
        },
        "list" | "l" => Ok(Command::Watchlist),
        "rows" | "r" => Ok(Command::Rows),
        "theme" => Ok(Command::Theme),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command :{other}")),
    }
}

fn index(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or("expected a result number")?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("invalid result number {arg:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_edit() {
        assert_eq!(parse("  the batman ").unwrap(), Command::Edit("  the batman ".into()));
        assert_eq!(parse("").unwrap(), Command::Edit(String::new()));
    }

    #[test]
    fn test_actions() {
        assert_eq!(parse(":open 2").unwrap(), Command::Open(2));
        assert_eq!(parse(":f 1").unwrap(), Command::Fav(Some(1)));
        assert_eq!(parse(":fav").unwrap(), Command::Fav(None));
        assert_eq!(parse(":rows").unwrap(), Command::Rows);
        assert_eq!(parse(" :q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_bad_actions() {
        assert!(parse(":open").is_err());
        assert!(parse(":open 0").is_err());
        assert!(parse(":open two").is_err());
        assert!(parse(":explode").is_err());
    }

    #[test]
    fn test_indices_become_zero_based() {
        assert!(matches!(
            Command::Open(3).into_message(),
            Some(Message::Select(2))
        ));
        assert!(matches!(
            Command::Fav(Some(1)).into_message(),
            Some(Message::ToggleWatchlist(0))
        ));
        assert!(Command::Rows.into_message().is_none());
    }
}
