mod input;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use scenero_api::omdb::OmdbClient;
use scenero_api::tmdb::TmdbClient;
use scenero_core::app::{App, Message};
use scenero_core::config::AppConfig;
use scenero_core::error::SceneroError;
use scenero_core::storage::{FileStore, KeyValueStore, MemoryStore};
use scenero_core::view::Theme;

use input::Command;

#[derive(Debug, Parser)]
#[command(name = "scenero", version, about = "Search movies, browse curated rows and keep a watchlist")]
struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the watchlist and log files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. `scenero=debug`. Defaults to `RUST_LOG`, then `scenero=info`.
    #[arg(long)]
    log_level: Option<String>,

    /// Log to stderr instead of a file.
    #[arg(long)]
    log_stderr: bool,

    /// Keep the watchlist in memory only.
    #[arg(long)]
    in_memory: bool,
}

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Scenero(#[from] SceneroError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(AppConfig::data_dir);
    let _guard = init_logging(&cli, &data_dir);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("scenero: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli, data_dir)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("scenero: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli, data_dir: &std::path::Path) -> Option<WorkerGuard> {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scenero=info")),
    };

    // stdout is the view, so logs go elsewhere.
    if cli.log_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    }

    let log_dir = data_dir.join("logs");
    match log_file_writer(&log_dir) {
        Ok((writer, guard)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        Err(e) => {
            eprintln!("scenero: cannot log to {}: {e}; logging to stderr", log_dir.display());
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// Daily rolling `scenero.<date>.log` files under `dir`.
fn log_file_writer(dir: &std::path::Path) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("scenero")
        .filename_suffix("log")
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

async fn run(cli: Cli, data_dir: PathBuf) -> Result<(), ShellError> {
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    let search = Arc::new(OmdbClient::with_base_url(
        config.omdb.base_url.clone(),
        config.omdb.api_key.clone(),
    ));
    let catalog = Arc::new(TmdbClient::with_base_url(
        config.tmdb.base_url.clone(),
        config.tmdb.api_key.clone(),
    ));
    let store: Box<dyn KeyValueStore> = if cli.in_memory {
        Box::new(MemoryStore::new())
    } else {
        tracing::info!(dir = %data_dir.display(), "watchlist storage");
        Box::new(FileStore::new(data_dir))
    };

    let (mut app, mut rx) = App::new(&config, search, catalog, store);
    app.mount();

    let mut stdout = std::io::stdout();
    render::banner(&mut stdout)?;
    prompt(&mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match input::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => render::help(&mut stdout)?,
                    Ok(Command::Watchlist) => render::watchlist(&mut stdout, app.watchlist())?,
                    Ok(Command::Rows) => render::rows(&mut stdout, app.rows(), app.image_base())?,
                    Ok(command) => {
                        let redraw = !matches!(command, Command::Edit(_));
                        let theme_changed = command == Command::Theme;
                        if let Some(message) = command.into_message() {
                            app.update(message);
                        }
                        if theme_changed {
                            remember_theme(&config_path, app.view().theme());
                        }
                        if redraw {
                            draw(&mut stdout, &app)?;
                        }
                    }
                    Err(e) => writeln!(stdout, "{e} (:help lists commands)")?,
                }
                prompt(&mut stdout)?;
            }
            Some(message) = rx.recv() => {
                let redraw = match &message {
                    Message::SearchFinished { .. } => true,
                    Message::QueryCommitted(c) => !c.query.is_empty(),
                    _ => false,
                };
                if let Message::RowLoaded(category, items) = &message {
                    tracing::info!(row = %category, count = items.len(), "row ready");
                }
                app.update(message);
                if redraw {
                    draw(&mut stdout, &app)?;
                    prompt(&mut stdout)?;
                }
            }
        }
    }

    tracing::info!("bye");
    Ok(())
}

fn remember_theme(path: &std::path::Path, theme: Theme) {
    if let Err(e) = AppConfig::save_theme(path, theme) {
        tracing::warn!(path = %path.display(), "Failed to save theme: {e}");
    }
}

fn draw(out: &mut impl Write, app: &App<OmdbClient, TmdbClient>) -> std::io::Result<()> {
    render::screen(out, app.session(), app.watchlist(), app.view())
}

fn prompt(out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "search> ")?;
    out.flush()
}
