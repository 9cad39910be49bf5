//! grind-tui entry point: terminal lifecycle and the event loop.

mod app;
mod celebrate;
mod cli;
mod dataset;
mod input;
mod models;
mod query;
mod storage;
mod store;
mod theme;
mod ui;
mod watcher;

use std::io::{self, stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::storage::ProgressDb;
use crate::store::ProgressStore;

/// Animation frame interval for the celebration overlay
const TICK_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let config = cli::parse_args()?;
    init_logging(&config.db_path);

    let db = ProgressDb::open(&config.db_path).map_err(io::Error::other)?;
    let store = ProgressStore::load(db);
    let dataset = dataset::load(config.dataset_path.as_deref());
    let mut app = App::new(dataset, store, config.reduced_motion);

    // Keep the watcher alive for the lifetime of the loop; dropping it stops
    // the hot reload but nothing else
    let _watcher = app.dataset_source.clone().and_then(|path| {
        watcher::setup_dataset_watcher(path, Arc::clone(&app.dataset_needs_reload))
    });

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    install_panic_hook();
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run the app
    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        app.reload_dataset_if_needed();

        if app.take_celebration_request() {
            let size = terminal.size()?;
            app.celebration.play(Rect::new(0, 0, size.width, size.height));
        }

        terminal.draw(|frame| ui::render(app, frame))?;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            app.celebration.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Route logs to a file next to the database; stderr is unusable once the
/// terminal is in raw mode. Logging failure is never fatal.
fn init_logging(db_path: &Path) {
    let log_path = db_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("grind-tui.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(file) = std::fs::File::create(&log_path) {
        let filter =
            EnvFilter::try_from_env("GRIND_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .try_init();
    }
}

/// Central handler for uncaught panics: restore the terminal so the message
/// is readable, and log it
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        tracing::error!("panic: {info}");
        default_hook(info);
    }));
}
