//! usrlist-manager binary entry point.
//!
//! Parses options, starts logging, initializes the terminal in raw mode,
//! runs the TUI event loop on a single-threaded tokio runtime, and restores
//! the terminal state on exit.
//!
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use usrlist_manager::app::{self, AppState, Keymap, Theme};
use usrlist_manager::config::{Cli, Settings};
use usrlist_manager::logging;
use usrlist_manager::store::MemoryStore;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let settings = Settings::from(Cli::parse());
    logging::init(&settings.log_file, &settings.log_level)?;
    tracing::info!(?settings, "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;

    let store = Arc::new(MemoryStore::seeded());
    let state = AppState::new(store, &settings)
        .with_theme(Theme::load_or_init(&settings.theme_path))
        .with_keymap(Keymap::load_or_init(&settings.keybinds_path));

    let mut terminal = init_terminal().context("init terminal")?;

    let res = runtime.block_on(app::run(&mut terminal, state));

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
