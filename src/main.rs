// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Melodeck.
//!
//! A terminal music player that scans local folders into an artist, album
//! and track library and plays albums as playlists.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and the
//!   playback coordinator.
//! * A **Task Worker** owns the music library and handles loading, scanning
//!   and browse queries.
//! * **Tickers** send periodic render ticks and playback position polls.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod browser;
mod commander;
mod config;
mod events;
mod library;
mod logging;
mod model;
mod player;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    browser::MediaBrowser,
    commander::Commander,
    config::AppConfig,
    events::{AppEvent, process_events},
    library::{LibraryService, ScanSettings, store::LibraryStore},
    player::{PlayerError, coordinator::PlaybackCoordinator, ticker::Ticker},
    tasks::AppTask,
    theme::Theme,
};

const RENDER_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainView {
    Browse,
    NowPlaying,
}

/// The message on the bottom line.
#[derive(Debug)]
pub(crate) struct StatusLine {
    pub(crate) text: String,
    pub(crate) is_error: bool,
}

/// Application state.
pub(crate) struct App {
    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub player: PlaybackCoordinator,

    pub commander: Commander,
    pub media_browser: MediaBrowser,
    pub now_playing_state: ListState,
    /// The playlist index the Now Playing cursor last followed.
    pub followed_index: Option<usize>,

    pub status: Option<StatusLine>,
    /// False until the task worker has published the first artist list.
    pub library_loaded: bool,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(task_tx: Sender<AppTask>, player: PlaybackCoordinator) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            theme: Theme::default(),
            main_view: MainView::Browse,
            event_tx,
            event_rx,
            task_tx,
            player,
            commander: Commander::new(),
            media_browser: MediaBrowser::new(),
            now_playing_state: ListState::default(),
            followed_index: None,
            status: None,
            library_loaded: false,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!("{}", text);
        self.status = Some(StatusLine {
            text,
            is_error: true,
        });
    }

    /// Moves the Now Playing cursor to the entry being played.
    pub fn follow_playlist(&mut self, index: usize) {
        self.followed_index = Some(index);
        self.now_playing_state.select(Some(index));
    }

    /// Shows a failed playback action on the status line.
    pub fn report(&mut self, result: Result<(), PlayerError>) {
        if let Err(e) = result {
            self.set_error(e.to_string());
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging and the audio backend, manages the
/// terminal lifecycle, and returns an error if any part of the execution
/// fails.
fn main() -> Result<()> {
    let config = config::load_config();

    logging::init_logging(&config.log_path(), &config.log_filter)
        .context("Failed to initialise logging")?;
    tracing::info!("Starting with configuration {:?}", config);

    let backend = player::create_backend(config.audio_backend)
        .context("Failed to start the audio backend")?;
    let player = PlaybackCoordinator::new(backend);
    tracing::info!("Using the {} audio backend", player.backend_name());

    let (task_tx, task_rx) = mpsc::channel();
    let mut app = App::new(task_tx, player);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, &config, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!("Application error: {:#}", e);
    }
    res.context("Application error occurred")
}

fn library_service(config: &AppConfig) -> LibraryService {
    let settings = ScanSettings {
        media_dirs: config.media_paths(),
        extensions: config.extensions.clone(),
        rescan_interval: Duration::from_secs(config.rescan_interval_hours * 60 * 60),
        mock_fallback: config.mock_fallback,
    };

    LibraryService::new(LibraryStore::open(config.storage_path()), settings)
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();

    // Set the background of the entire terminal window, without this we'd get
    // a thin outline in the emulator's own colour
    util::term::set_terminal_bg(&mut stdout, app.theme.background_colour).ok();

    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is best-effort and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg(terminal.backend_mut()).ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns:
/// * The task worker, owning the library service.
/// * An input thread to poll for terminal keyboard events.
/// * A render ticker and a playback position ticker.
///
/// The tickers are cancelled when the event loop ends.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    tasks::spawn_task_worker(library_service(config), task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) => {
                    if tx_keys.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Failed to read terminal input: {}", e);
                    break;
                }
            }
        }
    });

    // The render tick is effectively the minimum "frame rate" for the TUI.
    let mut render_ticker = Ticker::spawn(RENDER_INTERVAL, app.event_tx.clone(), AppEvent::Tick);
    let mut poll_ticker = Ticker::spawn(
        Duration::from_millis(config.position_poll_ms.max(1)),
        app.event_tx.clone(),
        AppEvent::PollPlayback,
    );

    app.task_tx
        .send(AppTask::LoadLibrary)
        .context("Failed to request the library")?;

    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    let res = process_events(terminal, app);

    poll_ticker.cancel();
    render_ticker.cancel();

    if let Err(e) = app.player.stop() {
        tracing::warn!("Failed to stop playback on exit: {}", e);
    }

    res
}
