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

//! Application event handling.
//!
//! Every input to the UI thread arrives as an [`AppEvent`] on a single
//! channel: key presses from the input thread, periodic ticks, results sent
//! back by the task worker, and events raised by the UI itself. The
//! [`process_events`] loop applies each event to the [`App`] state and then
//! redraws the terminal.
//!
//! # Organization
//!
//! * `handlers`: One function per event.
//! * `key_handlers`: Keyboard routing and key bindings.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    model::{Album, Artist, Track},
    render::draw,
};

#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Redraw.
    Tick,
    /// Refresh the playback position and process backend events.
    PollPlayback,

    SetMainView(MainView),

    ArtistSelectionChanged(String),
    AlbumSelectionChanged(String),

    SetBrowserArtists(Vec<Artist>),
    SetBrowserAlbums(Vec<Album>),
    SetBrowserTracks(Vec<Track>),

    StartPlayback { track: Track, playlist: Vec<Track> },
    SeekTo(f64),
    SetVolume(f64),

    Status(String),
    Error(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until an exit event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        // The redraw after every event is all a tick needs.
        AppEvent::Tick => {}
        AppEvent::PollPlayback => handle_poll_playback(app),
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),
        AppEvent::ArtistSelectionChanged(id) => handle_artist_selection_changed(app, id)?,
        AppEvent::AlbumSelectionChanged(id) => handle_album_selection_changed(app, id)?,
        AppEvent::SetBrowserArtists(artists) => handle_set_browser_artists(app, artists)?,
        AppEvent::SetBrowserAlbums(albums) => handle_set_browser_albums(app, albums)?,
        AppEvent::SetBrowserTracks(tracks) => handle_set_browser_tracks(app, tracks),
        AppEvent::StartPlayback { track, playlist } => handle_start_playback(app, track, playlist),
        AppEvent::SeekTo(seconds) => handle_seek_to(app, seconds),
        AppEvent::SetVolume(volume) => handle_set_volume(app, volume),
        AppEvent::Status(message) => handle_status(app, message),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::ExitApplication => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use super::*;
    use crate::{
        library::mock::mock_library,
        player::{PlayerState, coordinator::PlaybackCoordinator, simulated::SimulatedBackend},
        tasks::AppTask,
    };

    fn app() -> (App, Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let player = PlaybackCoordinator::new(Box::new(SimulatedBackend::new()));
        (App::new(task_tx, player), task_rx)
    }

    fn drain(app: &mut App) {
        while let Ok(event) = app.event_rx.try_recv() {
            handle_event(app, event).unwrap();
        }
    }

    #[test]
    fn loading_artists_cascades_to_album_and_track_requests() {
        let (mut app, task_rx) = app();
        let library = mock_library();

        handle_event(&mut app, AppEvent::SetBrowserArtists(library.artists.clone())).unwrap();
        drain(&mut app);

        assert!(app.library_loaded);
        assert_eq!(app.media_browser.selected_artist_id(), Some("artist-1"));
        assert!(matches!(task_rx.try_recv(), Ok(AppTask::GetBrowserAlbums(id)) if id == "artist-1"));
    }

    #[test]
    fn empty_artist_list_clears_the_other_panes() {
        let (mut app, _task_rx) = app();
        let library = mock_library();
        app.media_browser.set_albums(library.albums.clone());
        app.media_browser.set_tracks(library.tracks.clone());

        handle_event(&mut app, AppEvent::SetBrowserArtists(vec![])).unwrap();

        assert!(app.media_browser.albums.is_empty());
        assert!(app.media_browser.tracks.is_empty());
    }

    #[test]
    fn start_playback_plays_and_selects_the_track() {
        let (mut app, _task_rx) = app();
        let library = mock_library();
        let playlist: Vec<Track> = library.tracks[..4].to_vec();

        handle_event(
            &mut app,
            AppEvent::StartPlayback {
                track: playlist[2].clone(),
                playlist: playlist.clone(),
            },
        )
        .unwrap();

        let snapshot = app.player.snapshot();
        assert_eq!(snapshot.state, PlayerState::Playing);
        assert_eq!(snapshot.index, 2);
        assert_eq!(app.now_playing_state.selected(), Some(2));
    }

    #[test]
    fn errors_are_shown_on_the_status_line() {
        let (mut app, _task_rx) = app();

        handle_event(&mut app, AppEvent::Error("boom".into())).unwrap();

        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, "boom");
    }
}
