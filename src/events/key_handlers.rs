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

//! Key bindings.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{App, MainView, browser::MediaBrowserPane, events::AppEvent, tasks::AppTask};

const VOLUME_DELTA: f64 = 0.05;

const FINE_SEEK_DELTA: f64 = 5.0;
const SEEK_DELTA: f64 = 20.0;

/// Maps keyboard input to application actions and playback commands.
///
/// The command line gets first refusal of every key; anything it does not
/// consume is handled as a global binding:
///
/// * **Application Control**: Quitting, switching views, rescanning.
/// * **Navigation**: Moving between artists, albums, and tracks in the media
///   browser, or through the playlist in the now playing view.
/// * **Playback**: Controlling the coordinator (play, pause, seek, volume).
///
/// # Errors
///
/// Returns an error if an event or task cannot be sent because the receiving
/// side has gone away.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    let handled = app
        .commander
        .handle_event(Event::Key(key), &app.task_tx, &app.event_tx)?;
    if handled {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Browse))?,
        KeyCode::Char('2') => app
            .event_tx
            .send(AppEvent::SetMainView(MainView::NowPlaying))?,

        KeyCode::Char('r') => app.task_tx.send(AppTask::ScanLibrary)?,

        KeyCode::Char('j') | KeyCode::Down => match app.main_view {
            MainView::Browse => browser_down(app)?,
            MainView::NowPlaying => now_playing_step(app, 1),
        },

        KeyCode::Char('k') | KeyCode::Up => match app.main_view {
            MainView::Browse => browser_up(app)?,
            MainView::NowPlaying => now_playing_step(app, -1),
        },

        KeyCode::Char('h') | KeyCode::Left if app.main_view == MainView::Browse => {
            app.media_browser.previous_pane()
        }
        KeyCode::Char('l') | KeyCode::Right if app.main_view == MainView::Browse => {
            app.media_browser.next_pane()
        }

        KeyCode::Enter => match app.main_view {
            MainView::Browse => play_from_browser(app)?,
            MainView::NowPlaying => play_from_playlist(app),
        },

        KeyCode::Char('a') => app.task_tx.send(AppTask::PlayAll)?,
        KeyCode::Char('A') => {
            if let Some(id) = app.media_browser.selected_album_id() {
                app.task_tx.send(AppTask::PlayAlbum(id.to_string()))?;
            }
        }

        KeyCode::Char(' ') => {
            let result = app.player.toggle_playback();
            app.report(result);
        }
        KeyCode::Char('s') => {
            let result = app.player.stop();
            app.report(result);
        }
        KeyCode::Char('n') => {
            let result = app.player.skip_to_next();
            app.report(result);
        }
        KeyCode::Char('p') => {
            let result = app.player.skip_to_previous();
            app.report(result);
        }

        KeyCode::Char(',') => seek_by(app, -FINE_SEEK_DELTA),
        KeyCode::Char('.') => seek_by(app, FINE_SEEK_DELTA),
        KeyCode::Char('<') => seek_by(app, -SEEK_DELTA),
        KeyCode::Char('>') => seek_by(app, SEEK_DELTA),

        KeyCode::Char('-') => adjust_volume(app, -VOLUME_DELTA),
        KeyCode::Char('=') | KeyCode::Char('+') => adjust_volume(app, VOLUME_DELTA),

        _ => {}
    }

    Ok(())
}

fn browser_down(app: &mut App) -> Result<()> {
    match app.media_browser.active_pane {
        MediaBrowserPane::Artist => {
            app.media_browser.next_artist();
            if let Some(id) = app.media_browser.selected_artist_id() {
                app.event_tx.send(AppEvent::ArtistSelectionChanged(id.to_string()))?;
            }
        }
        MediaBrowserPane::Album => {
            app.media_browser.next_album();
            if let Some(id) = app.media_browser.selected_album_id() {
                app.event_tx.send(AppEvent::AlbumSelectionChanged(id.to_string()))?;
            }
        }
        MediaBrowserPane::Track => app.media_browser.next_track(),
    }

    Ok(())
}

fn browser_up(app: &mut App) -> Result<()> {
    match app.media_browser.active_pane {
        MediaBrowserPane::Artist => {
            app.media_browser.previous_artist();
            if let Some(id) = app.media_browser.selected_artist_id() {
                app.event_tx.send(AppEvent::ArtistSelectionChanged(id.to_string()))?;
            }
        }
        MediaBrowserPane::Album => {
            app.media_browser.previous_album();
            if let Some(id) = app.media_browser.selected_album_id() {
                app.event_tx.send(AppEvent::AlbumSelectionChanged(id.to_string()))?;
            }
        }
        MediaBrowserPane::Track => app.media_browser.previous_track(),
    }

    Ok(())
}

// Artists and albums drill down a pane; a track plays with its album as the
// playlist.
fn play_from_browser(app: &mut App) -> Result<()> {
    match app.media_browser.active_pane {
        MediaBrowserPane::Artist | MediaBrowserPane::Album => app.media_browser.next_pane(),
        MediaBrowserPane::Track => {
            if let Some(track) = app.media_browser.selected_track().cloned() {
                app.task_tx.send(AppTask::PlayTrack(track))?;
            }
        }
    }

    Ok(())
}

fn play_from_playlist(app: &mut App) {
    let Some(index) = app.now_playing_state.selected() else {
        return;
    };

    let playlist = app.player.playlist().to_vec();
    if let Some(track) = playlist.get(index).cloned() {
        match app.player.play_track(track, playlist) {
            Ok(()) => app.follow_playlist(app.player.index()),
            Err(e) => app.set_error(e.to_string()),
        }
    }
}

fn now_playing_step(app: &mut App, delta: isize) {
    let len = app.player.playlist().len();
    if len == 0 {
        return;
    }

    let current = app.now_playing_state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    app.now_playing_state.select(Some(next as usize));
}

fn seek_by(app: &mut App, delta: f64) {
    let result = app.player.seek_by(delta);
    app.report(result);
}

fn adjust_volume(app: &mut App, delta: f64) {
    let result = app.player.adjust_volume(delta);
    app.report(result);
}
