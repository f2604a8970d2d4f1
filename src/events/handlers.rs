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

use anyhow::Result;

use crate::{
    App, MainView,
    events::AppEvent,
    model::{Album, Artist, Track},
    tasks::AppTask,
};

pub(super) fn handle_poll_playback(app: &mut App) {
    let snapshot = app.player.poll();

    for error in snapshot.errors {
        app.set_error(error);
    }

    // Only follow a change of track, so the cursor can be moved freely while
    // a track plays.
    if snapshot.track.is_some() && app.followed_index != Some(snapshot.index) {
        app.follow_playlist(snapshot.index);
    }
}

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_artist_selection_changed(app: &mut App, id: String) -> Result<()> {
    app.task_tx.send(AppTask::GetBrowserAlbums(id))?;

    Ok(())
}

pub(super) fn handle_album_selection_changed(app: &mut App, id: String) -> Result<()> {
    app.task_tx.send(AppTask::GetBrowserTracks(id))?;

    Ok(())
}

pub(super) fn handle_set_browser_artists(app: &mut App, artists: Vec<Artist>) -> Result<()> {
    app.library_loaded = true;

    let first_id = artists.first().map(|a| a.id.clone());
    app.media_browser.set_artists(artists);

    match first_id {
        Some(id) => app.event_tx.send(AppEvent::ArtistSelectionChanged(id))?,
        None => {
            app.media_browser.set_albums(vec![]);
            app.media_browser.set_tracks(vec![]);
        }
    }

    Ok(())
}

pub(super) fn handle_set_browser_albums(app: &mut App, albums: Vec<Album>) -> Result<()> {
    let first_id = albums.first().map(|a| a.id.clone());
    app.media_browser.set_albums(albums);

    match first_id {
        Some(id) => app.event_tx.send(AppEvent::AlbumSelectionChanged(id))?,
        None => app.media_browser.set_tracks(vec![]),
    }

    Ok(())
}

pub(super) fn handle_set_browser_tracks(app: &mut App, tracks: Vec<Track>) {
    app.media_browser.set_tracks(tracks);
}

pub(super) fn handle_start_playback(app: &mut App, track: Track, playlist: Vec<Track>) {
    let title = track.title.clone();

    match app.player.play_track(track, playlist) {
        Ok(()) => {
            app.follow_playlist(app.player.index());
            app.set_status(format!("Playing {}", title));
        }
        Err(e) => app.set_error(format!("Could not play {}: {}", title, e)),
    }
}

pub(super) fn handle_seek_to(app: &mut App, seconds: f64) {
    let result = app.player.seek_to(seconds);
    app.report(result);
}

pub(super) fn handle_set_volume(app: &mut App, volume: f64) {
    let result = app.player.set_volume(volume);
    app.report(result);
}

pub(super) fn handle_status(app: &mut App, message: String) {
    app.set_status(message);
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.set_error(message);
}
