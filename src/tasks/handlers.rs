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

use anyhow::{Context, Result};

use crate::{events::AppEvent, library::now_millis, model::Track, tasks::TaskContext};

pub(super) fn load_library(ctx: &mut TaskContext) -> Result<()> {
    ctx.service.load_library();

    if ctx.service.needs_rescan(now_millis()) {
        tracing::info!("Library is missing or stale, rescanning");
        scan(ctx)?;
    }

    fall_back_to_sample(ctx)?;
    get_browser_artists(ctx)
}

pub(super) fn scan_library(ctx: &mut TaskContext) -> Result<()> {
    ctx.event_tx.send(AppEvent::SetBrowserArtists(vec![]))?;
    ctx.event_tx.send(AppEvent::Status("Scanning media directories...".to_string()))?;

    scan(ctx)?;

    fall_back_to_sample(ctx)?;
    get_browser_artists(ctx)
}

pub(super) fn get_browser_artists(ctx: &mut TaskContext) -> Result<()> {
    let artists = ctx.service.artists();
    ctx.event_tx.send(AppEvent::SetBrowserArtists(artists))?;

    Ok(())
}

pub(super) fn get_browser_albums(ctx: &mut TaskContext, artist_id: &str) -> Result<()> {
    let albums = ctx.service.albums_by_artist(artist_id);
    ctx.event_tx.send(AppEvent::SetBrowserAlbums(albums))?;

    Ok(())
}

pub(super) fn get_browser_tracks(ctx: &mut TaskContext, album_id: &str) -> Result<()> {
    let tracks = ctx.service.tracks_by_album(album_id);
    ctx.event_tx.send(AppEvent::SetBrowserTracks(tracks))?;

    Ok(())
}

// The selected track is played as-is; ids are lossy slugs and a lookup could
// pick a different file. The lookup only rejects selections left over from a
// previous library.
pub(super) fn play_track(ctx: &mut TaskContext, track: Track) -> Result<()> {
    ctx.service
        .track_by_id(&track.id)
        .with_context(|| format!("Track not found: {}", track.title))?;
    let playlist = ctx.service.tracks_by_album(&track.album_id);

    ctx.event_tx.send(AppEvent::StartPlayback { track, playlist })?;

    Ok(())
}

pub(super) fn play_album(ctx: &mut TaskContext, album_id: &str) -> Result<()> {
    let playlist = ctx.service.tracks_by_album(album_id);

    if let Some(track) = playlist.first().cloned() {
        ctx.event_tx.send(AppEvent::StartPlayback { track, playlist })?;
    }

    Ok(())
}

pub(super) fn play_all(ctx: &mut TaskContext) -> Result<()> {
    let playlist = ctx.service.all_tracks().to_vec();

    if let Some(track) = playlist.first().cloned() {
        ctx.event_tx.send(AppEvent::StartPlayback { track, playlist })?;
    }

    Ok(())
}

// Scan failures are reported, not propagated, so the caller can still fall
// back and publish whatever library it has.
fn scan(ctx: &mut TaskContext) -> Result<()> {
    match ctx.service.scan_music_files() {
        Ok(0) => ctx
            .event_tx
            .send(AppEvent::Status("No audio files found".to_string()))?,
        Ok(count) => {
            let library = ctx.service.library();
            let message = format!(
                "Scanned {} tracks: {} artists, {} albums",
                count,
                library.artists.len(),
                library.albums.len()
            );
            ctx.event_tx.send(AppEvent::Status(message))?
        }
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            ctx.event_tx.send(AppEvent::Error(e.to_string()))?
        }
    }

    Ok(())
}

fn fall_back_to_sample(ctx: &mut TaskContext) -> Result<()> {
    ctx.service.use_mock_fallback();

    if ctx.service.is_using_mock() {
        ctx.event_tx.send(AppEvent::Status(
            "No music scanned yet, showing the sample library (press r to scan)".to_string(),
        ))?;
    }

    Ok(())
}
