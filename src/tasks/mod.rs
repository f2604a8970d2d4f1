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

//! Asynchronous application task processing.
//!
//! This module offloads library work (loading the saved snapshot, scanning
//! the media directories, answering browse queries) from the main UI thread.
//! A dedicated worker owns the [`LibraryService`], translates [`AppTask`]
//! requests into library operations and sends the results back to the
//! application as [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Playback control stays on the
//! main thread and is driven by events.

mod handlers;
use handlers::*;

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{events::AppEvent, library::LibraryService, model::Track};

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Load the saved library, rescanning if it is stale and falling back to
    /// the sample library if it is empty.
    LoadLibrary,
    ScanLibrary,

    GetBrowserArtists,
    GetBrowserAlbums(String),
    GetBrowserTracks(String),

    /// Play the selected track with its album as the playlist.
    PlayTrack(Track),
    /// Play an album from its first track.
    PlayAlbum(String),
    /// Play every track in the library, in library order.
    PlayAll,
}

/// Spawns a background thread to process application tasks.
///
/// The worker takes ownership of the library service and runs until every
/// task sender has been dropped.
///
/// # Arguments
///
/// * `service` - The library service, not yet loaded.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    service: LibraryService,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    thread::spawn(move || {
        let mut service = service;

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                event_tx: &event_tx,
                service: &mut service,
            };

            if let Err(e) = handle_task(task, &mut ctx) {
                tracing::error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }

        tracing::debug!("Task worker finished");
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a> {
    event_tx: &'a Sender<AppEvent>,
    service: &'a mut LibraryService,
}

/// Orchestrates the execution of a single task.
///
/// This function implements the logic for each task and sends the result back
/// through the application event channel.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    tracing::debug!("Handling task {:?}", task);

    match task {
        AppTask::LoadLibrary => load_library(ctx),
        AppTask::ScanLibrary => scan_library(ctx),

        AppTask::GetBrowserArtists => get_browser_artists(ctx),
        AppTask::GetBrowserAlbums(id) => get_browser_albums(ctx, &id),
        AppTask::GetBrowserTracks(id) => get_browser_tracks(ctx, &id),

        AppTask::PlayTrack(track) => play_track(ctx, track),
        AppTask::PlayAlbum(id) => play_album(ctx, &id),
        AppTask::PlayAll => play_all(ctx),
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::mpsc, time::Duration};

    use super::*;
    use crate::library::{
        ScanSettings,
        mock::mock_library,
        scan::AUDIO_EXTENSIONS,
        store::LibraryStore,
    };

    fn service(root: &Path, mock_fallback: bool) -> LibraryService {
        let settings = ScanSettings {
            media_dirs: vec![root.join("music")],
            extensions: AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            rescan_interval: Duration::from_secs(60),
            mock_fallback,
        };
        LibraryService::new(LibraryStore::open(root.join("storage.json")), settings)
    }

    fn run(svc: &mut LibraryService, task: AppTask) -> Vec<AppEvent> {
        let (event_tx, event_rx) = mpsc::channel();
        let mut ctx = TaskContext {
            event_tx: &event_tx,
            service: svc,
        };
        handle_task(task, &mut ctx).unwrap();
        drop(event_tx);
        event_rx.into_iter().collect()
    }

    #[test]
    fn loading_an_empty_library_falls_back_to_the_sample() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("music")).unwrap();
        let mut svc = service(dir.path(), true);

        let events = run(&mut svc, AppTask::LoadLibrary);

        assert!(svc.is_using_mock());
        assert!(events.iter().any(|e| matches!(e, AppEvent::Status(_))));
        let artists = events.iter().find_map(|e| match e {
            AppEvent::SetBrowserArtists(artists) => Some(artists.len()),
            _ => None,
        });
        assert_eq!(artists, Some(3));
    }

    #[test]
    fn missing_media_directory_reports_an_error_and_still_lists_artists() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), false);

        let events = run(&mut svc, AppTask::ScanLibrary);

        assert!(events.iter().any(|e| matches!(e, AppEvent::Error(_))));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, AppEvent::SetBrowserArtists(a) if a.is_empty()))
        );
    }

    #[test]
    fn playing_a_track_uses_its_album_as_the_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), true);
        svc.use_mock_fallback();

        let track = svc.track_by_id("track-6").cloned().unwrap();

        let events = run(&mut svc, AppTask::PlayTrack(track));

        match events.as_slice() {
            [AppEvent::StartPlayback { track, playlist }] => {
                assert_eq!(track.title, "Excuses");
                let titles: Vec<&str> = playlist.iter().map(|t| t.title.as_str()).collect();
                assert_eq!(titles, vec!["Broken String", "Excuses", "Paper Boats"]);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn playing_an_unknown_track_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), true);
        let (event_tx, _event_rx) = mpsc::channel();
        let mut ctx = TaskContext {
            event_tx: &event_tx,
            service: &mut svc,
        };

        let mut track = mock_library().tracks[0].clone();
        track.id = "nope".into();

        assert!(handle_task(AppTask::PlayTrack(track), &mut ctx).is_err());
    }

    #[test]
    fn playing_a_track_plays_the_selected_file_when_ids_collide() {
        let dir = tempfile::tempdir().unwrap();
        let music = dir.path().join("music");
        std::fs::create_dir(&music).unwrap();
        std::fs::write(music.join("a b.mp3"), b"").unwrap();
        std::fs::write(music.join("a-b.mp3"), b"").unwrap();
        let mut svc = service(dir.path(), false);
        svc.scan_music_files().unwrap();

        let album_id = svc.all_tracks()[0].album_id.clone();
        let album = svc.tracks_by_album(&album_id);
        assert_eq!(album.len(), 2);
        assert_eq!(album[0].id, album[1].id);
        let selected = album
            .iter()
            .find(|t| t.path.ends_with("a-b.mp3"))
            .cloned()
            .unwrap();

        let events = run(&mut svc, AppTask::PlayTrack(selected.clone()));

        match events.as_slice() {
            [AppEvent::StartPlayback { track, playlist }] => {
                assert_eq!(track, &selected);
                assert_eq!(playlist.len(), 2);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn playing_an_album_starts_at_its_first_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), true);
        svc.use_mock_fallback();
        let album_id = svc.track_by_id("track-6").unwrap().album_id.clone();

        let events = run(&mut svc, AppTask::PlayAlbum(album_id));

        match events.as_slice() {
            [AppEvent::StartPlayback { track, playlist }] => {
                assert_eq!(track.title, "Broken String");
                assert_eq!(playlist.len(), 3);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn playing_an_empty_album_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), true);

        assert!(run(&mut svc, AppTask::PlayAlbum("nothing".into())).is_empty());
    }

    #[test]
    fn play_all_starts_at_the_first_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), true);
        svc.use_mock_fallback();

        let events = run(&mut svc, AppTask::PlayAll);

        match events.as_slice() {
            [AppEvent::StartPlayback { track, playlist }] => {
                assert_eq!(track.id, "track-1");
                assert_eq!(playlist.len(), 16);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }
}
