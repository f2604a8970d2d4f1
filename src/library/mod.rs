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

//! The music library service.
//!
//! [`LibraryService`] owns the in-memory [`Library`] and its persistent
//! [`LibraryStore`]. It rebuilds the library from a filesystem scan, answers
//! the browse queries used by the UI (artists, an artist's albums, an album's
//! tracks), and falls back to a bundled sample library while nothing has been
//! scanned.
//!
//! # Failure policy
//!
//! Storage failures while loading or saving are logged and swallowed, leaving
//! the in-memory library as it was. Only a scan that cannot access any media
//! directory reports an error to the caller.
//!
//! # Sub-modules
//!
//! * [`scan`]: Filesystem walk discovering audio files.
//! * [`build`]: Grouping scanned files into artists, albums and tracks.
//! * [`id`]: Identifier slugs.
//! * [`store`]: JSON key/value persistence.
//! * [`mock`]: The bundled sample library.

pub(crate) mod build;
pub(crate) mod id;
pub(crate) mod mock;
pub(crate) mod scan;
pub(crate) mod store;

use std::{
    fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use thiserror::Error;

use crate::{
    library::store::{LIBRARY_STORAGE_KEY, LibraryStore, StoreError},
    model::{Album, Artist, Library, Track},
    util::collate::locale_cmp,
};

#[derive(Debug, Error)]
pub(crate) enum LibraryError {
    #[error("no readable media directory among: {0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("library snapshot is malformed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Scan settings taken from the application configuration.
#[derive(Debug, Clone)]
pub(crate) struct ScanSettings {
    pub(crate) media_dirs: Vec<PathBuf>,
    pub(crate) extensions: Vec<String>,
    pub(crate) rescan_interval: Duration,
    pub(crate) mock_fallback: bool,
}

pub(crate) struct LibraryService {
    store: LibraryStore,
    settings: ScanSettings,
    library: Library,
    using_mock: bool,
}

impl LibraryService {
    pub(crate) fn new(store: LibraryStore, settings: ScanSettings) -> Self {
        Self {
            store,
            settings,
            library: Library::default(),
            using_mock: false,
        }
    }

    pub(crate) fn library(&self) -> &Library {
        &self.library
    }

    pub(crate) fn is_using_mock(&self) -> bool {
        self.using_mock
    }

    /// Replaces the in-memory library with the persisted snapshot.
    ///
    /// Nothing is changed when no snapshot has been saved yet or it cannot be
    /// read. A snapshot that is valid JSON but not a library is removed from
    /// storage.
    pub(crate) fn load_library(&mut self) {
        match self.read_snapshot() {
            Ok(Some(library)) => {
                tracing::info!(
                    "Loaded library from {}: {} artists, {} tracks",
                    self.store.path().display(),
                    library.artists.len(),
                    library.tracks.len()
                );
                self.library = library;
                self.using_mock = false;
            }
            Ok(None) => tracing::info!("No saved library in {}", self.store.path().display()),
            Err(LibraryError::Snapshot(e)) => {
                tracing::error!("Discarding unreadable library snapshot: {}", e);
                if let Err(e) = self.store.remove_item(LIBRARY_STORAGE_KEY) {
                    tracing::error!("Failed to discard library snapshot: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to load library: {}", e),
        }
    }

    /// Persists the current library. The sample library is never saved.
    pub(crate) fn save_library(&self) {
        if self.using_mock {
            tracing::debug!("Not saving the sample library");
            return;
        }

        if let Err(e) = self.write_snapshot() {
            tracing::error!("Failed to save library: {}", e);
        }
    }

    /// Scans the configured media directories and rebuilds the library.
    ///
    /// When no audio file is found the current library (and the saved
    /// snapshot) are left as they are.
    ///
    /// # Returns
    ///
    /// The number of audio files found.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::PermissionDenied`] if none of the media
    /// directories can be read.
    pub(crate) fn scan_music_files(&mut self) -> Result<usize, LibraryError> {
        self.check_access()?;

        let files = scan::scan_directories(&self.settings.media_dirs, &self.settings.extensions);
        tracing::info!("Scan found {} audio files", files.len());

        if !files.is_empty() {
            self.library = build::build_library(&files, now_millis());
            self.using_mock = false;
            self.save_library();
        }

        Ok(files.len())
    }

    /// Switches to the sample library if the real one is empty and the
    /// fallback is enabled. Returns whether the sample library is in use.
    pub(crate) fn use_mock_fallback(&mut self) -> bool {
        if self.library.is_empty() && self.settings.mock_fallback && !self.using_mock {
            tracing::info!("Library is empty, using the sample library");
            self.library = mock::mock_library();
            self.using_mock = true;
        }
        self.using_mock
    }

    /// All artists ordered by name.
    pub(crate) fn artists(&self) -> Vec<Artist> {
        let mut artists = self.library.artists.clone();
        artists.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        artists
    }

    /// The artist's albums ordered by title.
    pub(crate) fn albums_by_artist(&self, artist_id: &str) -> Vec<Album> {
        let mut albums: Vec<Album> = self
            .library
            .albums
            .iter()
            .filter(|album| album.artist_id == artist_id)
            .cloned()
            .collect();
        albums.sort_by(|a, b| locale_cmp(&a.title, &b.title));
        albums
    }

    /// The album's tracks ordered by title.
    pub(crate) fn tracks_by_album(&self, album_id: &str) -> Vec<Track> {
        let mut tracks: Vec<Track> = self
            .library
            .tracks
            .iter()
            .filter(|track| track.album_id == album_id)
            .cloned()
            .collect();
        tracks.sort_by(|a, b| locale_cmp(&a.title, &b.title));
        tracks
    }

    pub(crate) fn all_tracks(&self) -> &[Track] {
        &self.library.tracks
    }

    pub(crate) fn track_by_id(&self, track_id: &str) -> Option<&Track> {
        self.library.tracks.iter().find(|track| track.id == track_id)
    }

    /// True if the library has never been scanned or the last scan is older
    /// than the configured interval.
    pub(crate) fn needs_rescan(&self, now_ms: u64) -> bool {
        match self.library.last_scanned {
            None => true,
            Some(last) => {
                let interval_ms = self.settings.rescan_interval.as_millis() as u64;
                now_ms.saturating_sub(last) > interval_ms
            }
        }
    }

    // The desktop counterpart of a storage permission prompt: at least one
    // existing media directory must be listable.
    fn check_access(&self) -> Result<(), LibraryError> {
        let readable = self
            .settings
            .media_dirs
            .iter()
            .any(|dir| dir.is_dir() && fs::read_dir(dir).is_ok());

        if readable {
            Ok(())
        } else {
            let dirs: Vec<String> = self
                .settings
                .media_dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect();
            Err(LibraryError::PermissionDenied(dirs.join(", ")))
        }
    }

    fn read_snapshot(&self) -> Result<Option<Library>, LibraryError> {
        match self.store.get_item(LIBRARY_STORAGE_KEY)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn write_snapshot(&self) -> Result<(), LibraryError> {
        let value = serde_json::to_value(&self.library)?;
        self.store.set_item(LIBRARY_STORAGE_KEY, value)?;
        tracing::debug!("Saved library to {}", self.store.path().display());
        Ok(())
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    fn service(root: &Path, media: &Path) -> LibraryService {
        let store = LibraryStore::open(root.join("storage.json"));
        let settings = ScanSettings {
            media_dirs: vec![media.to_path_buf()],
            extensions: scan::AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            rescan_interval: Duration::from_secs(24 * 60 * 60),
            mock_fallback: true,
        };
        LibraryService::new(store, settings)
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn scan_rebuilds_and_persists_the_library() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("music");
        touch(&media.join("b song.mp3"));
        touch(&media.join("A Song.flac"));
        touch(&media.join("cover.jpg"));

        let mut svc = service(dir.path(), &media);
        assert_eq!(svc.scan_music_files().unwrap(), 2);

        let mut reloaded = service(dir.path(), &media);
        reloaded.load_library();

        assert_eq!(reloaded.library(), svc.library());
        assert_eq!(reloaded.artists().len(), 1);
        assert_eq!(reloaded.all_tracks().len(), 2);
    }

    #[test]
    fn browse_queries_are_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("music");
        touch(&media.join("zebra.mp3"));
        touch(&media.join("apple.mp3"));
        touch(&media.join("Mango.mp3"));

        let mut svc = service(dir.path(), &media);
        svc.scan_music_files().unwrap();

        let artist = &svc.artists()[0];
        let albums = svc.albums_by_artist(&artist.id);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].track_count, 3);

        let titles: Vec<String> = svc
            .tracks_by_album(&albums[0].id)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["apple", "Mango", "zebra"]);
    }

    #[test]
    fn unknown_ids_yield_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path(), dir.path());

        assert!(svc.albums_by_artist("nobody").is_empty());
        assert!(svc.tracks_by_album("nothing").is_empty());
        assert!(svc.track_by_id("none").is_none());
    }

    #[test]
    fn track_lookup_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("music");
        touch(&media.join("one.mp3"));

        let mut svc = service(dir.path(), &media);
        svc.scan_music_files().unwrap();

        let id = svc.all_tracks()[0].id.clone();
        assert_eq!(svc.track_by_id(&id).map(|t| t.title.as_str()), Some("one"));
    }

    #[test]
    fn empty_scan_keeps_the_previous_library() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("music");
        touch(&media.join("one.mp3"));

        let mut svc = service(dir.path(), &media);
        svc.scan_music_files().unwrap();
        let before = svc.library().clone();

        fs::remove_file(media.join("one.mp3")).unwrap();
        assert_eq!(svc.scan_music_files().unwrap(), 0);
        assert_eq!(svc.library(), &before);
    }

    #[test]
    fn unreadable_media_dirs_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), &dir.path().join("missing"));

        assert!(matches!(svc.scan_music_files(), Err(LibraryError::PermissionDenied(_))));
    }

    #[test]
    fn corrupt_snapshot_is_ignored_on_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("storage.json"), "garbage").unwrap();

        let mut svc = service(dir.path(), dir.path());
        svc.load_library();

        assert!(svc.library().is_empty());
    }

    #[test]
    fn mock_fallback_is_used_only_for_an_empty_library_and_never_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), dir.path());

        assert!(svc.use_mock_fallback());
        assert!(!svc.artists().is_empty());

        svc.save_library();
        assert!(!dir.path().join("storage.json").exists());
    }

    #[test]
    fn mock_fallback_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), dir.path());
        svc.settings.mock_fallback = false;

        assert!(!svc.use_mock_fallback());
        assert!(svc.artists().is_empty());
    }

    #[test]
    fn scanning_replaces_the_mock_library() {
        let dir = tempfile::tempdir().unwrap();
        let media = dir.path().join("music");
        touch(&media.join("real.mp3"));

        let mut svc = service(dir.path(), &media);
        svc.use_mock_fallback();
        svc.scan_music_files().unwrap();

        assert!(!svc.is_using_mock());
        assert_eq!(svc.all_tracks().len(), 1);
        assert!(dir.path().join("storage.json").exists());
    }

    #[test]
    fn rescan_is_needed_when_never_scanned_or_stale() {
        let dir = tempfile::tempdir().unwrap();
        let mut svc = service(dir.path(), dir.path());
        assert!(svc.needs_rescan(DAY_MS));

        svc.library.last_scanned = Some(DAY_MS);
        assert!(!svc.needs_rescan(DAY_MS + 1000));
        assert!(!svc.needs_rescan(2 * DAY_MS));
        assert!(svc.needs_rescan(2 * DAY_MS + 1));
    }

    #[test]
    fn unreadable_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::open(dir.path().join("storage.json"));
        store
            .set_item(LIBRARY_STORAGE_KEY, serde_json::json!({ "artists": 42 }))
            .unwrap();

        let mut svc = service(dir.path(), dir.path());
        svc.load_library();

        assert!(svc.library().is_empty());
        assert_eq!(store.get_item(LIBRARY_STORAGE_KEY).unwrap(), None);
    }
}
