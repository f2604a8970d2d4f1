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

//! Discovery of audio files on the local filesystem.
//!
//! This module walks candidate media directories with `WalkDir` and collects
//! every file whose extension marks it as audio. No tags are read: the file
//! name becomes the track title, and artist, album and duration are fixed
//! placeholders until the library is grouped by [`super::build`].
//!
//! Hidden directories (names starting with `.`) are never descended, and
//! unreadable entries are logged and skipped so a single bad directory never
//! aborts a scan.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// File extensions recognised as audio, compared case-insensitively.
pub(crate) const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "wav", "flac", "aac"];

pub(crate) const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub(crate) const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Duration assumed for every scanned file, in milliseconds.
pub(crate) const DEFAULT_DURATION_MS: u64 = 180_000;

/// A candidate audio file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScannedFile {
    pub(crate) path: PathBuf,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) duration_ms: u64,
    pub(crate) size: u64,
}

impl ScannedFile {
    fn from_entry(entry: &DirEntry) -> Self {
        let path = entry.path().to_path_buf();
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        Self {
            title: title_from_file_name(&path),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_ms: DEFAULT_DURATION_MS,
            size,
            path,
        }
    }
}

/// Returns true if the path ends in one of the given extensions.
///
/// The comparison ignores case, so `Song.FLAC` matches `flac`.
pub(crate) fn is_audio_file<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| e.as_ref().eq_ignore_ascii_case(&ext)))
}

/// Recursively scans one directory for audio files.
///
/// The root itself is always scanned; hidden sub-directories are skipped.
/// Files are returned in directory-walk order, with entries of a directory
/// sorted by file name so repeated scans produce the same library.
pub(crate) fn scan_directory<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Vec<ScannedFile> {
    let mut results = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_audio_file(entry.path(), extensions) {
            results.push(ScannedFile::from_entry(&entry));
        }
    }

    tracing::debug!("Found {} audio files under {}", results.len(), root.display());

    results
}

/// Scans every existing directory in `dirs`, in order.
///
/// Directories that do not exist are skipped silently.
pub(crate) fn scan_directories<P: AsRef<Path>, S: AsRef<str>>(
    dirs: &[P],
    extensions: &[S],
) -> Vec<ScannedFile> {
    let mut results = Vec::new();

    for dir in dirs {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::debug!("Media directory {} does not exist, skipping", dir.display());
            continue;
        }

        tracing::info!("Scanning {}", dir.display());
        results.extend(scan_directory(dir, extensions));
    }

    results
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

// Strips only the last extension, "a.b.mp3" gives "a.b".
fn title_from_file_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn recognises_audio_extensions_ignoring_case() {
        assert!(is_audio_file(Path::new("/m/a.mp3"), AUDIO_EXTENSIONS));
        assert!(is_audio_file(Path::new("/m/a.FLAC"), AUDIO_EXTENSIONS));
        assert!(is_audio_file(Path::new("/m/a.M4a"), AUDIO_EXTENSIONS));
        assert!(!is_audio_file(Path::new("/m/cover.jpg"), AUDIO_EXTENSIONS));
        assert!(!is_audio_file(Path::new("/m/mp3"), AUDIO_EXTENSIONS));
    }

    #[test]
    fn title_strips_last_extension_only() {
        assert_eq!(title_from_file_name(Path::new("/m/01 Intro.mp3")), "01 Intro");
        assert_eq!(title_from_file_name(Path::new("/m/a.b.flac")), "a.b");
        assert_eq!(title_from_file_name(Path::new("/m/.mp3")), ".mp3");
    }

    #[test]
    fn scan_finds_nested_audio_and_skips_hidden_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "one.mp3");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "albums/two.WAV");
        touch(dir.path(), "albums/deeper/three.aac");
        touch(dir.path(), ".cache/hidden.mp3");

        let files = scan_directory(dir.path(), AUDIO_EXTENSIONS);
        let mut titles: Vec<&str> = files.iter().map(|f| f.title.as_str()).collect();
        titles.sort();

        assert_eq!(titles, vec!["one", "three", "two"]);
    }

    #[test]
    fn scanned_files_carry_placeholder_metadata() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "song.m4a");

        let files = scan_directory(dir.path(), AUDIO_EXTENSIONS);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].artist, UNKNOWN_ARTIST);
        assert_eq!(files[0].album, UNKNOWN_ALBUM);
        assert_eq!(files[0].duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(files[0].size, 4);
        assert_eq!(files[0].path, dir.path().join("song.m4a"));
    }

    #[test]
    fn missing_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "song.mp3");
        let missing = dir.path().join("nope");

        let files = scan_directories(&[missing, dir.path().to_path_buf()], AUDIO_EXTENSIONS);

        assert_eq!(files.len(), 1);
    }
}
