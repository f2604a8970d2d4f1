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

//! Grouping of scanned files into a library.
//!
//! Scanned files are folded into artists, albums and tracks in a single
//! pass. Identifiers come from [`generate_id`], so the same artist name
//! always maps to the same artist record within a scan.

use std::collections::HashMap;

use crate::{
    library::{
        id::generate_id,
        scan::{ScannedFile, UNKNOWN_ALBUM, UNKNOWN_ARTIST},
    },
    model::{Album, Artist, Library, Track},
};

pub(crate) const UNKNOWN_TRACK: &str = "Unknown Track";

/// Builds a complete library from scanned files.
///
/// * The first file seen for an artist creates it with no albums.
/// * The first file seen for an album creates it and bumps the owning
///   artist's album count.
/// * Every file bumps its album's track count and becomes a track.
///
/// Collections keep first-seen order; browsing applies its own sorting.
pub(crate) fn build_library(files: &[ScannedFile], now_ms: u64) -> Library {
    let mut artists: Vec<Artist> = Vec::new();
    let mut albums: Vec<Album> = Vec::new();
    let mut tracks: Vec<Track> = Vec::with_capacity(files.len());

    let mut artist_index: HashMap<String, usize> = HashMap::new();
    let mut album_index: HashMap<String, usize> = HashMap::new();

    for file in files {
        let artist_name = non_empty_or(&file.artist, UNKNOWN_ARTIST);
        let album_title = non_empty_or(&file.album, UNKNOWN_ALBUM);

        let artist_id = generate_id(artist_name);
        let album_id = generate_id(&format!("{}-{}", artist_name, album_title));

        let artist_idx = *artist_index.entry(artist_id.clone()).or_insert_with(|| {
            artists.push(Artist {
                id: artist_id.clone(),
                name: artist_name.to_string(),
                album_count: 0,
                avatar: None,
            });
            artists.len() - 1
        });

        let album_idx = match album_index.get(&album_id) {
            Some(&idx) => idx,
            None => {
                artists[artist_idx].album_count += 1;
                albums.push(Album {
                    id: album_id.clone(),
                    artist_id: artist_id.clone(),
                    artist_name: artist_name.to_string(),
                    title: album_title.to_string(),
                    cover: None,
                    year: None,
                    track_count: 0,
                });
                album_index.insert(album_id.clone(), albums.len() - 1);
                albums.len() - 1
            }
        };

        albums[album_idx].track_count += 1;

        let path = file.path.to_string_lossy().into_owned();

        tracks.push(Track {
            id: generate_id(&path),
            album_id,
            artist_id,
            title: non_empty_or(&file.title, UNKNOWN_TRACK).to_string(),
            artist: artist_name.to_string(),
            album: album_title.to_string(),
            duration: file.duration_ms / 1000,
            path,
            cover: None,
        });
    }

    tracing::info!(
        "Built library: {} artists, {} albums, {} tracks",
        artists.len(),
        albums.len(),
        tracks.len()
    );

    Library {
        artists,
        albums,
        tracks,
        last_scanned: Some(now_ms),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::library::scan::DEFAULT_DURATION_MS;

    fn file(path: &str, artist: &str, album: &str) -> ScannedFile {
        let title = PathBuf::from(path)
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        ScannedFile {
            path: PathBuf::from(path),
            title,
            artist: artist.into(),
            album: album.into(),
            duration_ms: DEFAULT_DURATION_MS,
            size: 0,
        }
    }

    #[test]
    fn groups_tracks_into_albums_and_artists() {
        let files = vec![
            file("/m/a1.mp3", "Nina Simone", "Pastel Blues"),
            file("/m/a2.mp3", "Nina Simone", "Pastel Blues"),
            file("/m/a3.mp3", "Nina Simone", "Wild Is the Wind"),
            file("/m/b1.mp3", "Miles Davis", "Kind of Blue"),
        ];

        let library = build_library(&files, 1_000);

        assert_eq!(library.artists.len(), 2);
        assert_eq!(library.albums.len(), 3);
        assert_eq!(library.tracks.len(), 4);
        assert_eq!(library.last_scanned, Some(1_000));

        let nina = &library.artists[0];
        assert_eq!(nina.id, "nina-simone");
        assert_eq!(nina.album_count, 2);
        assert_eq!(library.artists[1].album_count, 1);

        let pastel = &library.albums[0];
        assert_eq!(pastel.id, "nina-simone-pastel-blues");
        assert_eq!(pastel.artist_id, "nina-simone");
        assert_eq!(pastel.artist_name, "Nina Simone");
        assert_eq!(pastel.track_count, 2);
    }

    #[test]
    fn tracks_reference_their_album_and_artist() {
        let library = build_library(&[file("/m/Song One.flac", "X", "Y")], 0);
        let track = &library.tracks[0];

        assert_eq!(track.id, "msong-oneflac");
        assert_eq!(track.album_id, library.albums[0].id);
        assert_eq!(track.artist_id, library.artists[0].id);
        assert_eq!(track.title, "Song One");
        assert_eq!(track.artist, "X");
        assert_eq!(track.album, "Y");
        assert_eq!(track.duration, 180);
        assert_eq!(track.path, "/m/Song One.flac");
    }

    #[test]
    fn scanned_placeholders_collapse_into_one_artist_and_album() {
        let files = vec![
            file("/m/1.mp3", UNKNOWN_ARTIST, UNKNOWN_ALBUM),
            file("/m/2.mp3", UNKNOWN_ARTIST, UNKNOWN_ALBUM),
            file("/m/3.mp3", UNKNOWN_ARTIST, UNKNOWN_ALBUM),
        ];

        let library = build_library(&files, 0);

        assert_eq!(library.artists.len(), 1);
        assert_eq!(library.artists[0].album_count, 1);
        assert_eq!(library.albums[0].track_count, 3);
    }

    #[test]
    fn empty_names_use_placeholders() {
        let mut f = file("/m/x.mp3", "", "");
        f.title = String::new();

        let library = build_library(&[f], 0);

        assert_eq!(library.artists[0].name, UNKNOWN_ARTIST);
        assert_eq!(library.albums[0].title, UNKNOWN_ALBUM);
        assert_eq!(library.tracks[0].title, UNKNOWN_TRACK);
    }

    #[test]
    fn colliding_artist_names_share_a_record() {
        let files = vec![
            file("/m/1.mp3", "Sigur Ros", "Takk"),
            file("/m/2.mp3", "sigur ros!", "Takk"),
        ];

        let library = build_library(&files, 0);

        assert_eq!(library.artists.len(), 1);
        assert_eq!(library.artists[0].name, "Sigur Ros");
        assert_eq!(library.albums.len(), 1);
        assert_eq!(library.albums[0].track_count, 2);
    }

    #[test]
    fn empty_input_builds_an_empty_library() {
        let library = build_library(&[], 7);

        assert!(library.is_empty());
        assert_eq!(library.last_scanned, Some(7));
    }
}
