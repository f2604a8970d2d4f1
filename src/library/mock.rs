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

//! Bundled fixture library.
//!
//! Shown when no real music has been scanned yet so the browse views are
//! never empty on first start. The paths do not exist on disk.

use crate::model::{Album, Artist, Library, Track};

// (artist, [(album, year, [(track, seconds)])])
type Fixture = (&'static str, &'static [(&'static str, &'static str, &'static [(&'static str, u64)])]);

const FIXTURE: &[Fixture] = &[
    (
        "Aurora Lane",
        &[
            ("Northern Lights", "2001", &[("First Light", 231), ("Harbour", 240), ("Quiet Hours", 270), ("Shoreline", 160)]),
            ("Paper Boats", "2004", &[("Paper Boats", 298), ("Excuses", 254), ("Broken String", 233)]),
        ],
    ),
    (
        "The Lanterns",
        &[
            ("Second Heaven", "2004", &[("River South", 266), ("Second Heaven", 288), ("Bullet Train", 243)]),
        ],
    ),
    (
        "Mira Chen",
        &[
            ("Ten Years", "2003", &[("Ten Years", 205), ("This Day Next Year", 232)]),
            ("New Heartbeat", "2015", &[("New Heartbeat", 247), ("Goodbye", 233), ("Single Track", 254), ("Moment", 215)]),
        ],
    ),
];

/// Builds the fixture library with consistent counts and cross references.
pub(crate) fn mock_library() -> Library {
    let mut library = Library::default();
    let mut track_no = 0;

    for (artist_no, (artist_name, albums)) in FIXTURE.iter().enumerate() {
        let artist_id = format!("artist-{}", artist_no + 1);

        library.artists.push(Artist {
            id: artist_id.clone(),
            name: artist_name.to_string(),
            album_count: albums.len() as u32,
            avatar: None,
        });

        for (album_title, year, tracks) in albums.iter() {
            let album_id = format!("album-{}", library.albums.len() + 1);

            library.albums.push(Album {
                id: album_id.clone(),
                artist_id: artist_id.clone(),
                artist_name: artist_name.to_string(),
                title: album_title.to_string(),
                cover: None,
                year: Some(year.to_string()),
                track_count: tracks.len() as u32,
            });

            for (title, duration) in tracks.iter() {
                track_no += 1;
                library.tracks.push(Track {
                    id: format!("track-{}", track_no),
                    album_id: album_id.clone(),
                    artist_id: artist_id.clone(),
                    title: title.to_string(),
                    artist: artist_name.to_string(),
                    album: album_title.to_string(),
                    duration: *duration,
                    path: format!("/mock/track{}.mp3", track_no),
                    cover: None,
                });
            }
        }
    }

    library
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_the_records() {
        let library = mock_library();

        for artist in &library.artists {
            let albums = library.albums.iter().filter(|a| a.artist_id == artist.id).count();
            assert_eq!(artist.album_count as usize, albums);
        }

        for album in &library.albums {
            let tracks = library.tracks.iter().filter(|t| t.album_id == album.id).count();
            assert_eq!(album.track_count as usize, tracks);
        }
    }

    #[test]
    fn tracks_reference_existing_records() {
        let library = mock_library();

        for track in &library.tracks {
            assert!(library.albums.iter().any(|a| a.id == track.album_id));
            assert!(library.artists.iter().any(|a| a.id == track.artist_id));
        }
        assert_eq!(library.tracks.len(), 16);
        assert_eq!(library.last_scanned, None);
    }
}
