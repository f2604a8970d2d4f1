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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application (artists,
//! albums and tracks) together with the [`Library`] snapshot that groups
//! them. These are the records produced by a library scan, persisted as a
//! single JSON document, and handed to the UI and the playback coordinator.
//!
//! Artist and album names are denormalised onto albums and tracks so any
//! record can be displayed without a lookup.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Artist {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) album_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Album {
    pub(crate) id: String,
    pub(crate) artist_id: String,
    pub(crate) artist_name: String,
    pub(crate) title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) year: Option<String>,
    pub(crate) track_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Track {
    pub(crate) id: String,
    pub(crate) album_id: String,
    pub(crate) artist_id: String,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    /// Length of the track in whole seconds.
    pub(crate) duration: u64,
    pub(crate) path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) cover: Option<String>,
}

/// A complete library snapshot.
///
/// The library is rebuilt wholesale on each scan and is the sole source of
/// truth for browsing. `last_scanned` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Library {
    #[serde(default)]
    pub(crate) artists: Vec<Artist>,
    #[serde(default)]
    pub(crate) albums: Vec<Album>,
    #[serde(default)]
    pub(crate) tracks: Vec<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_scanned: Option<u64>,
}

impl Library {
    pub(crate) fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_serialises_with_camel_case_fields() {
        let library = Library {
            artists: vec![Artist {
                id: "unknown-artist".into(),
                name: "Unknown Artist".into(),
                album_count: 1,
                avatar: None,
            }],
            albums: vec![],
            tracks: vec![],
            last_scanned: Some(42),
        };

        let json = serde_json::to_value(&library).unwrap();

        assert_eq!(json["artists"][0]["albumCount"], 1);
        assert_eq!(json["lastScanned"], 42);
        assert!(json["artists"][0].get("avatar").is_none());
    }

    #[test]
    fn library_without_timestamp_deserialises() {
        let library: Library =
            serde_json::from_str(r#"{"artists":[],"albums":[],"tracks":[]}"#).unwrap();

        assert!(library.is_empty());
        assert_eq!(library.last_scanned, None);
    }
}
