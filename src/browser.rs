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

//! Media browser state management.
//!
//! Holds the artist, album and track lists shown in the three browse panes,
//! the selection in each, and which pane has focus. Lists are replaced
//! wholesale as the task worker answers browse queries; replacing a list
//! selects its first entry.

use ratatui::widgets::ListState;

use crate::model::{Album, Artist, Track};

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub(crate) enum MediaBrowserPane {
    #[default]
    Artist,
    Album,
    Track,
}

#[derive(Default)]
pub(crate) struct MediaBrowser {
    pub(crate) active_pane: MediaBrowserPane,

    pub(crate) artists: Vec<Artist>,
    pub(crate) albums: Vec<Album>,
    pub(crate) tracks: Vec<Track>,

    pub(crate) artists_state: ListState,
    pub(crate) albums_state: ListState,
    pub(crate) tracks_state: ListState,
}

impl MediaBrowser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn next_pane(&mut self) {
        self.active_pane = match self.active_pane {
            MediaBrowserPane::Artist => MediaBrowserPane::Album,
            MediaBrowserPane::Album => MediaBrowserPane::Track,
            MediaBrowserPane::Track => MediaBrowserPane::Artist,
        };
    }

    pub(crate) fn previous_pane(&mut self) {
        self.active_pane = match self.active_pane {
            MediaBrowserPane::Artist => MediaBrowserPane::Track,
            MediaBrowserPane::Album => MediaBrowserPane::Artist,
            MediaBrowserPane::Track => MediaBrowserPane::Album,
        };
    }

    pub(crate) fn selected_artist_id(&self) -> Option<&str> {
        let index = self.artists_state.selected()?;
        self.artists.get(index).map(|artist| artist.id.as_str())
    }

    pub(crate) fn selected_album_id(&self) -> Option<&str> {
        let index = self.albums_state.selected()?;
        self.albums.get(index).map(|album| album.id.as_str())
    }

    pub(crate) fn selected_track(&self) -> Option<&Track> {
        let index = self.tracks_state.selected()?;
        self.tracks.get(index)
    }

    pub(crate) fn next_artist(&mut self) {
        step(&mut self.artists_state, self.artists.len(), true);
    }

    pub(crate) fn previous_artist(&mut self) {
        step(&mut self.artists_state, self.artists.len(), false);
    }

    pub(crate) fn next_album(&mut self) {
        step(&mut self.albums_state, self.albums.len(), true);
    }

    pub(crate) fn previous_album(&mut self) {
        step(&mut self.albums_state, self.albums.len(), false);
    }

    pub(crate) fn next_track(&mut self) {
        step(&mut self.tracks_state, self.tracks.len(), true);
    }

    pub(crate) fn previous_track(&mut self) {
        step(&mut self.tracks_state, self.tracks.len(), false);
    }

    pub(crate) fn set_artists(&mut self, artists: Vec<Artist>) {
        self.artists = artists;
        self.artists_state.select((!self.artists.is_empty()).then_some(0));
    }

    pub(crate) fn set_albums(&mut self, albums: Vec<Album>) {
        self.albums = albums;
        self.albums_state.select((!self.albums.is_empty()).then_some(0));
    }

    pub(crate) fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.tracks_state.select((!self.tracks.is_empty()).then_some(0));
    }
}

/// Moves the selection one entry, wrapping at either end.
fn step(state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }

    let i = match state.selected() {
        Some(i) if forward => (i + 1) % len,
        Some(0) => len - 1,
        Some(i) => i - 1,
        None => 0,
    };
    state.select(Some(i));
}
