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

//! Playlist and playback state.
//!
//! The [`PlaybackCoordinator`] is the single owner of "what is playing": the
//! current track, the playlist it came from, the index into that playlist,
//! the play state and the last known position. UI actions call into it
//! directly; a periodic [`poll`](PlaybackCoordinator::poll) drains backend
//! events (auto-advancing at the end of a track) and refreshes the position.

use crate::{
    model::Track,
    player::{AudioBackend, BackendEvent, PlayerError, PlayerState},
};

const DEFAULT_VOLUME: f64 = 1.0;

/// A copy of the playback state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlaybackSnapshot {
    pub(crate) track: Option<Track>,
    pub(crate) state: PlayerState,
    pub(crate) position: f64,
    pub(crate) duration: f64,
    pub(crate) volume: f64,
    pub(crate) index: usize,
    pub(crate) playlist_len: usize,
    /// Playing, but the backend has not started producing audio yet.
    pub(crate) loading: bool,
    /// Backend errors raised since the previous poll.
    pub(crate) errors: Vec<String>,
}

impl PlaybackSnapshot {
    /// Fraction of the track played, in `0.0..=1.0`.
    pub(crate) fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

pub(crate) struct PlaybackCoordinator {
    backend: Box<dyn AudioBackend>,
    current: Option<Track>,
    playlist: Vec<Track>,
    index: usize,
    state: PlayerState,
    position: f64,
    duration: f64,
    volume: f64,
}

impl PlaybackCoordinator {
    pub(crate) fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            current: None,
            playlist: Vec::new(),
            index: 0,
            state: PlayerState::Stopped,
            position: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
        }
    }

    pub(crate) fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Starts `track`, making `playlist` the active playlist.
    ///
    /// An empty playlist plays the track on its own. If the track is not part
    /// of the playlist, the playlist starts at its first entry for the
    /// purposes of next/previous.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the track could not be started; the
    /// coordinator is left stopped on that track.
    pub(crate) fn play_track(&mut self, track: Track, playlist: Vec<Track>) -> Result<(), PlayerError> {
        if playlist.is_empty() {
            self.playlist = vec![track.clone()];
            self.index = 0;
        } else {
            // Ids can collide, so prefer the entry that is the same track.
            self.index = playlist
                .iter()
                .position(|t| *t == track)
                .or_else(|| playlist.iter().position(|t| t.id == track.id))
                .unwrap_or(0);
            self.playlist = playlist;
        }

        self.start(track)
    }

    /// Pauses a playing track or resumes a paused one. A stopped track is
    /// restarted from the beginning; without a track this does nothing.
    pub(crate) fn toggle_playback(&mut self) -> Result<(), PlayerError> {
        let Some(track) = self.current.clone() else {
            return Ok(());
        };

        match self.state {
            PlayerState::Playing => {
                self.backend.pause()?;
                self.state = PlayerState::Paused;
            }
            PlayerState::Paused => {
                self.backend.resume()?;
                self.state = PlayerState::Playing;
            }
            PlayerState::Stopped => self.start(track)?,
        }

        Ok(())
    }

    pub(crate) fn stop(&mut self) -> Result<(), PlayerError> {
        if self.current.is_none() {
            return Ok(());
        }

        self.backend.stop()?;
        self.state = PlayerState::Stopped;
        self.position = 0.0;
        Ok(())
    }

    /// Plays the next playlist entry; does nothing on the last entry.
    pub(crate) fn skip_to_next(&mut self) -> Result<(), PlayerError> {
        if self.index + 1 < self.playlist.len() {
            self.index += 1;
            self.start(self.playlist[self.index].clone())?;
        }
        Ok(())
    }

    /// Plays the previous playlist entry; does nothing on the first entry.
    pub(crate) fn skip_to_previous(&mut self) -> Result<(), PlayerError> {
        if self.index > 0 && !self.playlist.is_empty() {
            self.index -= 1;
            self.start(self.playlist[self.index].clone())?;
        }
        Ok(())
    }

    /// Moves to an absolute position, clamped to the track.
    pub(crate) fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError> {
        if self.current.is_none() {
            return Ok(());
        }

        let mut seconds = seconds.max(0.0);
        if self.duration() > 0.0 {
            seconds = seconds.min(self.duration());
        }

        self.backend.seek_to(seconds)?;
        self.position = seconds;
        Ok(())
    }

    /// Moves relative to the current position.
    pub(crate) fn seek_by(&mut self, delta: f64) -> Result<(), PlayerError> {
        self.seek_to(self.position() + delta)
    }

    pub(crate) fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        let volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(volume)?;
        self.volume = volume;
        Ok(())
    }

    pub(crate) fn adjust_volume(&mut self, delta: f64) -> Result<(), PlayerError> {
        self.set_volume(self.volume + delta)
    }

    /// Processes backend events and refreshes position and duration.
    ///
    /// The end of a track advances to the next playlist entry, or stops at the
    /// end of the playlist with the position left at the track's end.
    pub(crate) fn poll(&mut self) -> PlaybackSnapshot {
        let mut errors = Vec::new();

        for event in self.backend.drain_events() {
            match event {
                BackendEvent::TrackEnded => {
                    if let Err(e) = self.on_track_end() {
                        tracing::error!("Failed to advance to the next track: {}", e);
                        errors.push(e.to_string());
                    }
                }
                BackendEvent::Error(message) => {
                    tracing::error!("Playback error: {}", message);
                    self.state = PlayerState::Stopped;
                    errors.push(message);
                }
            }
        }

        if self.current.is_some() && self.state != PlayerState::Stopped {
            self.position = self.backend.position();
            if let Some(duration) = self.backend.duration().filter(|d| *d > 0.0) {
                self.duration = duration;
            }
        }

        let mut snapshot = self.snapshot();
        snapshot.errors = errors;
        snapshot
    }

    pub(crate) fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            track: self.current.clone(),
            state: self.state,
            position: self.position,
            duration: self.duration,
            volume: self.volume,
            index: self.index,
            playlist_len: self.playlist.len(),
            loading: self.state == PlayerState::Playing && !self.backend.is_playing(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub(crate) fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub(crate) fn position(&self) -> f64 {
        self.position
    }

    pub(crate) fn duration(&self) -> f64 {
        self.duration
    }

    fn on_track_end(&mut self) -> Result<(), PlayerError> {
        if self.index + 1 < self.playlist.len() {
            tracing::debug!("Track ended, advancing to entry {}", self.index + 1);
            self.skip_to_next()
        } else {
            tracing::debug!("Reached the end of the playlist");
            self.state = PlayerState::Stopped;
            self.position = self.duration;
            Ok(())
        }
    }

    fn start(&mut self, track: Track) -> Result<(), PlayerError> {
        tracing::info!("Playing {} ({})", track.title, track.path);

        self.position = 0.0;
        self.duration = track.duration as f64;

        let result = self.backend.play(&track);
        self.current = Some(track);

        match result {
            Ok(()) => {
                self.state = PlayerState::Playing;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to start playback: {}", e);
                self.state = PlayerState::Stopped;
                Err(e)
            }
        }
    }
}
