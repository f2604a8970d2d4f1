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

//! Audio playback control and state management.
//!
//! Playback is split in two layers:
//!
//! * An [`AudioBackend`] performs the actual audio I/O. [`mpv::MpvBackend`]
//!   drives libmpv on a worker thread; [`simulated::SimulatedBackend`] only
//!   keeps time and is used when no native player is available.
//! * The [`coordinator::PlaybackCoordinator`] owns the playlist and playback
//!   state, and translates UI actions into backend calls.
//!
//! The UI refreshes the displayed position by polling the coordinator from a
//! [`ticker::Ticker`].

pub(crate) mod coordinator;
pub(crate) mod mpv;
pub(crate) mod simulated;
pub(crate) mod ticker;

use thiserror::Error;

use crate::{config::AudioBackendKind, model::Track};

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// Notifications raised by a backend, collected with
/// [`AudioBackend::drain_events`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum BackendEvent {
    TrackEnded,
    Error(String),
}

#[derive(Debug, Error)]
pub(crate) enum PlayerError {
    #[error("audio backend failed to start: {0}")]
    Init(String),

    #[error("audio backend worker has stopped")]
    Disconnected,
}

/// The audio output contract.
///
/// Positions and durations are in seconds, volume is in `0.0..=1.0`.
pub(crate) trait AudioBackend {
    fn name(&self) -> &'static str;

    /// Loads the track and starts playing it from the beginning.
    fn play(&mut self, track: &Track) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn resume(&mut self) -> Result<(), PlayerError>;
    fn stop(&mut self) -> Result<(), PlayerError>;
    fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError>;
    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError>;

    fn position(&self) -> f64;
    /// `None` until the backend knows the length of the loaded track.
    fn duration(&self) -> Option<f64>;
    /// True while audio is actually being produced.
    fn is_playing(&self) -> bool;

    /// Returns and clears the events raised since the last call.
    fn drain_events(&mut self) -> Vec<BackendEvent>;
}

/// Creates the backend selected in the configuration.
///
/// `Auto` tries libmpv first and falls back to simulated playback.
///
/// # Errors
///
/// Returns an error only if `Mpv` was requested explicitly and libmpv could
/// not be started.
pub(crate) fn create_backend(kind: AudioBackendKind) -> Result<Box<dyn AudioBackend>, PlayerError> {
    match kind {
        AudioBackendKind::Mpv => Ok(Box::new(mpv::MpvBackend::new()?)),
        AudioBackendKind::Simulated => Ok(Box::new(simulated::SimulatedBackend::new())),
        AudioBackendKind::Auto => match mpv::MpvBackend::new() {
            Ok(backend) => Ok(Box::new(backend)),
            Err(e) => {
                tracing::warn!("{}, falling back to simulated playback", e);
                Ok(Box::new(simulated::SimulatedBackend::new()))
            }
        },
    }
}
