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

//! Timekeeping-only playback.
//!
//! Used when no native audio output can be started. No sound is produced;
//! the position advances with wall-clock time while "playing", stops at the
//! track duration, and a single [`BackendEvent::TrackEnded`] is raised so the
//! coordinator advances through the playlist exactly as with real audio.

use std::time::Instant;

use crate::{
    model::Track,
    player::{AudioBackend, BackendEvent, PlayerError},
};

#[derive(Debug)]
pub(crate) struct SimulatedBackend {
    duration: Option<f64>,
    /// Position at the last play, resume or seek.
    offset: f64,
    /// Set while playing.
    started: Option<Instant>,
    ended: bool,
    events: Vec<BackendEvent>,
}

impl SimulatedBackend {
    pub(crate) fn new() -> Self {
        Self {
            duration: None,
            offset: 0.0,
            started: None,
            ended: false,
            events: Vec::new(),
        }
    }

    fn clamp(&self, seconds: f64) -> f64 {
        let seconds = seconds.max(0.0);
        match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        }
    }

    fn elapsed(&self) -> f64 {
        self.started
            .map(|started| started.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl AudioBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn play(&mut self, track: &Track) -> Result<(), PlayerError> {
        tracing::debug!("Simulating playback of {}", track.path);
        self.duration = Some(track.duration as f64);
        self.offset = 0.0;
        self.started = Some(Instant::now());
        self.ended = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.offset = self.position();
        self.started = None;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        if self.duration.is_some() && !self.ended && self.started.is_none() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.offset = 0.0;
        self.started = None;
        Ok(())
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError> {
        self.offset = self.clamp(seconds);
        self.ended = false;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        tracing::debug!("Simulated volume set to {:.2}", volume);
        Ok(())
    }

    fn position(&self) -> f64 {
        self.clamp(self.offset + self.elapsed())
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        if let (Some(duration), Some(_)) = (self.duration, self.started) {
            if !self.ended && self.position() >= duration {
                self.ended = true;
                self.offset = duration;
                self.started = None;
                self.events.push(BackendEvent::TrackEnded);
            }
        }

        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(duration: u64) -> Track {
        Track {
            id: "t".into(),
            album_id: "a".into(),
            artist_id: "r".into(),
            title: "T".into(),
            artist: "R".into(),
            album: "A".into(),
            duration,
            path: "/mock/t.mp3".into(),
            cover: None,
        }
    }

    #[test]
    fn reaching_the_end_raises_one_track_ended() {
        let mut backend = SimulatedBackend::new();
        backend.play(&track(100)).unwrap();
        backend.seek_to(100.0).unwrap();

        assert_eq!(backend.drain_events(), vec![BackendEvent::TrackEnded]);
        assert!(!backend.is_playing());
        assert_eq!(backend.position(), 100.0);
        assert!(backend.drain_events().is_empty());
    }

    #[test]
    fn zero_length_track_ends_immediately() {
        let mut backend = SimulatedBackend::new();
        backend.play(&track(0)).unwrap();

        assert_eq!(backend.drain_events(), vec![BackendEvent::TrackEnded]);
    }

    #[test]
    fn pause_freezes_the_position() {
        let mut backend = SimulatedBackend::new();
        backend.play(&track(300)).unwrap();
        backend.pause().unwrap();
        backend.seek_to(42.0).unwrap();

        assert!(!backend.is_playing());
        assert_eq!(backend.position(), 42.0);
        assert!(backend.drain_events().is_empty());

        backend.resume().unwrap();
        assert!(backend.is_playing());
        assert!(backend.position() >= 42.0);
    }

    #[test]
    fn seeking_is_clamped_to_the_track() {
        let mut backend = SimulatedBackend::new();
        backend.play(&track(10)).unwrap();
        backend.pause().unwrap();

        backend.seek_to(-5.0).unwrap();
        assert_eq!(backend.position(), 0.0);

        backend.seek_to(50.0).unwrap();
        assert_eq!(backend.position(), 10.0);
    }

    #[test]
    fn resume_without_a_track_does_nothing() {
        let mut backend = SimulatedBackend::new();
        backend.resume().unwrap();

        assert!(!backend.is_playing());
        assert_eq!(backend.duration(), None);
    }
}
