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

//! MPV-backed audio playback engine.
//!
//! This module provides the native [`AudioBackend`], leveraging `libmpv` for
//! decoding and output. It manages a background worker thread that bridges
//! the command-based backend interface and the MPV property observation
//! system.
//!
//! # Architecture
//!
//! The engine operates using a command channel and shared status:
//! 1. **Command Channel**: Receives [`MpvCommand`]s from the backend handle to
//!    control playback (play, pause, seek, etc.).
//! 2. **Shared Status**: Observed MPV properties (position, duration, pause
//!    and idle flags) are mirrored into a mutex-guarded [`MpvStatus`] so
//!    queries never wait on the worker.
//! 3. **Event Channel**: End-of-file and playback errors are forwarded as
//!    [`BackendEvent`]s and drained by the playback coordinator.

use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        mpsc::{self, Receiver, Sender, TryRecvError},
    },
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result};
use mpv::Format;

use crate::{
    model::Track,
    player::{AudioBackend, BackendEvent, PlayerError},
};

/// Seconds the worker blocks waiting for an MPV event per loop iteration.
const EVENT_WAIT_SECS: f64 = 0.05;

#[derive(Debug)]
enum MpvCommand {
    Play(String),
    Pause,
    Resume,
    Stop,
    SeekTo(f64),
    SetVolume(f64),
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
struct MpvStatus {
    position: f64,
    duration: Option<f64>,
    paused: bool,
    idle: bool,
}

impl Default for MpvStatus {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: None,
            paused: false,
            idle: true,
        }
    }
}

/// A handle to the MPV worker thread.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to the worker.
pub(crate) struct MpvBackend {
    command_tx: Sender<MpvCommand>,
    event_rx: Receiver<BackendEvent>,
    status: Arc<Mutex<MpvStatus>>,
    worker: Option<JoinHandle<()>>,
}

impl MpvBackend {
    /// Spawns the MPV worker and waits until it reports whether MPV could be
    /// initialised.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::Init`] if libmpv is unavailable or rejects the
    /// initial configuration.
    pub(crate) fn new() -> Result<Self, PlayerError> {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let (init_tx, init_rx) = mpsc::channel();

        let status = Arc::new(Mutex::new(MpvStatus::default()));
        let worker_status = Arc::clone(&status);

        let worker = thread::spawn(move || {
            let handler = match create_handler() {
                Ok(handler) => {
                    let _ = init_tx.send(Ok(()));
                    handler
                }
                Err(e) => {
                    let _ = init_tx.send(Err(format!("{:#}", e)));
                    return;
                }
            };

            let error_tx = event_tx.clone();
            if let Err(e) = mpv_worker(handler, command_rx, event_tx, worker_status) {
                tracing::error!("MPV worker failure: {:#}", e);
                let _ = error_tx.send(BackendEvent::Error(format!("MPV worker failure: {}", e)));
            }
        });

        match init_rx.recv() {
            Ok(Ok(())) => {
                tracing::info!("MPV audio backend started");
                Ok(Self {
                    command_tx,
                    event_rx,
                    status,
                    worker: Some(worker),
                })
            }
            Ok(Err(message)) => {
                let _ = worker.join();
                Err(PlayerError::Init(message))
            }
            Err(_) => {
                let _ = worker.join();
                Err(PlayerError::Init("MPV worker exited during start-up".to_string()))
            }
        }
    }

    fn send(&self, command: MpvCommand) -> Result<(), PlayerError> {
        self.command_tx
            .send(command)
            .map_err(|_| PlayerError::Disconnected)
    }

    fn status(&self) -> MutexGuard<'_, MpvStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioBackend for MpvBackend {
    fn name(&self) -> &'static str {
        "mpv"
    }

    fn play(&mut self, track: &Track) -> Result<(), PlayerError> {
        *self.status() = MpvStatus::default();
        self.send(MpvCommand::Play(track.path.clone()))
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.send(MpvCommand::Pause)
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        self.send(MpvCommand::Resume)
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.send(MpvCommand::Stop)
    }

    fn seek_to(&mut self, seconds: f64) -> Result<(), PlayerError> {
        self.status().position = seconds;
        self.send(MpvCommand::SeekTo(seconds))
    }

    fn set_volume(&mut self, volume: f64) -> Result<(), PlayerError> {
        self.send(MpvCommand::SetVolume(volume))
    }

    fn position(&self) -> f64 {
        self.status().position
    }

    fn duration(&self) -> Option<f64> {
        self.status().duration
    }

    // Stays false after a play until MPV reports the file as loaded.
    fn is_playing(&self) -> bool {
        let status = self.status();
        !status.paused && !status.idle
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        let mut events = Vec::new();
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.worker.is_some() {
                        events.push(BackendEvent::Error("MPV worker has stopped".to_string()));
                        self.worker = None;
                    }
                    break;
                }
            }
        }
        events
    }
}

impl Drop for MpvBackend {
    fn drop(&mut self) {
        let _ = self.command_tx.send(MpvCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn create_handler() -> Result<mpv::MpvHandler> {
    let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
    builder
        .set_option("vo", "null")
        .context("Failed to set no video output")?;
    let mut handler = builder.build().context("Failed to build MPV handler")?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    Ok(handler)
}

/// The primary execution loop for the MPV worker.
///
/// Alternates between draining pending commands and waiting briefly for MPV
/// events, until a shutdown command arrives or the backend handle is dropped.
///
/// # Errors
///
/// Returns an error if MPV event processing fails in a way the worker cannot
/// recover from.
fn mpv_worker(
    mut handler: mpv::MpvHandler,
    command_rx: Receiver<MpvCommand>,
    event_tx: Sender<BackendEvent>,
    status: Arc<Mutex<MpvStatus>>,
) -> Result<()> {
    while process_commands(&mut handler, &command_rx, &event_tx) {
        process_mpv_events(&mut handler, &status, &event_tx)?;
    }

    tracing::debug!("MPV worker shutting down");
    Ok(())
}

/// Drains and executes all pending commands.
///
/// A failing command is reported as a [`BackendEvent::Error`] and does not
/// stop the worker. Returns `false` once the worker should exit.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<MpvCommand>,
    event_tx: &Sender<BackendEvent>,
) -> bool {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        };

        let result = match command {
            MpvCommand::Play(path) => handler
                .command(&["loadfile", &path, "replace"])
                .with_context(|| format!("Failed to load file: {}", path))
                .and_then(|_| handler.set_property("pause", false).context("Failed to unpause")),
            MpvCommand::Pause => handler.set_property("pause", true).context("Failed to pause"),
            MpvCommand::Resume => handler.set_property("pause", false).context("Failed to resume"),
            MpvCommand::Stop => handler.command(&["stop"]).context("Failed to stop"),
            MpvCommand::SeekTo(seconds) => handler
                .command(&["seek", &seconds.to_string(), "absolute"])
                .context("Failed to seek"),
            MpvCommand::SetVolume(volume) => {
                let percent = (volume * 100.0).round().to_string();
                handler
                    .command(&["set", "volume", &percent])
                    .context("Failed to set volume")
            }
            MpvCommand::Shutdown => return false,
        };

        if let Err(e) = result {
            tracing::warn!("{:#}", e);
            let _ = event_tx.send(BackendEvent::Error(e.to_string()));
        }
    }
}

/// Polls for MPV events and mirrors them into the shared status.
///
/// This function waits for up to [`EVENT_WAIT_SECS`] for an event from the
/// MPV context.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    status: &Mutex<MpvStatus>,
    event_tx: &Sender<BackendEvent>,
) -> Result<()> {
    let Some(mpv_event) = handler.wait_event(EVENT_WAIT_SECS) else {
        return Ok(());
    };

    let backend_event = match mpv_event {
        mpv::Event::PropertyChange { name, change, .. } => {
            let mut status = status.lock().unwrap_or_else(PoisonError::into_inner);
            match (name, change) {
                ("duration", Format::Double(duration)) if duration > 0.0 => {
                    status.duration = Some(duration)
                }
                ("pause", Format::Flag(pause)) => status.paused = pause,
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    status.position = seconds
                }
                ("idle-active", Format::Flag(idle_active)) => status.idle = idle_active,
                _ => {}
            }
            None
        }
        mpv::Event::EndFile(result) => end_file_event(result),
        _ => None,
    };

    if let Some(event) = backend_event {
        event_tx.send(event).context("Failed to send backend event")?;
    }

    Ok(())
}

/// Maps an MPV end-of-file notification to a backend event.
///
/// MPV delivers an end reason of "error" as `Err` carrying the cause, so a
/// missing or undecodable file arrives here as `Err`. Stops and replacements
/// caused by our own commands produce no event.
fn end_file_event(result: mpv::Result<mpv::EndFileReason>) -> Option<BackendEvent> {
    match result {
        Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => Some(BackendEvent::TrackEnded),
        Ok(_) => None,
        Err(e) => Some(BackendEvent::Error(format!("MPV could not play the file: {:?}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_file_ends_the_track() {
        assert_eq!(
            end_file_event(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)),
            Some(BackendEvent::TrackEnded)
        );
    }

    #[test]
    fn stopping_or_replacing_the_file_is_silent() {
        assert_eq!(end_file_event(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_STOP)), None);
        assert_eq!(end_file_event(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_QUIT)), None);
        assert_eq!(end_file_event(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_REDIRECT)), None);
    }

    #[test]
    fn failed_loads_become_errors() {
        let event = end_file_event(Err(mpv::Error::MPV_ERROR_LOADING_FAILED));

        match event {
            Some(BackendEvent::Error(message)) => {
                assert!(message.contains("LOADING_FAILED"), "{}", message)
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
