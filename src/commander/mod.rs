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

//! Command-line input logic and state management.
//!
//! Typing `:` opens a one-line command prompt backed by a `tui_input`
//! component. On `Enter` the buffer is parsed into a [`Command`] and
//! dispatched as an application event or background task; `Esc` closes the
//! prompt.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, tasks::AppTask, util::format::parse_time};

#[derive(Debug, PartialEq)]
pub(crate) enum Command {
    Quit,
    Scan,
    Seek(f64),
    /// Volume in `0.0..=1.0`.
    Volume(f64),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the event was consumed by the prompt.
    pub(crate) fn handle_event(
        &mut self,
        event: Event,
        task_tx: &Sender<AppTask>,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;

                if !buffer.is_empty() {
                    match parse_command(&buffer) {
                        Ok(command) => dispatch(command, task_tx, event_tx)?,
                        Err(message) => event_tx.send(AppEvent::Error(message))?,
                    }
                }
            }

            _ => {
                self.input.handle_event(&event);
            }
        }

        Ok(true)
    }
}

/// Parses a command line such as `seek 1:30` or `vol 40`.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, String> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    match parts.as_slice() {
        ["q"] => Ok(Command::Quit),

        ["scan"] => Ok(Command::Scan),

        ["seek", time] => parse_time(time)
            .map(Command::Seek)
            .ok_or_else(|| format!("Invalid time: {}", time)),

        ["vol", percent] => match percent.parse::<u8>() {
            Ok(percent) if percent <= 100 => Ok(Command::Volume(f64::from(percent) / 100.0)),
            _ => Err(format!("Volume must be 0-100: {}", percent)),
        },

        [cmd, ..] => Err(format!("Unknown command: {}", cmd)),

        [] => Err("Empty command".to_string()),
    }
}

fn dispatch(command: Command, task_tx: &Sender<AppTask>, event_tx: &Sender<AppEvent>) -> Result<()> {
    tracing::debug!("Running command {:?}", command);

    match command {
        Command::Quit => event_tx.send(AppEvent::ExitApplication)?,
        Command::Scan => task_tx.send(AppTask::ScanLibrary)?,
        Command::Seek(seconds) => event_tx.send(AppEvent::SeekTo(seconds))?,
        Command::Volume(volume) => event_tx.send(AppEvent::SetVolume(volume))?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("scan"), Ok(Command::Scan));
        assert_eq!(parse_command("seek 1:30"), Ok(Command::Seek(90.0)));
        assert_eq!(parse_command("seek 42"), Ok(Command::Seek(42.0)));
        assert_eq!(parse_command("vol 40"), Ok(Command::Volume(0.4)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_command("seek soon").is_err());
        assert!(parse_command("vol 101").is_err());
        assert!(parse_command("vol -1").is_err());
        assert!(parse_command("shuffle").is_err());
        assert!(parse_command("seek").is_err());
    }

    #[test]
    fn colon_opens_the_prompt_and_enter_dispatches() {
        let (task_tx, task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(key(KeyCode::Char('x')), &task_tx, &event_tx).unwrap());
        assert!(commander.handle_event(key(KeyCode::Char(':')), &task_tx, &event_tx).unwrap());
        assert!(commander.active());

        for c in "scan".chars() {
            commander.handle_event(key(KeyCode::Char(c)), &task_tx, &event_tx).unwrap();
        }
        commander.handle_event(key(KeyCode::Enter), &task_tx, &event_tx).unwrap();

        assert!(!commander.active());
        assert!(matches!(task_rx.try_recv(), Ok(AppTask::ScanLibrary)));
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn unknown_command_reports_an_error() {
        let (task_tx, _task_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(key(KeyCode::Char(':')), &task_tx, &event_tx).unwrap();
        commander.handle_event(key(KeyCode::Char('z')), &task_tx, &event_tx).unwrap();
        commander.handle_event(key(KeyCode::Enter), &task_tx, &event_tx).unwrap();

        assert!(matches!(event_rx.try_recv(), Ok(AppEvent::Error(_))));
    }

    #[test]
    fn escape_closes_the_prompt() {
        let (task_tx, _task_rx) = mpsc::channel();
        let (event_tx, _event_rx) = mpsc::channel();
        let mut commander = Commander::new();

        commander.handle_event(key(KeyCode::Char(':')), &task_tx, &event_tx).unwrap();
        commander.handle_event(key(KeyCode::Char('q')), &task_tx, &event_tx).unwrap();
        commander.handle_event(key(KeyCode::Esc), &task_tx, &event_tx).unwrap();

        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
    }
}
