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

//! Application configuration.
//!
//! This module manages the application configuration file, stored as TOML in
//! the platform configuration directory via `confy`. Every field has a
//! default so older or partial files keep loading; a file that cannot be
//! parsed at all is replaced by defaults in memory (and left untouched on
//! disk).

use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::library::scan::AUDIO_EXTENSIONS;

const CONFIG_NAME: &str = "melodeck";

const STORAGE_FILE_NAME: &str = "storage.json";
const LOG_FILE_NAME: &str = "melodeck.log";

/// Which audio output to drive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AudioBackendKind {
    /// Use libmpv, falling back to simulated playback if it cannot start.
    #[default]
    Auto,
    Mpv,
    Simulated,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,

    /// Candidate directories searched recursively for music.
    pub(crate) media_dirs: Vec<String>,
    pub(crate) extensions: Vec<String>,

    /// Library storage file, next to the configuration file when unset.
    pub(crate) storage_file: Option<String>,

    pub(crate) audio_backend: AudioBackendKind,
    pub(crate) position_poll_ms: u64,
    pub(crate) rescan_interval_hours: u64,

    /// Browse the bundled sample library while nothing has been scanned.
    pub(crate) mock_fallback: bool,

    pub(crate) log_file: Option<String>,
    pub(crate) log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dirs: default_media_dirs(),
            extensions: AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            storage_file: None,
            audio_backend: AudioBackendKind::default(),
            position_poll_ms: 1000,
            rescan_interval_hours: 24,
            mock_fallback: true,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn storage_path(&self) -> PathBuf {
        self.storage_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| beside_config_file(STORAGE_FILE_NAME))
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.log_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| beside_config_file(LOG_FILE_NAME))
    }

    pub(crate) fn media_paths(&self) -> Vec<PathBuf> {
        self.media_dirs.iter().map(|d| expand_home(d)).collect()
    }
}

/// Loads the configuration, writing a default file on first start.
pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

fn default_media_dirs() -> Vec<String> {
    ["~/Music", "~/Downloads"].iter().map(|d| d.to_string()).collect()
}

// Falls back to the working directory when the platform has no config dir.
fn beside_config_file(file_name: &str) -> PathBuf {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join(file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

fn expand_home(dir: &str) -> PathBuf {
    match dir.strip_prefix("~/") {
        Some(rest) => env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(rest))
            .unwrap_or_else(|| PathBuf::from(dir)),
        None => PathBuf::from(dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: AppConfig = from_json(r#"{"media_dirs": ["/srv/music"], "audio_backend": "simulated"}"#);

        assert_eq!(cfg.media_dirs, vec!["/srv/music"]);
        assert_eq!(cfg.audio_backend, AudioBackendKind::Simulated);
        assert_eq!(cfg.position_poll_ms, 1000);
        assert_eq!(cfg.rescan_interval_hours, 24);
        assert!(cfg.mock_fallback);
        assert_eq!(cfg.extensions.len(), AUDIO_EXTENSIONS.len());
    }

    #[test]
    fn explicit_paths_win() {
        let cfg = AppConfig {
            storage_file: Some("/tmp/lib.json".into()),
            log_file: Some("/tmp/app.log".into()),
            ..AppConfig::default()
        };

        assert_eq!(cfg.storage_path(), PathBuf::from("/tmp/lib.json"));
        assert_eq!(cfg.log_path(), PathBuf::from("/tmp/app.log"));
    }

    #[test]
    fn absolute_media_dirs_are_unchanged() {
        assert_eq!(expand_home("/srv/music"), PathBuf::from("/srv/music"));
    }

    fn from_json(json: &str) -> AppConfig {
        serde_json::from_str(json).unwrap()
    }
}
