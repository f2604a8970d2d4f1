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

//! Persistent key/value storage.
//!
//! A small file-backed store holding one JSON object whose keys map to
//! arbitrary JSON values. The library snapshot lives under
//! [`LIBRARY_STORAGE_KEY`].
//!
//! Writes go to a temporary sibling file which is then renamed over the
//! store, so an interrupted write never leaves a truncated document behind.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;

pub(crate) const LIBRARY_STORAGE_KEY: &str = "@MusicPlayer:library";

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),
}

#[derive(Debug, Clone)]
pub(crate) struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the value stored under `key`, `None` if there is no such key or
    /// the store file does not exist yet.
    pub(crate) fn get_item(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut items = self.read_all()?;
        Ok(items.remove(key))
    }

    pub(crate) fn set_item(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value);
        self.write_all(&items)
    }

    pub(crate) fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        match value {
            Value::Object(items) => Ok(items),
            _ => Err(StoreError::NotAnObject(self.path.clone())),
        }
    }

    fn write_all(&self, items: &Map<String, Value>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let text = serde_json::to_string(items).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, text).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::open(dir.path().join("storage.json"));

        assert_eq!(store.get_item(LIBRARY_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn values_are_kept_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::open(dir.path().join("nested/storage.json"));

        store.set_item("a", json!({"x": 1})).unwrap();
        store.set_item("b", json!([1, 2, 3])).unwrap();
        store.set_item("a", json!({"x": 2})).unwrap();

        assert_eq!(store.get_item("a").unwrap(), Some(json!({"x": 2})));
        assert_eq!(store.get_item("b").unwrap(), Some(json!([1, 2, 3])));

        store.remove_item("b").unwrap();
        assert_eq!(store.get_item("b").unwrap(), None);
        assert!(!dir.path().join("nested/storage.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = LibraryStore::open(&path);

        assert!(matches!(store.get_item("a"), Err(StoreError::Json { .. })));
    }

    #[test]
    fn non_object_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1]").unwrap();

        let store = LibraryStore::open(&path);

        assert!(matches!(store.get_item("a"), Err(StoreError::NotAnObject(_))));
    }
}
