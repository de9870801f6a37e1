use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use redreader_core::state::{ReadingState, ReadingStateStore, StoredPosition};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub(super) enum StateFileError {
    #[error("cannot access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("state file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot encode reading state for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reading positions of every document, kept as one JSON object keyed by
/// document id.
///
/// Records are decoded one at a time so a single damaged entry only resets
/// that document.
pub(super) struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<BTreeMap<String, Value>, StateFileError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StateFileError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&text).map_err(|source| StateFileError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_records(&self, records: &BTreeMap<String, Value>) -> Result<(), StateFileError> {
        let io_error = |source| StateFileError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(records).map_err(|source| {
            StateFileError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write-then-rename so an interrupted save never truncates the file.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(io_error)?;
        fs::rename(&tmp_path, &self.path).map_err(io_error)
    }
}

impl ReadingStateStore for JsonStateFile {
    type Error = StateFileError;

    fn load(&mut self, document_id: &str) -> Result<Option<StoredPosition>, Self::Error> {
        let mut records = self.read_records()?;
        let Some(record) = records.remove(document_id) else {
            return Ok(None);
        };

        Ok(decode_record(document_id, record))
    }

    fn save(&mut self, state: &ReadingState) -> Result<(), Self::Error> {
        let mut records = match self.read_records() {
            Ok(records) => records,
            Err(StateFileError::Parse { path, source }) => {
                warn!("state-file: replacing unreadable {}: {}", path.display(), source);
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };

        let position = StoredPosition {
            idx: Some(state.idx as i64),
            wpm: Some(state.wpm as i64),
            extensions: Some(state.extensions.clone()),
        };
        let value =
            serde_json::to_value(&position).map_err(|source| StateFileError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        records.insert(state.document_id.clone(), value);

        self.write_records(&records)?;
        debug!(
            "state-file: wrote {} idx={} wpm={}",
            state.document_id, state.idx, state.wpm
        );
        Ok(())
    }
}

/// Decodes one stored position. Unreadable extensions are dropped on their
/// own so they never cost the saved `idx`/`wpm`.
fn decode_record(document_id: &str, mut record: Value) -> Option<StoredPosition> {
    let err = match serde_json::from_value(record.clone()) {
        Ok(position) => return Some(position),
        Err(err) => err,
    };

    let extensions = record
        .as_object_mut()
        .and_then(|fields| fields.remove("extensions"));
    if extensions.is_some()
        && let Ok(position) = serde_json::from_value::<StoredPosition>(record)
    {
        warn!("state-file: dropping unreadable extensions for {}: {}", document_id, err);
        return Some(position);
    }

    warn!("state-file: ignoring damaged record for {}: {}", document_id, err);
    None
}

#[cfg(test)]
mod tests {
    use redreader_core::state::EXTENSIONS_VERSION;

    use super::*;

    fn state(document_id: &str, idx: usize, wpm: u16) -> ReadingState {
        let mut state = ReadingState::new(document_id);
        state.idx = idx;
        state.wpm = wpm;
        state
    }

    #[test]
    fn missing_file_has_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStateFile::new(dir.path().join("state.json"));

        assert!(store.load("doc").unwrap().is_none());
    }

    #[test]
    fn saved_position_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStateFile::new(dir.path().join("state.json"));

        store.save(&state("doc", 42, 700)).unwrap();
        let stored = store.load("doc").unwrap().unwrap();
        assert_eq!(stored.idx, Some(42));
        assert_eq!(stored.wpm, Some(700));
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn saving_keeps_other_documents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStateFile::new(dir.path().join("state.json"));

        store.save(&state("first", 1, 600)).unwrap();
        store.save(&state("second", 2, 500)).unwrap();
        store.save(&state("first", 3, 600)).unwrap();

        assert_eq!(store.load("first").unwrap().unwrap().idx, Some(3));
        assert_eq!(store.load("second").unwrap().unwrap().idx, Some(2));
    }

    #[test]
    fn damaged_record_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"doc": {"idx": "seven", "wpm": 600}, "other": {"idx": 4}}"#,
        )
        .unwrap();
        let mut store = JsonStateFile::new(&path);

        assert!(store.load("doc").unwrap().is_none());
        let other = store.load("other").unwrap().unwrap();
        assert_eq!(other.idx, Some(4));
        assert_eq!(other.wpm, None);
    }

    #[test]
    fn extensions_without_version_keep_the_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"doc": {"idx": 42, "wpm": 700, "extensions": {"entries": {"theme": "dark"}}}}"#,
        )
        .unwrap();
        let mut store = JsonStateFile::new(&path);

        let stored = store.load("doc").unwrap().unwrap();
        assert_eq!(stored.idx, Some(42));
        assert_eq!(stored.wpm, Some(700));
        let extensions = stored.extensions.unwrap();
        assert_eq!(extensions.version, EXTENSIONS_VERSION);
        assert_eq!(extensions.entries["theme"], "dark");
    }

    #[test]
    fn unreadable_extensions_are_dropped_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"doc": {"idx": 7, "wpm": 500, "extensions": [1, 2]}}"#).unwrap();
        let mut store = JsonStateFile::new(&path);

        let stored = store.load("doc").unwrap().unwrap();
        assert_eq!(stored.idx, Some(7));
        assert_eq!(stored.wpm, Some(500));
        assert_eq!(stored.extensions, None);
    }

    #[test]
    fn encode_failures_are_not_reported_as_bad_json() {
        let source = serde_json::from_str::<Value>("{").unwrap_err();
        let err = StateFileError::Serialize {
            path: PathBuf::from("state.json"),
            source,
        };

        let message = err.to_string();
        assert!(message.starts_with("cannot encode reading state for state.json"));
        assert!(!message.contains("not valid JSON"));
    }

    #[test]
    fn unreadable_file_fails_load_and_is_replaced_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonStateFile::new(&path);

        assert!(matches!(
            store.load("doc"),
            Err(StateFileError::Parse { .. })
        ));

        store.save(&state("doc", 5, 600)).unwrap();
        assert_eq!(store.load("doc").unwrap().unwrap().idx, Some(5));
    }
}
