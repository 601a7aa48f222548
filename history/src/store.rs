use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::*;

/// History kept in a single JSON file, rewritten whole on every save.
///
/// There is no locking: two processes saving at once lose one of the writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or empty files are an empty history.
    pub fn try_load(&self) -> Result<HistoryFile> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No history at {}", self.path.display());
                return Ok(HistoryFile::default());
            }
            Err(source) => {
                return Err(HistoryError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(HistoryFile::default());
        }

        serde_json::from_str(&text).map_err(|source| HistoryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Every stored record tagged with its user; unreadable files count as no history.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(file) => {
                let entries = file.entries();
                log::debug!("Loaded {} history records", entries.len());
                entries
            }
            Err(err) => {
                log::warn!("Ignoring history: {err}");
                Vec::new()
            }
        }
    }

    /// Read-modify-write of the whole file. A malformed file is never overwritten.
    pub fn try_append(&self, username: &str, record: GameRecord) -> Result<()> {
        let mut file = self.try_load()?;
        file.push(username, record);
        self.try_save(&file)
    }

    /// Like [`Self::try_append`] but logs failures instead of returning them.
    /// Returns whether the record was written.
    pub fn append(&self, username: &str, record: GameRecord) -> bool {
        match self.try_append(username, record) {
            Ok(()) => {
                log::info!("Saved game for {username} to {}", self.path.display());
                true
            }
            Err(err) => {
                log::error!("Could not save game history: {err}");
                false
            }
        }
    }

    pub fn try_save(&self, file: &HistoryFile) -> Result<()> {
        let io_error = |source| HistoryError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = serde_json::to_string_pretty(file).map_err(|source| HistoryError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use tandem_core::Difficulty;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().is_empty());
        assert_eq!(store.try_load().unwrap(), HistoryFile::default());
    }

    #[test]
    fn append_then_load_flattens_users() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.append("zoe", record(Difficulty::Easy, 12, true)));
        assert!(store.append("max", record(Difficulty::Hard, -1, false)));
        assert!(store.append("zoe", record(Difficulty::Medium, 30, true)));

        let entries = store.load();
        let users: Vec<_> = entries.iter().map(|entry| entry.username.as_str()).collect();
        assert_eq!(users, ["max", "zoe", "zoe"]);
        assert_eq!(entries[2].record.final_score, 30);
    }

    #[test]
    fn written_file_has_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.try_append("zoe", record(Difficulty::Easy, 12, true)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();

        let history = &json["users"]["zoe"]["history"];
        assert_eq!(history.as_array().map(Vec::len), Some(1));
        assert_eq!(history[0]["difficulty"], "EASY");
        assert_eq!(history[0]["finalScore"], 12);
    }

    #[test]
    fn malformed_file_is_ignored_and_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(HistoryError::Malformed { .. })));
        assert!(!store.append("zoe", record(Difficulty::Easy, 1, true)));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"users": {"zoe": {"history": [{"finalScore": "many"}]}}}"#).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn empty_file_and_missing_sections_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "  \n").unwrap();
        assert!(store.try_load().unwrap().is_empty());

        fs::write(store.path(), r#"{"users": {"zoe": {}}}"#).unwrap();
        assert!(store.try_load().unwrap().is_empty());

        fs::write(store.path(), "{}").unwrap();
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("nested/deeper/history.json"));

        store.try_append("zoe", record(Difficulty::Hard, 5, false)).unwrap();

        assert_eq!(store.load().len(), 1);
    }
}
