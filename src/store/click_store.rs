//! JSON file persistence for the click record.
//!
//! Loading is forgiving: a missing, unreadable or malformed file yields a
//! zeroed record. Saving writes a sibling temp file and renames it over the
//! target so readers never see a half-written record.

use crate::error::{AppError, Result};
use crate::store::types::ClickRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store for a single [`ClickRecord`].
#[derive(Debug, Clone)]
pub struct ClickStore {
    path: PathBuf,
}

impl ClickStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted record, defaulting to zeros on any failure.
    pub fn load(&self) -> ClickRecord {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = ?self.path, "No saved clicks, starting from zero");
                return ClickRecord::default();
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Unreadable click file, starting from zero");
                return ClickRecord::default();
            }
        };

        match serde_json::from_str::<ClickRecord>(&contents) {
            Ok(record) => {
                tracing::info!(
                    left = record.left,
                    right = record.right,
                    start = ?record.start,
                    "Loaded saved clicks"
                );
                record
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Malformed click file, starting from zero");
                ClickRecord::default()
            }
        }
    }

    /// Overwrites the backing file with `record`.
    pub fn save(&self, record: &ClickRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(|e| AppError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(AppError::io(&self.path, e));
        }

        tracing::debug!(left = record.left, right = record.right, "Saved clicks");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ClickStore {
        ClickStore::new(dir.path().join("clicks.json"))
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).load(), ClickRecord::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), ClickRecord::default());
    }

    #[test]
    fn test_load_non_numeric_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"left": "not a number", "right": 4}"#).unwrap();
        assert_eq!(store.load(), ClickRecord::default());
    }

    #[test]
    fn test_load_negative_count() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"left": -1, "right": 4, "start": null}"#).unwrap();
        assert_eq!(store.load(), ClickRecord::default());
    }

    #[test]
    fn test_load_bad_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"left": 7, "right": 4, "start": "last tuesday"}"#).unwrap();
        assert_eq!(store.load(), ClickRecord::default());

        fs::write(store.path(), r#"{"left": 7, "right": 4, "start": 12}"#).unwrap();
        assert_eq!(store.load(), ClickRecord::default());
    }

    #[test]
    fn test_load_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"left": 10, "right": 5, "start": "2024-01-01T00:00:00"}"#,
        )
        .unwrap();

        let record = store.load();
        assert_eq!(record.left, 10);
        assert_eq!(record.right, 5);
        assert_eq!(
            record.start,
            Some("2024-01-01T00:00:00".parse().unwrap())
        );
    }

    #[test]
    fn test_load_missing_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"left": 2}"#).unwrap();
        assert_eq!(store.load(), ClickRecord::new(2, 0, None));
    }

    #[test]
    fn test_save_then_load_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let record = ClickRecord::new(3, 2, Some("2024-05-06T07:08:09.5".parse().unwrap()));

        store.save(&record).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        store.save(&store.load()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(store.load(), record);
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClickStore::new(dir.path().join("nested").join("clicks.json"));
        store.save(&ClickRecord::new(1, 0, None)).unwrap();
        assert_eq!(store.load(), ClickRecord::new(1, 0, None));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the target path makes the rename fail.
        let store = store_in(&dir);
        fs::create_dir(store.path()).unwrap();
        fs::write(store.path().join("keep"), "x").unwrap();

        let result = store.save(&ClickRecord::new(1, 1, None));
        assert!(matches!(result, Err(AppError::Io { .. })));
        assert!(!store.tmp_path().exists());
    }
}
