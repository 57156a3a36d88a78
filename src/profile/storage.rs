//! Per-user JSON storage on disk
//!
//! Every record lives in its own file named after the user-scoped key,
//! e.g. `user_42_profile.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::store::StoreError;
use super::user_id::UserId;

/// Directory-backed key-value storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Storage rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage in the platform data directory
    pub fn open_default() -> Self {
        Self::new(default_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of a user's record
    pub fn record_path(&self, user: &UserId, record: &str) -> PathBuf {
        self.root.join(format!("{}.json", user.key(record)))
    }

    /// Read and decode a record, `None` when it was never written
    pub fn load<T: DeserializeOwned>(&self, user: &UserId, record: &str) -> Result<Option<T>, StoreError> {
        let path = self.record_path(user, record);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let value = serde_json::from_str(&data).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        log::debug!("Loaded {:?}", path);
        Ok(Some(value))
    }

    /// Encode and overwrite a record.
    ///
    /// Writes to a sibling temp file first and renames it over the record,
    /// so a crash mid-write leaves the previous version readable.
    pub fn save<T: Serialize>(&self, user: &UserId, record: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let path = self.record_path(user, record);
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        log::debug!("Saved {:?}", path);
        Ok(())
    }
}

/// Platform data directory, falling back to `./data`
pub fn default_root() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "livremente", "LivreMente") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from("./data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_missing_record_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let user = UserId::new("u1").unwrap();
        let note: Option<Note> = storage.load(&user, "note").unwrap();
        assert!(note.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let user = UserId::new("u1").unwrap();
        let note = Note { text: "breathe".to_string() };

        storage.save(&user, "note", &note).unwrap();
        assert!(storage.record_path(&user, "note").ends_with("user_u1_note.json"));
        let loaded: Option<Note> = storage.load(&user, "note").unwrap();
        assert_eq!(loaded, Some(note));
        assert!(!storage.record_path(&user, "note").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_records_are_scoped_by_user() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let a = UserId::new("a").unwrap();
        let b = UserId::new("b").unwrap();
        storage.save(&a, "note", &Note { text: "mine".to_string() }).unwrap();

        let other: Option<Note> = storage.load(&b, "note").unwrap();
        assert!(other.is_none());
    }

    #[test]
    fn test_corrupted_record_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let user = UserId::new("u1").unwrap();
        std::fs::write(storage.record_path(&user, "note"), "{not json").unwrap();

        let result: Result<Option<Note>, _> = storage.load(&user, "note");
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }
}
