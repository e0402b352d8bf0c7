use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::KeyValueStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key/value store backed by one JSON file per key.
///
/// Layout:
/// ```text
/// {base_path}/
/// ├── config.toml
/// ├── losVerbos-srs-v1.json            # review statistics
/// └── losVerbos-srs-v1-excluded.json   # excluded tense ids
/// ```
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("verbos"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize the storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// File for `key`: ASCII letters, digits and `-` are kept as is, every
    /// other byte becomes `_xx` (lower-case hex), so distinct keys never
    /// share a file on a case-sensitive filesystem.
    fn key_path(&self, key: &str) -> PathBuf {
        let mut file_stem = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_stem.push(byte as char);
            } else {
                file_stem.push_str(&format!("_{:02x}", byte));
            }
        }
        self.base_path.join(format!("{}.json", file_stem))
    }
}

impl KeyValueStore for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.init()?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("data"));
        (storage, temp_dir)
    }

    #[test]
    fn test_missing_key_loads_none() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.load("losVerbos-srs-v1").unwrap(), None);
    }

    #[test]
    fn test_save_creates_directory_and_roundtrips() {
        let (storage, _temp) = create_test_storage();

        storage.save("losVerbos-srs-v1", "{\"a\":1}").unwrap();

        assert!(storage.base_path().join("losVerbos-srs-v1.json").exists());
        assert_eq!(
            storage.load("losVerbos-srs-v1").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (storage, _temp) = create_test_storage();

        storage.save("key", "[]").unwrap();
        storage.remove("key").unwrap();
        storage.remove("key").unwrap();

        assert_eq!(storage.load("key").unwrap(), None);
    }

    #[test]
    fn test_unsafe_key_characters_stay_inside_base_path() {
        let (storage, _temp) = create_test_storage();

        storage.save("../escape/key", "x").unwrap();

        assert!(storage
            .base_path()
            .join("_2e_2e_2fescape_2fkey.json")
            .exists());
    }

    #[test]
    fn test_similar_keys_use_separate_files() {
        let (storage, _temp) = create_test_storage();

        assert_ne!(storage.key_path("Foo"), storage.key_path("foo"));
        assert_ne!(storage.key_path("a.b"), storage.key_path("a_b"));

        storage.save("a.b", "first").unwrap();
        storage.save("a_b", "second").unwrap();

        assert_eq!(storage.load("a.b").unwrap().as_deref(), Some("first"));
        assert_eq!(storage.load("a_b").unwrap().as_deref(), Some("second"));
    }
}
