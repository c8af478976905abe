use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::KvStorage;

/// File-backed key-value storage: each key lives in its own
/// `<key>.json` document under the base directory.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        FileStorage {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Storage rooted at the platform data directory, falling back to
    /// the current directory when the platform reports none.
    pub fn in_data_dir(app_dir_name: &str) -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app_dir_name);
        FileStorage::new(base)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KvStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_dir)?;

        let path = self.key_path(key);
        let tmp_path = path.with_extension("tmp");

        // Atomic write: tmp + rename, so a crash never leaves a
        // half-written document behind.
        fs::write(&tmp_path, value)?;
        fs::rename(tmp_path, path)?;

        Ok(())
    }
}
