use super::backend::{StorageBackend, StoreKey};
use crate::error::{CardzError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend: one JSON file per store key under the
/// wallet's data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: StoreKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CardzError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(path).map_err(CardzError::Io)?;
        Ok(Some(payload))
    }

    fn write(&self, key: StoreKey, payload: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self
            .root
            .join(format!(".{}-{}.tmp", key.file_name(), Uuid::new_v4()));
        fs::write(&tmp_path, payload).map_err(CardzError::Io)?;
        fs::rename(&tmp_path, self.key_path(key)).map_err(CardzError::Io)?;

        Ok(())
    }
}
