//! JSON file storage for credential entries.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, trace};

use dryvo_core::error::StorageError;
use dryvo_core::{Error, KeyValueStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

type Entries = BTreeMap<String, String>;

fn map_io(key: &str, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        key: key.to_string(),
        message: err.to_string(),
    })
}

/// A [`KeyValueStore`] persisted as one JSON object on disk.
///
/// Every operation takes an exclusive advisory lock on a sibling `.lock`
/// file, so concurrent processes sharing the store never interleave a
/// read-modify-write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file and its parent directory are created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Acquire the exclusive lock; it is released when the file is dropped.
    fn lock(&self, key: &str) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(key, e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| map_io(key, e))?;

        lock_file.lock_exclusive().map_err(|e| map_io(key, e))?;
        Ok(lock_file)
    }

    fn load(&self, key: &str) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| map_io(key, e))?;
        if json.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&json).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            })
        })
    }

    fn save(&self, key: &str, entries: &Entries) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: e.to_string(),
            })
        })?;

        let tmp = self.path.with_extension("tmp");
        let mut file = File::create(&tmp).map_err(|e| map_io(key, e))?;

        // Restrict permissions before any secret is written.
        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| map_io(key, e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp, perms).map_err(|e| map_io(key, e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| map_io(key, e))?;
        file.sync_data().map_err(|e| map_io(key, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| map_io(key, e))?;

        trace!(path = %self.path.display(), entries = entries.len(), "Store saved");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let lock = self.lock(key)?;
        let mut entries = self.load(key)?;
        entries.insert(key.to_string(), value.to_string());
        self.save(key, &entries)?;
        lock.unlock().map_err(|e| map_io(key, e))?;
        debug!("Entry written");
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let lock = self.lock(key)?;
        let mut entries = self.load(key)?;
        lock.unlock().map_err(|e| map_io(key, e))?;
        Ok(entries.remove(key))
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, key: &str) -> Result<()> {
        let lock = self.lock(key)?;
        let mut entries = self.load(key)?;
        if entries.remove(key).is_some() {
            self.save(key, &entries)?;
            debug!("Entry removed");
        }
        lock.unlock().map_err(|e| map_io(key, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        FileStore::new(dir.path().join("nested").join("tokens.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.read("Dryvo_login_token").await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn write_then_read_from_fresh_handle() {
        let dir = TempDir::new().unwrap();
        store_in(&dir)
            .write("Dryvo_login_token", "auth-test")
            .await
            .unwrap();

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.read("Dryvo_login_token").await.unwrap().as_deref(),
            Some("auth-test")
        );
    }

    #[tokio::test]
    async fn remove_keeps_other_entries() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write("Dryvo_login_token", "a").await.unwrap();
        store.write("Dryvo_refresh_token", "r").await.unwrap();

        store.remove("Dryvo_login_token").await.unwrap();
        store.remove("Dryvo_login_token").await.unwrap();

        assert_eq!(store.read("Dryvo_login_token").await.unwrap(), None);
        assert_eq!(
            store.read("Dryvo_refresh_token").await.unwrap().as_deref(),
            Some("r")
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let err = store.read("Dryvo_login_token").await.unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_is_private_to_owner() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write("Dryvo_login_token", "secret").await.unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
