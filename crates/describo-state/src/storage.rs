//! # Durable Key/Value Storage
//!
//! String key/value storage that survives a restart of the dashboard. The
//! session manager keeps the auth token and the serialized user record here.
//!
//! ```text
//! ┌──────────────────────────┐        ┌─────────────────────────────────┐
//! │ SessionManager           │ get    │ KeyValueStorage                 │
//! │  restore / login /       │ set    │  ├── MemoryStorage (tests)      │
//! │  register / logout       │ remove │  └── FileStorage (session.json) │
//! └──────────────────────────┘ ─────► └─────────────────────────────────┘
//! ```
//!
//! Both implementations are synchronous: a write is a few hundred bytes and
//! `logout` has to stay synchronous.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// Key holding the raw auth token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Key holding the JSON-serialized [`AuthUser`](describo_core::AuthUser).
pub const AUTH_USER_KEY: &str = "auth_user";

/// Durable string key/value storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Process-local storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File storage
// =============================================================================

/// Storage backed by one JSON object file (`{"auth_token": "...", ...}`).
///
/// Every operation re-reads the file, so two dashboards pointed at the same
/// path see each other's writes.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Storage at an explicit path. The parent directory is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `session.json` in the platform data directory
    /// (`~/.local/share/describo/` on Linux).
    pub fn in_data_dir() -> StorageResult<Self> {
        let dirs = directories::ProjectDirs::from("dev", "describo", "dashboard").ok_or_else(
            || io::Error::new(io::ErrorKind::NotFound, "Unable to locate data dir"),
        )?;
        Ok(Self::new(dirs.data_dir().join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Reads the current entries for a write, starting over if the file is corrupt.
    fn entries_for_write(&self) -> StorageResult<BTreeMap<String, String>> {
        match self.read_entries() {
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = ?self.path, %reason, "Overwriting corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(key, path = ?self.path, "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.read_entries() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_entries(&entries)?;
                }
                Ok(())
            }
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = ?self.path, %reason, "Resetting corrupt storage file");
                self.write_entries(&BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }
}
