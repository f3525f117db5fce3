//! Persistent key-value snapshot store.
//!
//! Cart and favorites state is mirrored to a small key-value store after
//! every mutation, so a reload loses at most the in-flight change. The
//! store holds UI convenience state only - the remote document store stays
//! the source of truth for orders and products - so there is no encryption
//! and no versioning.
//!
//! Loading tolerates both a missing key and malformed stored content; either
//! degrades to the caller's default. Saving is best-effort: failures are
//! logged and never surface to the mutating caller.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors raised by snapshot store implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Lock poisoned")]
    Poisoned,
}

/// A string key-value store scoped to one application session.
///
/// The browser build backs this with `localStorage`; on the desktop/test
/// side [`JsonFileStore`] and [`MemoryStore`] stand in. Implementations only
/// move strings; (de)serialization and failure policy live in
/// [`load_snapshot`]/[`save_snapshot`].
pub trait SnapshotStore: Send + Sync {
    /// Read the raw value for `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing medium fails; absence is not
    /// an error.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw value for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing medium fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` entirely. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backing medium fails.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and deserialize a snapshot, falling back to `T::default()`.
///
/// A missing key and malformed content are treated identically: the caller
/// gets the default and keeps running. Malformed content is logged at warn.
pub fn load_snapshot<T: DeserializeOwned + Default>(store: &dyn SnapshotStore, key: &str) -> T {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(error = %e, key, "Failed to read snapshot, using default");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, key, "Malformed snapshot, using default");
            T::default()
        }
    }
}

/// Serialize and persist a snapshot, best-effort.
///
/// Failures are logged and swallowed; state mutations never fail on account
/// of persistence.
pub fn save_snapshot<T: Serialize>(store: &dyn SnapshotStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, key, "Failed to serialize snapshot");
            return;
        }
    };

    if let Err(e) = store.set_item(key, &raw) {
        warn!(error = %e, key, "Failed to persist snapshot");
    }
}

/// Remove a persisted snapshot, best-effort.
pub fn clear_snapshot(store: &dyn SnapshotStore, key: &str) {
    if let Err(e) = store.remove_item(key) {
        warn!(error = %e, key, "Failed to clear snapshot");
    }
}

// =============================================================================
// JsonFileStore
// =============================================================================

/// File-per-key store rooted at a directory.
///
/// `key` maps to `<dir>/<key>.json`. The directory is created lazily on the
/// first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. No I/O happens until first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                key: key.to_owned(),
                source: e,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io {
            key: key.to_owned(),
            source: e,
        })?;
        std::fs::write(self.path_for(key), value).map_err(|e| StorageError::Io {
            key: key.to_owned(),
            source: e,
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io {
                key: key.to_owned(),
                source: e,
            }),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}
