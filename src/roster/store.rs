//! Persistence for the roster record.
//!
//! The key-value backend is a seam: [`MemoryStore`] for tests and embedding,
//! [`FileStore`] for the terminal app. [`RosterStore`] layers the typed
//! record, the fixed storage key and default substitution on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use super::draft::validate_players;
use super::types::RosterRecord;

/// Storage key under which the single roster record lives.
pub const STORAGE_KEY: &str = "spinner-xo-data";

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization error: {}", err))
    }
}

/// String key-value persistence backend.
pub trait KeyValueStore {
    /// Reads the raw value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Deletes the value for `key`; absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a raw value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend storing each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        info!("Creating FileStore");
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(StoreError::new(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(skip(self, value))]
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Temp file + rename: readers see the old or the new record, never a partial one.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "Stored value written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Typed access to the roster record under [`STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct RosterStore<K> {
    backend: K,
    key: &'static str,
}

impl<K: KeyValueStore> RosterStore<K> {
    /// Wraps a backend using the application storage key.
    pub fn new(backend: K) -> Self {
        Self {
            backend,
            key: STORAGE_KEY,
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Loads the record, substituting `default` when it is absent, unreadable
    /// or fails [`validate_players`].
    #[instrument(skip(self, default), fields(key = self.key))]
    pub fn load(&self, default: RosterRecord) -> RosterRecord {
        let raw = match self.backend.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored roster, using default");
                return default;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored roster, using default");
                return default;
            }
        };

        match serde_json::from_str::<RosterRecord>(&raw) {
            Ok(record) => match validate_players(record.players()) {
                Ok(()) => {
                    info!(players = record.players().len(), "Roster loaded");
                    record
                }
                Err(e) => {
                    warn!(error = %e, "Stored roster breaks the roster rules, using default");
                    default
                }
            },
            Err(e) => {
                warn!(error = %e, "Stored roster is corrupt, using default");
                default
            }
        }
    }

    /// Serializes and stores the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the backend write fails.
    #[instrument(skip(self, record), fields(key = self.key, players = record.players().len()))]
    pub fn save(&mut self, record: &RosterRecord) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record)?;
        self.backend.set(self.key, raw)?;
        debug!("Roster saved");
        Ok(())
    }

    /// Deletes the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot delete the value.
    #[instrument(skip(self), fields(key = self.key))]
    pub fn clear(&mut self) -> Result<(), StoreError> {
        info!("Clearing stored roster");
        self.backend.remove(self.key)
    }
}
