//! Durable local key/value storage.
//!
//! Every stateful container in this crate persists its full snapshot as a JSON
//! document under a fixed key, and restores it at initialization. Reads of
//! missing or malformed values fall back to a default rather than erroring;
//! write failures are logged and swallowed so that mutations themselves stay
//! infallible.

use std::{
    fmt,
    fs, io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Well-known storage keys.
pub mod keys {
    /// Current cart snapshot.
    pub const CART: &str = "cart";

    /// Transaction ledger.
    pub const TRANSACTIONS: &str = "transactions";

    /// Current signed-in session.
    pub const USER: &str = "user";

    /// Registered users list.
    pub const USERS: &str = "users";

    /// Saved profile.
    pub const PROFILE: &str = "userProfile";

    /// Saved settings.
    pub const SETTINGS: &str = "userSettings";

    /// Theme preference.
    pub const THEME: &str = "theme";

    /// Language preference.
    pub const LANGUAGE: &str = "language";
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure while reading or writing a value.
    #[error("storage io error")]
    Io(#[from] io::Error),
}

/// A synchronous key/value store holding JSON documents.
pub trait Storage: fmt::Debug + Send + Sync {
    /// Read the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Decode the value under `key` into `T`, falling back to `T::default()`.
///
/// Missing values, unreadable backends and malformed JSON all degrade to the
/// default; malformed data is logged and then treated as absent.
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn Storage, key: &str) -> T {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(error) => {
            tracing::warn!(key, %error, "failed to read persisted value; using default");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "malformed persisted value; using default");
            T::default()
        }
    }
}

/// Serialize `value` and write it under `key`.
///
/// Failures are logged and swallowed; callers treat persistence as
/// best-effort.
pub fn persist<T: Serialize>(store: &dyn Storage, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(key, %error, "failed to serialize value for persistence");
            return;
        }
    };

    if let Err(error) = store.write(key, &raw) {
        tracing::warn!(key, %error, "failed to persist value");
    }
}

/// In-memory store, used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        entries.remove(key);

        Ok(())
    }
}

/// File-backed store keeping one `<key>.json` document per key.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the directory could not be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(error)),
        }
    }
}
