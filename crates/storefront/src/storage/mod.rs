//! Key-value persistence for storefront state.
//!
//! Two scopes exist:
//!
//! - **Durable** storage survives restarts and holds the auth and orders
//!   records ([`FileStorage`] in the shell, [`MemoryStorage`] in tests).
//! - **Session** storage lives as long as one shopping session and only holds
//!   the newsletter-prompt flag ([`MemoryStorage`]).
//!
//! Backends store raw strings. [`load_json`] and [`save_json`] layer JSON on
//! top and return explicit errors; callers decide whether a failure falls back
//! to empty state.

mod file;
mod memory;

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored record could not be encoded or decoded.
    #[error("invalid JSON record for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key cannot be used as a storage name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// The backend is unusable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store with browser-storage semantics.
///
/// Methods take `&self`; backends guard their state internally so one store
/// can be shared between the auth and orders stores.
pub trait KeyValueStore: Debug + Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load and decode a JSON record.
///
/// Returns `Ok(None)` when nothing is stored under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the record is not valid JSON for
/// `T`, or the backend's error if the read fails.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })
}

/// Encode and store a JSON record.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if `value` cannot be encoded, or the
/// backend's error if the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
