//! Durable key-value storage for client state.
//!
//! The cart and auth containers each own one record, stored as a JSON blob
//! under a fixed key. A record is read once at startup and overwritten after
//! every mutation.
//!
//! # Backends
//!
//! - [`JsonFileStore`] - one `{key}.json` file per record in a data directory
//! - [`MemoryStore`] - process-local map, used by tests

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage key for the persisted cart ledger.
pub const CART_KEY: &str = "game-store-cart";

/// Storage key for the persisted auth flag.
pub const AUTH_KEY: &str = "auth-storage";

/// Errors raised by a [`StateStore`].
#[derive(Debug, Error)]
pub enum StateStoreError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record is not valid JSON for the expected type.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used as a record name.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Blob storage keyed by record name.
pub trait StateStore: Send + Sync {
    /// Read the record stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StateStoreError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StateStoreError>;
}

/// Load and decode a JSON record, falling back to `T::default()`.
///
/// Missing and undecodable records both yield the default; the latter is
/// logged so a corrupt file does not stop the store from starting.
pub fn load_or_default<T>(store: &dyn StateStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable state record");
            T::default()
        }
    }
}

/// Load and decode a JSON record.
///
/// # Errors
///
/// Returns an error if the record cannot be read or decoded.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn StateStore,
    key: &str,
) -> Result<Option<T>, StateStoreError> {
    store
        .load(key)?
        .map(|bytes| serde_json::from_slice(&bytes))
        .transpose()
        .map_err(StateStoreError::from)
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_json<T: Serialize>(
    store: &dyn StateStore,
    key: &str,
    value: &T,
) -> Result<(), StateStoreError> {
    let bytes = serde_json::to_vec(value)?;
    store.save(key, &bytes)
}
