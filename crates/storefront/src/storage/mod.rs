//! Durable key-value slots for cart persistence.
//!
//! # Architecture
//!
//! [`CartStorage`] is a minimal string key-value interface. The cart store
//! decides what is written (a JSON array of line records under one key);
//! backends only decide where it lives.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - `HashMap`-backed, for tests and embedding
//! - [`FileStorage`] - one `<key>.json` file per slot in a data directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use thiserror::Error;

/// Longest slot key accepted by [`validate_key`].
pub const MAX_KEY_LENGTH: usize = 64;

/// A synchronous key-value slot store.
///
/// Reads take `&self`; writes take `&mut self` because the store that owns
/// the backend is the only writer.
pub trait CartStorage {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the slot has never been written or was removed.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Insert or replace the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the value stored under `key`.
    ///
    /// Returns `Ok(())` even if the slot did not exist.
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// Errors from the file-backed storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key {0:?}: {1}")]
    InvalidKey(String, &'static str),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Check that `key` is usable as a slot name on every backend.
///
/// Keys are 1-64 characters of ASCII letters, digits, `-` and `_`, which
/// keeps a key from naming anything outside the data directory.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] describing the first violated rule.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(key.to_string(), "must not be empty"));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(StorageError::InvalidKey(
            key.to_string(),
            "must be at most 64 characters",
        ));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidKey(
            key.to_string(),
            "may only contain ASCII letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}
