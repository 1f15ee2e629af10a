//! File-backed storage backend.
//!
//! Each slot is a single `<key>.json` file in the data directory. Writes go
//! to a hidden temporary sibling first and are renamed into place, so a
//! reader only ever sees a complete value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CartStorage, StorageError, validate_key};

/// A directory of JSON slot files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if `key` fails [`validate_key`].
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.json.tmp"))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl CartStorage for FileStorage {
    type Error = StorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let temp = self.temp_path(key);
        fs::write(&temp, value).map_err(|e| io_error(&temp, e))?;
        fs::rename(&temp, &path).map_err(|e| io_error(&path, e))?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
