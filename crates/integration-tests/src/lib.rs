//! Integration tests for Bistro.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bistro-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state surviving across store instances
//! - `menu_to_cart` - Menu items flowing into the cart and its totals
//!
//! Each test gets its own [`TempDir`], removed when the [`TestDataDir`] is
//! dropped, including when an assertion panics.

use std::io;
use std::path::{Path, PathBuf};

use bistro_storefront::{CartStore, DEFAULT_CART_KEY, FileStorage};
use tempfile::TempDir;

/// A throwaway data directory for one test.
///
/// The data directory itself sits one level below the temp root and is not
/// created up front, so the first cart write still has to create it.
#[derive(Debug)]
pub struct TestDataDir {
    root: TempDir,
    path: PathBuf,
}

impl TestDataDir {
    /// Create a fresh temp root and reserve a data directory inside it.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the temp root cannot be created.
    pub fn new() -> io::Result<Self> {
        let root = tempfile::Builder::new().prefix("bistro-it-").tempdir()?;
        let path = root.path().join("data");
        Ok(Self { root, path })
    }

    /// The data directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temp root holding the data directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// A file backend rooted at the data directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.path)
    }

    /// A cart store over the default slot, as a fresh session would open it.
    #[must_use]
    pub fn open_cart(&self) -> CartStore<FileStorage> {
        CartStore::initialize(self.storage(), DEFAULT_CART_KEY)
    }

    /// Path of the default cart slot file.
    #[must_use]
    pub fn cart_file(&self) -> PathBuf {
        self.path.join(format!("{DEFAULT_CART_KEY}.json"))
    }
}
