//! In-memory storage backend.

use std::collections::HashMap;
use std::convert::Infallible;

use super::CartStorage;

/// A `HashMap`-backed slot store. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `key` already holding `value`.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Borrow the raw value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.slots.remove(key);
        Ok(())
    }
}
